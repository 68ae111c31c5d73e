// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON value per line"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .required(required)
        .value_parser(["income", "expense"])
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(crate_version!())
        .about("Weekly transactions, budgets, and spending reports from your finance backend")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides SPENDWISE_API_URL)"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .help("Bearer token (overrides SPENDWISE_TOKEN)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(json_args(
            Command::new("home").about("Balance, top budgets, and recent transactions"),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_args(
                    Command::new("list").about("List transactions grouped by week"),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(type_arg(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category name or id"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("time").long("time").help("HH:MM")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Category budgets")
                .subcommand(json_args(
                    Command::new("list").about("Budget progress").arg(
                        Arg::new("recompute")
                            .long("recompute")
                            .action(ArgAction::SetTrue)
                            .help("Sum spent from transactions instead of trusting the server"),
                    ),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Set a category limit")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end")),
                ),
        )
        .subcommand(json_args(
            Command::new("report").about("Income vs expense by day and balance trend"),
        ))
        .subcommand(json_args(
            Command::new("summary")
                .about("Totals and per-category breakdown")
                .arg(type_arg(false)),
        ))
        .subcommand(json_args(
            Command::new("insights").about("AI predictions and recommendations"),
        ))
        .subcommand(json_args(
            Command::new("categories")
                .about("List categories")
                .arg(type_arg(false)),
        ))
        .subcommand(
            Command::new("wallet").about("Wallet").subcommand(
                Command::new("set").about("Set the wallet balance").arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
            ),
        )
        .subcommand(Command::new("config").about("Show effective configuration"))
        .subcommand(
            Command::new("weeks")
                .about("Week key for a date")
                .arg(Arg::new("date").required(true))
                .arg(
                    Arg::new("count")
                        .long("count")
                        .value_parser(value_parser!(u32))
                        .help("Also show the following N days"),
                ),
        )
}
