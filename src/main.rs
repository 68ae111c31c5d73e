// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use spendwise::{cli, commands, config::Config, logging, source::HttpSource};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init_tracing(matches.get_flag("verbose"));

    let cfg = Config::load()
        .context("Failed to load configuration")?
        .with_overrides(
            matches.get_one::<String>("api-url").map(String::as_str),
            matches.get_one::<String>("token").map(String::as_str),
        );
    let source = HttpSource::new(&cfg).context("Failed to build HTTP client")?;

    match matches.subcommand() {
        Some(("home", sub)) => commands::home::handle(&source, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&source, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&source, sub)?,
        Some(("report", sub)) => commands::reports::report(&source, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&source, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&source, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&source, sub)?,
        Some(("wallet", sub)) => commands::wallet::handle(&source, sub)?,
        Some(("config", _)) => commands::settings::handle(&cfg)?,
        Some(("weeks", sub)) => commands::weeks::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
