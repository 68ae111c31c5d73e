// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::resolve_category;
use super::{arg_str, json_flags, opt_str};
use crate::analytics::{BudgetRow, budget_lines_progress, budget_status};
use crate::models::BudgetRequest;
use crate::source::{DataSource, HttpSource, Snapshot};
use crate::utils::{fmt_usd, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_CELLS: u32 = 20;

pub fn handle(source: &HttpSource, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(source, sub)?,
        Some(("set", sub)) => set(source, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(source: &dyn DataSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = source.fetch().context("Failed to fetch budgets")?;
    let data = budget_rows(&snapshot, sub.get_flag("recompute"));
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No budgets yet. Add one with `spendwise budget set`.");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Category", "Limit", "Spent", "Remaining", "Used", "Progress"],
            table_rows(&data)
        )
    );
    Ok(())
}

pub fn budget_rows(snapshot: &Snapshot, recompute: bool) -> Vec<BudgetRow> {
    match snapshot.user.primary_budget() {
        Some(b) if recompute => budget_status(&snapshot.transactions, b),
        Some(b) => budget_lines_progress(b),
        None => Vec::new(),
    }
}

pub fn table_rows(rows: &[BudgetRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.name.clone(),
                fmt_usd(&r.limit),
                fmt_usd(&r.spent),
                format!("{} remaining", fmt_usd(&r.remaining)),
                format!("{:.0}%", r.percent),
                format!(
                    "{}{}",
                    render_bar(r.progress().bar_width()),
                    if r.alert { " !" } else { "" }
                ),
            ]
        })
        .collect()
}

/// Text progress bar for an already clamped 0..=100 width.
pub fn render_bar(width: Decimal) -> String {
    let cells = BAR_CELLS as u64;
    let filled = (width * Decimal::from(cells) / Decimal::ONE_HUNDRED)
        .round()
        .to_u64()
        .unwrap_or(0)
        .min(cells);
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        "-".repeat((cells - filled) as usize)
    )
}

/// A budget limit must be a positive amount.
pub fn parse_limit(s: &str) -> Result<Decimal> {
    let limit = parse_decimal(s).context("Please enter a valid limit amount")?;
    if limit <= Decimal::ZERO {
        bail!("Please enter a valid limit amount: {} is not above zero", limit);
    }
    Ok(limit)
}

fn set(source: &HttpSource, sub: &clap::ArgMatches) -> Result<()> {
    let limit = parse_limit(arg_str(sub, "limit")?)?;
    let start = match opt_str(sub, "start") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let end = match opt_str(sub, "end") {
        Some(s) => parse_date(s)?,
        None => start,
    };
    if end < start {
        bail!("End date cannot be before start date");
    }

    let categories = source
        .fetch_categories()
        .context("Failed to fetch categories")?;
    let category = resolve_category(&categories, arg_str(sub, "category")?, None)?;
    let user_id = source.user_id()?;
    source
        .save_budget_line(
            &user_id,
            &BudgetRequest {
                name: category.name.clone(),
                category: category.id.clone(),
                limit,
                start_date: start,
                end_date: end,
            },
        )
        .context("Failed to save budget. Please try again.")?;
    println!(
        "Budget set for {} = {} ({} to {})",
        category.name,
        fmt_usd(&limit),
        start,
        end
    );
    Ok(())
}
