// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg_str, json_flags, opt_str};
use crate::analytics::charts::{TransactionListItem, transaction_list_item};
use crate::analytics::{WeekBuckets, group_by_week};
use crate::models::{Category, NewTransaction, TransactionType};
use crate::source::{DataSource, HttpSource};
use crate::utils::{fmt_usd, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result, anyhow, bail};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(source: &HttpSource, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(source, sub)?,
        Some(("add", sub)) => add(source, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(source: &dyn DataSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = source.fetch().context("Failed to fetch transactions")?;
    let weeks = week_views(&group_by_week(&snapshot.transactions));
    if maybe_print_json(json_flag, jsonl_flag, &weeks)? {
        return Ok(());
    }
    if weeks.is_empty() {
        println!("No transactions found");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Week", "Date", "Name", "Category", "Type", "Amount"],
            query_rows(&weeks)
        )
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub week: String,
    pub transactions: Vec<TransactionListItem>,
}

pub fn week_views(weeks: &WeekBuckets) -> Vec<WeekView> {
    weeks
        .iter()
        .map(|b| WeekView {
            week: b.key.clone(),
            transactions: b.transactions.iter().map(transaction_list_item).collect(),
        })
        .collect()
}

/// Table rows; the week key is printed on the first row of each bucket only.
pub fn query_rows(weeks: &[WeekView]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for w in weeks {
        for (i, item) in w.transactions.iter().enumerate() {
            rows.push(vec![
                if i == 0 { w.week.clone() } else { String::new() },
                item.date_text.clone(),
                item.name.clone(),
                item.category.clone(),
                item.type_label.clone(),
                item.amount_text.clone(),
            ]);
        }
    }
    rows
}

fn add(source: &HttpSource, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TransactionType::parse(arg_str(sub, "type")?);
    let name = arg_str(sub, "name")?;
    let amount = parse_decimal(arg_str(sub, "amount")?)?;
    if name.is_empty() {
        bail!("Please fill in all fields: name is empty");
    }
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero, got {}", amount);
    }
    let date = match opt_str(sub, "date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let time = opt_str(sub, "time")
        .map(str::to_string)
        .unwrap_or_else(|| chrono::Local::now().format("%H:%M").to_string());

    let categories = source
        .fetch_categories()
        .context("Failed to fetch categories")?;
    let category = resolve_category(&categories, arg_str(sub, "category")?, Some(kind))?;

    let mut user = source.fetch_user().context("Failed to fetch user")?;
    source
        .submit_transaction(&NewTransaction {
            kind,
            name: name.to_string(),
            category: category.id.clone(),
            amount,
            date,
            time,
        })
        .context("Failed to add transaction")?;
    println!(
        "Recorded {} {} '{}' on {} ({})",
        kind,
        fmt_usd(&amount),
        name,
        date,
        category.name
    );
    if let Some(balance) = user.apply_to_primary_wallet(kind, amount) {
        println!("Wallet balance (projected): {}", fmt_usd(&balance));
    }
    Ok(())
}

/// Find a category by id or case-insensitive name, optionally restricted to
/// one type.
pub fn resolve_category<'a>(
    categories: &'a [Category],
    needle: &str,
    kind: Option<TransactionType>,
) -> Result<&'a Category> {
    let needle = needle.trim();
    categories
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind == k))
        .find(|c| c.id == needle || c.name.eq_ignore_ascii_case(needle))
        .ok_or_else(|| match kind {
            Some(k) => anyhow!("Category '{}' not found among {} categories", needle, k),
            None => anyhow!("Category '{}' not found", needle),
        })
}
