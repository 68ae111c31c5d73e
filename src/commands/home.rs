// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::budgets::table_rows;
use super::json_flags;
use crate::analytics::BudgetRow;
use crate::analytics::budget_lines_progress;
use crate::analytics::charts::{TransactionListItem, recent_transactions, transaction_list_item};
use crate::source::{DataSource, Snapshot};
use crate::utils::{fmt_usd, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

const TOP_BUDGETS: usize = 2;
const RECENT: usize = 5;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub user: String,
    pub balance: Decimal,
    pub budgets: Vec<BudgetRow>,
    pub recent: Vec<TransactionListItem>,
}

pub fn home_view(snapshot: &Snapshot) -> HomeView {
    let mut budgets = snapshot
        .user
        .primary_budget()
        .map(budget_lines_progress)
        .unwrap_or_default();
    budgets.truncate(TOP_BUDGETS);
    HomeView {
        user: snapshot
            .user
            .user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_default(),
        balance: snapshot
            .user
            .primary_wallet()
            .map(|w| w.balance)
            .unwrap_or(Decimal::ZERO),
        budgets,
        recent: recent_transactions(&snapshot.user.transactions, RECENT)
            .into_iter()
            .map(transaction_list_item)
            .collect(),
    }
}

pub fn handle(source: &dyn DataSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = source.fetch().context("Error fetching data")?;
    let view = home_view(&snapshot);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    if !view.user.is_empty() {
        println!("Hello, {}", view.user);
    }
    println!("Net worth: {}", fmt_usd(&view.balance));
    if view.budgets.is_empty() {
        println!("No budgets yet.");
    } else {
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Used", "Progress"],
                table_rows(&view.budgets)
            )
        );
    }
    let rows = view
        .recent
        .iter()
        .map(|t| {
            vec![
                t.category.clone(),
                t.name.clone(),
                t.amount_text.clone(),
                t.date_text.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Name", "Amount", "Date"], rows)
    );
    Ok(())
}
