// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::json_flags;
use crate::analytics::charts::{
    BAR_HEIGHT, BarHeights, balance_trend_series, bar_heights, category_pie_series,
    income_expense_series,
};
use crate::analytics::{ChartSeries, DayTotals, Summary, daily_totals, summarize};
use crate::models::TransactionType;
use crate::source::{DataSource, Snapshot};
use crate::utils::{fmt_usd, maybe_print_json, pretty_table, to_f64};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn report(source: &dyn DataSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = source.fetch().context("Error fetching transaction data")?;
    let view = report_view(&snapshot);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    if view.days.is_empty() && view.balance_trend.labels.is_empty() {
        println!("No report data yet");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Net"],
            vec![vec![
                fmt_usd(&view.total_income),
                fmt_usd(&view.total_expense),
                fmt_usd(&view.total_income.saturating_sub(view.total_expense)),
            ]]
        )
    );
    let rows = view
        .days
        .iter()
        .zip(&view.bars)
        .map(|(d, b)| {
            vec![
                d.day.clone(),
                fmt_usd(&d.income),
                bar_text(b.income),
                fmt_usd(&d.expense),
                bar_text(b.expense),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Day", "Income", "", "Expense", ""], rows)
    );
    if let Some(points) = view.balance_trend.datasets.first() {
        let rows = points
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| vec![(i + 1).to_string(), format!("{:.2}", v)])
            .collect();
        println!("{}", pretty_table(&["#", "Balance"], rows));
    }
    Ok(())
}

fn bar_text(height: f64) -> String {
    "█".repeat((height / 10.0).round() as usize)
}

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub days: Vec<DayTotals>,
    pub bars: Vec<BarHeights>,
    pub income_expense: ChartSeries,
    pub balance_trend: ChartSeries,
}

/// Server totals when the report carries them, otherwise computed from the
/// fetched transactions.
pub fn report_view(snapshot: &Snapshot) -> ReportView {
    let (total_income, total_expense) = match &snapshot.report.summary {
        Some(t) => (t.total_income, t.total_expense),
        None => {
            let s = summarize(&snapshot.transactions);
            (s.total_income, s.total_expense)
        }
    };
    let days = daily_totals(&snapshot.report.weekly_data);
    ReportView {
        total_income,
        total_expense,
        bars: bar_heights(&days, BAR_HEIGHT),
        income_expense: income_expense_series(&days),
        balance_trend: balance_trend_series(&snapshot.report.balance_trend),
        days,
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    #[serde(flatten)]
    pub summary: Summary,
    pub net: Decimal,
    pub pie: ChartSeries,
}

pub fn summary_view(snapshot: &Snapshot, kind: Option<TransactionType>) -> SummaryView {
    let mut summary = summarize(&snapshot.transactions);
    let pie = category_pie_series(&summary, kind.unwrap_or(TransactionType::Expense));
    if let Some(k) = kind {
        summary.by_category.retain(|c| c.kind == k);
    }
    SummaryView {
        net: summary.net(),
        summary,
        pie,
    }
}

pub fn summary(source: &dyn DataSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let kind = sub
        .get_one::<String>("type")
        .map(|s| TransactionType::parse(s));
    let snapshot = source.fetch().context("Failed to fetch transactions")?;
    let view = summary_view(&snapshot, kind);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Net"],
            vec![vec![
                fmt_usd(&view.summary.total_income),
                fmt_usd(&view.summary.total_expense),
                fmt_usd(&view.net),
            ]]
        )
    );
    let total: Decimal = view
        .summary
        .by_category
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.total_amount));
    let mut cats: Vec<_> = view.summary.by_category.iter().collect();
    cats.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    let rows = cats
        .into_iter()
        .map(|c| {
            let share = if total > Decimal::ZERO {
                c.total_amount
                    .checked_div(total)
                    .map(|r| to_f64(r) * 100.0)
                    .unwrap_or(0.0)
            } else {
                0.0
            };
            vec![
                c.name.clone(),
                c.kind.to_string(),
                fmt_usd(&c.total_amount),
                format!("{:.1}%", share),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Type", "Total", "Share"], rows)
    );
    Ok(())
}
