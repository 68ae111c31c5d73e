// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart-ready shapes for the report and insights screens.
//!
//! Series follow the usual charting-library layout: one `labels` array and
//! any number of datasets whose `data` has the same length.

use crate::analytics::summary::Summary;
use crate::models::{
    BalancePoint, CategoryAnalysis, DayBucket, Prediction, Transaction, TransactionType,
};
use crate::utils::{capitalize, fmt_usd, to_f64};
use rust_decimal::Decimal;
use serde::Serialize;

/// Height of a full bar in the daily income/expense chart.
pub const BAR_HEIGHT: f64 = 150.0;
/// A non-zero bar is never drawn shorter than this.
pub const MIN_BAR_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    fn with_labels(labels: Vec<String>) -> Self {
        ChartSeries {
            labels,
            datasets: Vec::new(),
        }
    }

    fn dataset(mut self, label: &str, data: Vec<f64>) -> Self {
        self.datasets.push(Dataset {
            label: label.to_string(),
            data,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    pub day: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarHeights {
    pub day: String,
    pub income: f64,
    pub expense: f64,
}

pub fn daily_totals(days: &[DayBucket]) -> Vec<DayTotals> {
    days.iter()
        .map(|d| {
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;
            for tx in &d.transactions {
                match tx.kind {
                    TransactionType::Income => income = income.saturating_add(tx.amount),
                    TransactionType::Expense => expense = expense.saturating_add(tx.amount),
                    TransactionType::Other => {}
                }
            }
            DayTotals {
                day: d.day.clone(),
                income,
                expense,
            }
        })
        .collect()
}

/// Largest single-day income or expense; zero when there are no days.
pub fn max_value(totals: &[DayTotals]) -> Decimal {
    totals
        .iter()
        .map(|t| t.income.max(t.expense))
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

fn bar_height(value: Decimal, max: Decimal, full: f64) -> f64 {
    if value <= Decimal::ZERO || max <= Decimal::ZERO {
        return 0.0;
    }
    (to_f64(value / max) * full).max(MIN_BAR_HEIGHT.min(full))
}

/// Bar heights scaled so the busiest day reaches `full`.
pub fn bar_heights(totals: &[DayTotals], full: f64) -> Vec<BarHeights> {
    let max = max_value(totals);
    totals
        .iter()
        .map(|t| BarHeights {
            day: t.day.clone(),
            income: bar_height(t.income, max, full),
            expense: bar_height(t.expense, max, full),
        })
        .collect()
}

pub fn income_expense_series(totals: &[DayTotals]) -> ChartSeries {
    ChartSeries::with_labels(totals.iter().map(|t| t.day.clone()).collect())
        .dataset("Income", totals.iter().map(|t| to_f64(t.income)).collect())
        .dataset("Expense", totals.iter().map(|t| to_f64(t.expense)).collect())
}

/// Line series of the balance trend. Points carry no dates, so labels are
/// blank.
pub fn balance_trend_series(points: &[BalancePoint]) -> ChartSeries {
    ChartSeries::with_labels(vec![String::new(); points.len()])
        .dataset("Balance", points.iter().map(|p| to_f64(p.balance)).collect())
}

pub fn category_pie_series(summary: &Summary, kind: TransactionType) -> ChartSeries {
    let cats = summary.of_kind(kind);
    ChartSeries::with_labels(cats.iter().map(|c| c.name.clone()).collect()).dataset(
        &capitalize(kind.as_str()),
        cats.iter().map(|c| to_f64(c.total_amount)).collect(),
    )
}

/// Seven-day forecast, labelled by day of month.
pub fn prediction_series(predictions: &[Prediction]) -> ChartSeries {
    let labels = predictions
        .iter()
        .map(|p| p.date.split('-').nth(2).unwrap_or("").to_string())
        .collect();
    ChartSeries::with_labels(labels)
        .dataset(
            "Expenses",
            predictions
                .iter()
                .map(|p| to_f64(p.predicted_expenses))
                .collect(),
        )
        .dataset(
            "Income",
            predictions
                .iter()
                .map(|p| to_f64(p.predicted_income))
                .collect(),
        )
}

pub fn category_analysis_series(analysis: &[CategoryAnalysis]) -> ChartSeries {
    let expenses: Vec<&CategoryAnalysis> = analysis
        .iter()
        .filter(|c| c.kind == TransactionType::Expense)
        .collect();
    ChartSeries::with_labels(expenses.iter().map(|c| c.category.clone()).collect()).dataset(
        "Spent",
        expenses.iter().map(|c| to_f64(c.total_spent)).collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionListItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub type_label: String,
    pub amount_text: String,
    pub date_text: String,
}

pub fn transaction_list_item(tx: &Transaction) -> TransactionListItem {
    let (icon, color) = match &tx.category {
        Some(c) => (c.display_icon(), c.display_color()),
        None => (crate::models::DEFAULT_ICON, crate::models::DEFAULT_COLOR),
    };
    let sign = if tx.is_expense() { "-" } else { "+" };
    let date_text = match (tx.date, tx.time.trim()) {
        (Some(d), "") => d.to_string(),
        (Some(d), t) => format!("{} {}", d, t),
        (None, t) => t.to_string(),
    };
    TransactionListItem {
        id: tx.id.clone(),
        name: tx.name.clone(),
        category: tx.category_name().to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        type_label: capitalize(tx.kind.as_str()),
        amount_text: format!("{} {}", sign, fmt_usd(&tx.amount)),
        date_text,
    }
}

pub fn transaction_list_items(transactions: &[Transaction]) -> Vec<TransactionListItem> {
    transactions.iter().map(transaction_list_item).collect()
}

/// The last `n` transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    transactions.iter().rev().take(n).collect()
}
