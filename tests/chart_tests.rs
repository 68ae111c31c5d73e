// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::json;
use spendwise::analytics::charts::{
    BAR_HEIGHT, balance_trend_series, bar_heights, category_analysis_series, category_pie_series,
    income_expense_series, prediction_series, recent_transactions, transaction_list_items,
};
use spendwise::analytics::{daily_totals, max_value, summarize};
use spendwise::models::{
    CategoryAnalysis, DayBucket, Prediction, ReportSnapshot, TransactionType,
    transactions_from_value,
};

fn setup() -> ReportSnapshot {
    serde_json::from_value(json!({
        "weeklyData": [
            {"day": "Mon", "transactions": [
                {"_id": "1", "type": "income", "amount": 100},
                {"_id": "2", "type": "expense", "amount": 50}
            ]},
            {"day": "Tue", "transactions": [
                {"_id": "3", "type": "expense", "amount": 15},
                {"_id": "4", "type": "expense", "amount": 10}
            ]},
            {"day": "Wed", "transactions": null}
        ],
        "balanceTrend": [{"balance": 1000}, {"balance": "950.5"}, {}]
    }))
    .unwrap()
}

#[test]
fn daily_totals_and_max() {
    let report = setup();
    let days = daily_totals(&report.weekly_data);
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].income, Decimal::from(100));
    assert_eq!(days[1].expense, Decimal::from(25));
    assert_eq!(days[2].income, Decimal::ZERO);
    assert_eq!(max_value(&days), Decimal::from(100));
}

#[test]
fn bars_scale_to_busiest_day() {
    let days = daily_totals(&setup().weekly_data);
    let bars = bar_heights(&days, BAR_HEIGHT);
    assert_eq!(bars[0].income, 150.0);
    assert_eq!(bars[0].expense, 75.0);
    assert_eq!(bars[1].expense, 37.5);
    assert_eq!(bars[1].income, 0.0);
    assert_eq!(bars[2].expense, 0.0);
}

#[test]
fn small_bars_get_minimum_height() {
    let days = daily_totals(&[DayBucket {
        day: "Sun".into(),
        transactions: transactions_from_value(json!([
            {"_id": "a", "type": "income", "amount": 1000},
            {"_id": "b", "type": "expense", "amount": 1}
        ])),
    }]);
    let bars = bar_heights(&days, BAR_HEIGHT);
    assert_eq!(bars[0].income, 150.0);
    assert_eq!(bars[0].expense, 20.0);
}

#[test]
fn all_zero_week_has_zero_bars() {
    let days = daily_totals(&[
        DayBucket {
            day: "Mon".into(),
            transactions: vec![],
        },
        DayBucket {
            day: "Tue".into(),
            transactions: vec![],
        },
    ]);
    assert_eq!(max_value(&days), Decimal::ZERO);
    for b in bar_heights(&days, BAR_HEIGHT) {
        assert_eq!(b.income, 0.0);
        assert_eq!(b.expense, 0.0);
    }
    assert_eq!(max_value(&[]), Decimal::ZERO);
}

#[test]
fn series_lengths_line_up() {
    let report = setup();
    let days = daily_totals(&report.weekly_data);
    let s = income_expense_series(&days);
    assert_eq!(s.labels, vec!["Mon", "Tue", "Wed"]);
    assert_eq!(s.datasets.len(), 2);
    assert!(s.datasets.iter().all(|d| d.data.len() == 3));

    let trend = balance_trend_series(&report.balance_trend);
    assert_eq!(trend.labels.len(), 3);
    assert_eq!(trend.datasets[0].data, vec![1000.0, 950.5, 0.0]);
}

#[test]
fn pie_uses_one_kind() {
    let txs = transactions_from_value(json!([
        {"_id": "1", "type": "income", "amount": 10, "category": {"_id": "s", "name": "Salary"}},
        {"_id": "2", "type": "expense", "amount": 4, "category": {"_id": "f", "name": "Food"}},
        {"_id": "3", "type": "expense", "amount": 6, "category": {"_id": "r", "name": "Rent"}}
    ]));
    let pie = category_pie_series(&summarize(&txs), TransactionType::Expense);
    assert_eq!(pie.labels, vec!["Food", "Rent"]);
    assert_eq!(pie.datasets[0].label, "Expense");
    assert_eq!(pie.datasets[0].data, vec![4.0, 6.0]);
}

#[test]
fn prediction_labels_are_day_of_month() {
    let preds: Vec<Prediction> = serde_json::from_value(json!([
        {"date": "2024-03-05", "predictedExpenses": 12.5, "predictedIncome": 0},
        {"date": "2024-03-06", "predictedExpenses": "8", "predictedIncome": 100}
    ]))
    .unwrap();
    let s = prediction_series(&preds);
    assert_eq!(s.labels, vec!["05", "06"]);
    assert_eq!(s.datasets[0].label, "Expenses");
    assert_eq!(s.datasets[0].data, vec![12.5, 8.0]);
    assert_eq!(s.datasets[1].data, vec![0.0, 100.0]);
}

#[test]
fn category_analysis_keeps_expenses() {
    let rows: Vec<CategoryAnalysis> = serde_json::from_value(json!([
        {"category": "Food", "type": "expense", "totalSpent": 120},
        {"category": "Salary", "type": "income", "totalSpent": 3000}
    ]))
    .unwrap();
    let s = category_analysis_series(&rows);
    assert_eq!(s.labels, vec!["Food"]);
    assert_eq!(s.datasets[0].label, "Spent");
}

#[test]
fn list_items_fill_in_defaults() {
    let txs = transactions_from_value(json!([
        {"_id": "1", "type": "expense", "name": "Lunch", "amount": 40,
         "date": "2024-01-03", "time": "12:30"},
        {"_id": "2", "type": "income", "name": "Pay", "amount": 1234.5,
         "category": {"_id": "s", "name": "Salary", "icon": "work", "color": "#0f0"}}
    ]));
    let items = transaction_list_items(&txs);
    assert_eq!(items[0].category, "Unknown Category");
    assert_eq!(items[0].icon, "attach-money");
    assert_eq!(items[0].color, "#fff");
    assert_eq!(items[0].amount_text, "- $40.00");
    assert_eq!(items[0].type_label, "Expense");
    assert_eq!(items[0].date_text, "2024-01-03 12:30");
    assert_eq!(items[1].icon, "work");
    assert_eq!(items[1].amount_text, "+ $1,234.50");
    assert_eq!(items[1].date_text, "");
}

#[test]
fn recent_is_newest_first() {
    let txs = transactions_from_value(json!([
        {"_id": "1", "type": "expense", "amount": 1},
        {"_id": "2", "type": "expense", "amount": 2},
        {"_id": "3", "type": "expense", "amount": 3}
    ]));
    let ids: Vec<&str> = recent_transactions(&txs, 2)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "2"]);
    assert!(recent_transactions(&[], 5).is_empty());
}

#[test]
fn huge_daily_totals_saturate() {
    let days = daily_totals(&[DayBucket {
        day: "Fri".into(),
        transactions: transactions_from_value(json!([
            {"_id": "a", "type": "income", "amount": "70000000000000000000000000000"},
            {"_id": "b", "type": "income", "amount": "70000000000000000000000000000"}
        ])),
    }]);
    assert_eq!(days[0].income, Decimal::MAX);
    assert_eq!(bar_heights(&days, BAR_HEIGHT)[0].income, 150.0);
}
