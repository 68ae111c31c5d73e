// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use spendwise::commands::budgets::budget_rows;
use spendwise::commands::home::home_view;
use spendwise::commands::insights::insights_view;
use spendwise::commands::reports::{report_view, summary_view};
use spendwise::config::Config;
use spendwise::error::ApiError;
use spendwise::models::{InsightsEnvelope, TransactionType};
use spendwise::source::{DataSource, HttpSource, StaticSource, unwrap_insights};

fn user_json() -> Value {
    json!({
        "user": {"_id": "u1", "name": "Ana", "email": "ana@example.com"},
        "wallet": [{"_id": "w1", "name": "Main", "balance": "1000"}],
        "budjet": [{"_id": "b1", "categories": [
            {"name": "Dining", "limit": 200, "spent": 170,
             "category": {"_id": "food", "name": "Food"}},
            {"name": "Travel", "limit": 500, "spent": 0,
             "category": {"_id": "trip", "name": "Travel"}},
            {"name": "Rent", "limit": 900, "spent": 900}
        ]}],
        "transaction": [
            {"_id": "1", "type": "expense", "name": "a", "amount": 1},
            {"_id": "2", "type": "expense", "name": "b", "amount": 2},
            {"_id": "3", "type": "expense", "name": "c", "amount": 3},
            {"_id": "4", "type": "expense", "name": "d", "amount": 4},
            {"_id": "5", "type": "expense", "name": "e", "amount": 5},
            {"_id": "6", "type": "income", "name": "f", "amount": 6}
        ]
    })
}

fn tx_json() -> Value {
    json!([
        {"_id": "t1", "type": "income", "amount": 100, "date": "2024-01-03",
         "category": {"_id": "sal", "name": "Salary"}},
        {"_id": "t2", "type": "expense", "amount": 40, "date": "2024-01-03",
         "category": {"_id": "food", "name": "Food"}},
        {"_id": "t3", "type": "expense", "amount": 10, "date": "2024-01-10",
         "category": {"_id": "food", "name": "Food"}}
    ])
}

fn setup() -> StaticSource {
    StaticSource::from_json(user_json(), tx_json(), json!({"weeklyData": [], "balanceTrend": []}))
        .unwrap()
}

#[test]
fn home_shows_balance_top_budgets_and_recent() {
    let snap = setup().fetch().unwrap();
    let view = home_view(&snap);
    assert_eq!(view.user, "Ana");
    assert_eq!(view.balance, Decimal::from(1000));
    assert_eq!(view.budgets.len(), 2);
    assert!(view.budgets[0].alert);
    assert_eq!(view.recent.len(), 5);
    assert_eq!(view.recent[0].id, "6");
    assert_eq!(view.recent[4].id, "2");
}

#[test]
fn partial_user_payload_is_empty_not_an_error() {
    let src = StaticSource::from_json(
        json!({"user": {"_id": "u1"}, "budjet": null, "wallet": "oops"}),
        Value::Null,
        Value::Null,
    )
    .unwrap();
    let snap = src.fetch().unwrap();
    assert!(snap.user.budget_lines().is_empty());
    assert!(snap.transactions.is_empty());
    let view = home_view(&snap);
    assert_eq!(view.balance, Decimal::ZERO);
    assert!(view.budgets.is_empty());
    assert!(budget_rows(&snap, true).is_empty());
}

#[test]
fn report_falls_back_to_computed_totals() {
    let snap = setup().fetch().unwrap();
    let view = report_view(&snap);
    assert_eq!(view.total_income, Decimal::from(100));
    assert_eq!(view.total_expense, Decimal::from(50));
    assert!(view.days.is_empty());

    let src = StaticSource::from_json(
        user_json(),
        tx_json(),
        json!({"summary": {"totalIncome": 7, "totalExpense": "3.5"}}),
    )
    .unwrap();
    let view = report_view(&src.fetch().unwrap());
    assert_eq!(view.total_income, Decimal::from(7));
    assert_eq!(view.total_expense, Decimal::new(35, 1));
}

#[test]
fn summary_view_filters_by_type() {
    let snap = setup().fetch().unwrap();
    let view = summary_view(&snap, Some(TransactionType::Expense));
    assert_eq!(view.net, Decimal::from(50));
    assert_eq!(view.summary.by_category.len(), 1);
    assert_eq!(view.pie.labels, vec!["Food"]);

    let all = summary_view(&snap, None);
    assert_eq!(all.summary.by_category.len(), 2);
}

#[test]
fn budget_rows_recompute_from_transactions() {
    let snap = setup().fetch().unwrap();
    let server = budget_rows(&snap, false);
    assert_eq!(server[0].spent, Decimal::from(170));
    let local = budget_rows(&snap, true);
    assert_eq!(local[0].spent, Decimal::from(50));
    assert_eq!(local[0].percent, Decimal::from(25));
    assert!(!local[0].alert);
}

#[test]
fn wallet_projection() {
    let mut snap = setup().fetch().unwrap();
    let after = snap
        .user
        .apply_to_primary_wallet(TransactionType::Expense, Decimal::from(40));
    assert_eq!(after, Some(Decimal::from(960)));
    let after = snap
        .user
        .apply_to_primary_wallet(TransactionType::Income, Decimal::from(100));
    assert_eq!(after, Some(Decimal::from(1060)));
    snap.user.wallets.clear();
    assert_eq!(
        snap.user
            .apply_to_primary_wallet(TransactionType::Income, Decimal::ONE),
        None
    );
}

#[test]
fn insights_envelope_failure_surfaces_message() {
    let env: InsightsEnvelope =
        serde_json::from_value(json!({"success": false, "error": "model offline"})).unwrap();
    match unwrap_insights(env) {
        Err(ApiError::Backend(msg)) => assert_eq!(msg, "model offline"),
        other => panic!("unexpected {:?}", other),
    }
    let env: InsightsEnvelope = serde_json::from_value(json!({"success": false})).unwrap();
    let err = unwrap_insights(env).unwrap_err();
    assert_eq!(err.to_string(), "backend reported an error: Failed to fetch data");
}

#[test]
fn insights_view_from_payload() {
    let env: InsightsEnvelope = serde_json::from_value(json!({
        "success": true,
        "data": {
            "predictions": [{"date": "2024-03-05", "predictedExpenses": 20, "predictedIncome": 0}],
            "historicalData": {
                "categoryAnalysis": [{"category": "Food", "type": "expense", "totalSpent": 120}],
                "budgetStatus": [{"category": "Food", "limit": 100, "spent": 90}]
            },
            "aiInsights": {
                "confidenceScore": 0.87,
                "aiPredictions": {
                    "spendingPatterns": [{"category": "Food", "description": "Weekend spikes"}],
                    "budgetRecommendations": [{"category": "Food", "recommendation": "Cap at 80"}]
                }
            },
            "insights": {"income": [{"opportunity": "Freelance", "potentialIncrease": 250}]}
        }
    }))
    .unwrap();
    let view = insights_view(&unwrap_insights(env).unwrap());
    assert_eq!(view.confidence, 87);
    assert_eq!(view.predictions.labels, vec!["05"]);
    assert_eq!(view.category_analysis.labels, vec!["Food"]);
    assert_eq!(view.spending_patterns[0].1, "Weekend spikes");
    assert_eq!(view.recommendations[0].1, "Cap at 80");
    assert_eq!(view.income_opportunities[0].1, Decimal::from(250));
    assert_eq!(view.budget_status[0].percent, Decimal::from(90));
    assert!(view.budget_status[0].alert);
}

#[test]
fn http_source_builds_urls_and_needs_token() {
    let cfg = Config::default().with_overrides(Some("http://api.test/"), None);
    let src = HttpSource::new(&cfg).unwrap();
    assert_eq!(src.url("/user"), "http://api.test/user");
    assert_eq!(src.url("transaction/u1"), "http://api.test/transaction/u1");
    assert!(matches!(src.fetch_user(), Err(ApiError::MissingToken)));
    assert!(matches!(src.fetch(), Err(ApiError::MissingToken)));
}
