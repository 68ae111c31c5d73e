// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::{Value, json};
use spendwise::analytics::group_by_week;
use spendwise::analytics::weeks::UNDATED_KEY;
use spendwise::models::{Transaction, transactions_from_value};

fn setup(rows: Value) -> Vec<Transaction> {
    transactions_from_value(rows)
}

fn ids(txs: &[Transaction]) -> Vec<&str> {
    txs.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn example_week_keys() {
    let txs = setup(json!([
        {"_id": "a", "type": "income", "amount": 100, "date": "2024-01-03"},
        {"_id": "b", "type": "expense", "amount": 40, "date": "2024-01-03"},
        {"_id": "c", "type": "expense", "amount": 10, "date": "2024-01-10"}
    ]));
    let weeks = group_by_week(&txs);
    assert_eq!(weeks.keys().collect::<Vec<_>>(), vec!["2024-W1", "2024-W2"]);
    assert_eq!(ids(weeks.get("2024-W1").unwrap()), vec!["a", "b"]);
    assert_eq!(ids(weeks.get("2024-W2").unwrap()), vec!["c"]);
}

#[test]
fn buckets_keep_first_seen_order() {
    let txs = setup(json!([
        {"_id": "a", "type": "expense", "amount": 1, "date": "2024-01-10"},
        {"_id": "b", "type": "expense", "amount": 2, "date": "2024-01-02"},
        {"_id": "c", "type": "expense", "amount": 3, "date": "2024-01-11"}
    ]));
    let weeks = group_by_week(&txs);
    assert_eq!(weeks.keys().collect::<Vec<_>>(), vec!["2024-W2", "2024-W1"]);
    assert_eq!(ids(weeks.get("2024-W2").unwrap()), vec!["a", "c"]);
}

#[test]
fn year_boundary_is_not_corrected() {
    let txs = setup(json!([
        {"_id": "a", "type": "expense", "amount": 1, "date": "2024-12-31"},
        {"_id": "b", "type": "expense", "amount": 1, "date": "2025-01-01T09:30:00.000Z"},
        {"_id": "c", "type": "expense", "amount": 1, "date": "2023-01-01"}
    ]));
    let weeks = group_by_week(&txs);
    assert_eq!(
        weeks.keys().collect::<Vec<_>>(),
        vec!["2024-W53", "2025-W1", "2023-W1"]
    );
}

#[test]
fn partition_drops_nothing() {
    let txs = setup(json!([
        {"_id": "a", "type": "income", "amount": 5, "date": "2024-03-01"},
        {"_id": "b", "type": "expense", "amount": 5},
        {"_id": "c", "type": "expense", "amount": 5, "date": "2024-03-09"},
        {"_id": "d", "type": "expense", "amount": 5, "date": "garbage"},
        {"_id": "e", "type": "income", "amount": 5, "date": "2024-03-02"}
    ]));
    let weeks = group_by_week(&txs);
    let mut seen: Vec<&str> = weeks.iter().flat_map(|b| ids(&b.transactions)).collect();
    seen.sort();
    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(ids(weeks.get(UNDATED_KEY).unwrap()), vec!["b", "d"]);
}

#[test]
fn empty_and_non_array_inputs() {
    assert!(group_by_week(&[]).is_empty());
    assert!(group_by_week(&setup(Value::Null)).is_empty());
    assert!(group_by_week(&setup(json!({"transactions": []}))).is_empty());
}

#[test]
fn grouping_is_idempotent() {
    let txs = setup(json!([
        {"_id": "a", "type": "income", "amount": 5, "date": "2024-03-01"},
        {"_id": "b", "type": "expense", "amount": 7, "date": "2024-05-20"}
    ]));
    assert_eq!(group_by_week(&txs), group_by_week(&txs));
}

#[test]
fn serializes_as_ordered_object() {
    let txs = setup(json!([
        {"_id": "a", "type": "income", "amount": 5, "date": "2024-01-10"},
        {"_id": "b", "type": "expense", "amount": 7, "date": "2024-01-01"}
    ]));
    let s = serde_json::to_string(&group_by_week(&txs)).unwrap();
    let w2 = s.find("2024-W2").unwrap();
    let w1 = s.find("2024-W1").unwrap();
    assert!(w2 < w1);
}
