// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Per category id and type, first-seen order.
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    pub fn net(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }

    /// First entry for `id`. A category used with more than one type has
    /// one entry per type; see [`Summary::category_of`].
    pub fn category(&self, id: &str) -> Option<&CategoryTotal> {
        self.by_category.iter().find(|c| c.id == id)
    }

    pub fn category_of(&self, id: &str, kind: TransactionType) -> Option<&CategoryTotal> {
        self.by_category
            .iter()
            .find(|c| c.id == id && c.kind == kind)
    }

    pub fn of_kind(&self, kind: TransactionType) -> Vec<&CategoryTotal> {
        self.by_category.iter().filter(|c| c.kind == kind).collect()
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    let mut index: HashMap<(&str, TransactionType), usize> = HashMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => {
                summary.total_income = summary.total_income.saturating_add(tx.amount)
            }
            TransactionType::Expense => {
                summary.total_expense = summary.total_expense.saturating_add(tx.amount)
            }
            TransactionType::Other => {}
        }

        let id = tx.category_id();
        match index.get(&(id, tx.kind)) {
            Some(&i) => {
                let entry = &mut summary.by_category[i];
                entry.total_amount = entry.total_amount.saturating_add(tx.amount);
            }
            None => {
                index.insert((id, tx.kind), summary.by_category.len());
                summary.by_category.push(CategoryTotal {
                    id: id.to_string(),
                    name: tx.category_name().to_string(),
                    kind: tx.kind,
                    total_amount: tx.amount,
                });
            }
        }
    }
    summary
}

/// Balance after each transaction, starting from `opening`.
pub fn running_balance(opening: Decimal, transactions: &[Transaction]) -> Vec<Decimal> {
    transactions
        .iter()
        .scan(opening, |bal, tx| {
            match tx.kind {
                TransactionType::Income => *bal = bal.saturating_add(tx.amount),
                TransactionType::Expense => *bal = bal.saturating_sub(tx.amount),
                TransactionType::Other => {}
            }
            Some(*bal)
        })
        .collect()
}
