// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetLine, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Negative when over budget.
    pub remaining: Decimal,
    /// Unclamped; 120 means 20 % over.
    pub percent: Decimal,
}

impl Progress {
    /// Percent clamped to 0..=100 for drawing a bar.
    pub fn bar_width(&self) -> Decimal {
        self.percent.clamp(Decimal::ZERO, HUNDRED)
    }
}

/// Percent saturates at `Decimal::MAX` when `spent / limit * 100` does not
/// fit, e.g. a limit of a few ten-billionths.
pub fn progress(limit: Decimal, spent: Decimal) -> Progress {
    let percent = if limit > Decimal::ZERO {
        spent
            .checked_div(limit)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    Progress {
        remaining: limit.saturating_sub(spent),
        percent,
    }
}

/// More than 80 % of the limit is gone.
pub fn over_threshold(limit: Decimal, spent: Decimal) -> bool {
    spent > limit * Decimal::new(8, 1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent: Decimal,
    pub alert: bool,
}

impl BudgetRow {
    fn from_line(line: &BudgetLine, spent: Decimal) -> Self {
        let p = progress(line.limit, spent);
        let (icon, color) = match &line.category {
            Some(c) => (c.display_icon().to_string(), c.display_color().to_string()),
            None => (
                crate::models::DEFAULT_ICON.to_string(),
                crate::models::DEFAULT_COLOR.to_string(),
            ),
        };
        BudgetRow {
            category_id: line.category_id().to_string(),
            name: line.label().to_string(),
            icon,
            color,
            limit: line.limit,
            spent,
            remaining: p.remaining,
            percent: p.percent,
            alert: over_threshold(line.limit, spent),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            remaining: self.remaining,
            percent: self.percent,
        }
    }
}

/// One row per budget line, using the server-computed `spent`.
pub fn budget_lines_progress(budget: &Budget) -> Vec<BudgetRow> {
    budget
        .categories
        .iter()
        .map(|line| BudgetRow::from_line(line, line.spent))
        .collect()
}

/// Like [`budget_lines_progress`] but with `spent` summed from expense
/// transactions matched on category id. Lines without a category id spend
/// nothing.
pub fn budget_status(transactions: &[Transaction], budget: &Budget) -> Vec<BudgetRow> {
    let mut spent: HashMap<&str, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let id = tx.category_id();
        if id.is_empty() {
            continue;
        }
        let total = spent.entry(id).or_insert(Decimal::ZERO);
        *total = total.saturating_add(tx.amount);
    }
    budget
        .categories
        .iter()
        .map(|line| {
            let s = spent
                .get(line.category_id())
                .copied()
                .unwrap_or(Decimal::ZERO);
            BudgetRow::from_line(line, s)
        })
        .collect()
}
