// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivations over fetched snapshots. Nothing in here performs I/O or
//! keeps state between calls.

pub mod budget;
pub mod charts;
pub mod summary;
pub mod wallet;
pub mod weeks;

pub use budget::{BudgetRow, Progress, budget_lines_progress, budget_status, progress};
pub use charts::{ChartSeries, DayTotals, daily_totals, max_value};
pub use summary::{CategoryTotal, Summary, running_balance, summarize};
pub use weeks::{WeekBuckets, group_by_week};
