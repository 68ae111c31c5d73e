// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg_str;
use crate::utils::{parse_date, pretty_table, week_key};
use anyhow::Result;
use chrono::{Duration, NaiveDate};

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(arg_str(sub, "date")?)?;
    let count = sub.get_one::<u32>("count").copied().unwrap_or(0);
    println!("{}", pretty_table(&["Date", "Day", "Week"], week_rows(start, count)));
    Ok(())
}

pub fn week_rows(start: NaiveDate, following: u32) -> Vec<Vec<String>> {
    (0..=following as i64)
        .filter_map(|i| start.checked_add_signed(Duration::days(i)))
        .map(|d| vec![d.to_string(), d.format("%a").to_string(), week_key(d)])
        .collect()
}
