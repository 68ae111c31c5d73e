// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::json_flags;
use crate::models::TransactionType;
use crate::source::HttpSource;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(source: &HttpSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let kind = sub
        .get_one::<String>("type")
        .map(|s| TransactionType::parse(s));
    let mut data = source
        .fetch_categories()
        .context("Failed to fetch categories")?;
    if let Some(k) = kind {
        data.retain(|c| c.kind == k);
    }
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No categories found");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|c| vec![c.name, c.kind.to_string(), c.icon, c.color, c.id])
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Type", "Icon", "Color", "Id"], rows)
    );
    Ok(())
}
