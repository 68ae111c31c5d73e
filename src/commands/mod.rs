// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod home;
pub mod insights;
pub mod reports;
pub mod settings;
pub mod transactions;
pub mod wallet;
pub mod weeks;

use anyhow::{Context, Result};

/// A required clap argument as a trimmed string.
pub(crate) fn arg_str<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing --{}", name))
}

pub(crate) fn opt_str<'a>(m: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub(crate) fn json_flags(m: &clap::ArgMatches) -> (bool, bool) {
    (m.get_flag("json"), m.get_flag("jsonl"))
}
