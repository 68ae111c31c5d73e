// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, config_path};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(cfg: &Config) -> Result<()> {
    let path = config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unavailable)".into());
    let rows = vec![
        vec!["api_url".into(), cfg.base_url().to_string()],
        vec!["token".into(), cfg.masked_token()],
        vec!["timeout_secs".into(), cfg.timeout_secs.to_string()],
        vec!["config_file".into(), path],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
