// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg_str;
use crate::models::WalletRequest;
use crate::source::HttpSource;
use crate::utils::{fmt_usd, parse_decimal};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;

pub fn handle(source: &HttpSource, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        set(source, sub)?;
    }
    Ok(())
}

pub fn parse_balance(s: &str) -> Result<Decimal> {
    let balance = parse_decimal(s).context("Enter a valid balance")?;
    if balance.is_sign_negative() && !balance.is_zero() {
        bail!("Enter a valid balance: {} is negative", balance);
    }
    Ok(balance)
}

fn set(source: &HttpSource, sub: &clap::ArgMatches) -> Result<()> {
    let balance = parse_balance(arg_str(sub, "balance")?)?;
    let user_id = source.user_id()?;
    source
        .set_wallet_balance(&user_id, &WalletRequest { balance })
        .context("Failed to update wallet")?;
    println!("Wallet balance set to {}", fmt_usd(&balance));
    Ok(())
}
