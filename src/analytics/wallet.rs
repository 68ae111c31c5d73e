// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Optimistic wallet updates. The server balance replaces these on the next
//! full fetch.

use crate::models::{TransactionType, UserSnapshot, Wallet};
use rust_decimal::Decimal;

impl Wallet {
    pub fn apply(&mut self, kind: TransactionType, amount: Decimal) {
        match kind {
            TransactionType::Income => self.balance = self.balance.saturating_add(amount),
            TransactionType::Expense => self.balance = self.balance.saturating_sub(amount),
            TransactionType::Other => {}
        }
    }
}

impl UserSnapshot {
    /// Apply a just-submitted transaction to the first wallet and return its
    /// projected balance. `None` when the user has no wallet.
    pub fn apply_to_primary_wallet(
        &mut self,
        kind: TransactionType,
        amount: Decimal,
    ) -> Option<Decimal> {
        let wallet = self.wallets.first_mut()?;
        wallet.apply(kind, amount);
        Some(wallet.balance)
    }
}
