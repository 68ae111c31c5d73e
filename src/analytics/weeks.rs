// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::week_key;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Bucket key for transactions without a usable date.
pub const UNDATED_KEY: &str = "undated";

#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    pub key: String,
    pub transactions: Vec<Transaction>,
}

/// Week buckets in the order their keys were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekBuckets {
    buckets: Vec<WeekBucket>,
    index: HashMap<String, usize>,
}

impl WeekBuckets {
    fn push(&mut self, key: String, tx: Transaction) {
        match self.index.get(&key) {
            Some(&i) => self.buckets[i].transactions.push(tx),
            None => {
                self.index.insert(key.clone(), self.buckets.len());
                self.buckets.push(WeekBucket {
                    key,
                    transactions: vec![tx],
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[Transaction]> {
        self.index
            .get(key)
            .map(|&i| self.buckets[i].transactions.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeekBucket> {
        self.buckets.iter()
    }

    pub fn into_vec(self) -> Vec<WeekBucket> {
        self.buckets
    }
}

impl Serialize for WeekBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for b in &self.buckets {
            map.serialize_entry(&b.key, &b.transactions)?;
        }
        map.end()
    }
}

/// Partition transactions into `<year>-W<week>` buckets.
///
/// Every input lands in exactly one bucket, keeping input order.
/// Undated entries go to [`UNDATED_KEY`].
pub fn group_by_week(transactions: &[Transaction]) -> WeekBuckets {
    let mut out = WeekBuckets::default();
    for tx in transactions {
        let key = match tx.date {
            Some(date) => week_key(date),
            None => {
                tracing::debug!(id = %tx.id, "transaction has no usable date");
                UNDATED_KEY.to_string()
            }
        };
        out.push(key, tx.clone());
    }
    out
}
