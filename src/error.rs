// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures talking to the finance backend or loading its settings.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("backend reported an error: {0}")]
    Backend(String),
    #[error("no API token configured; set SPENDWISE_TOKEN or pass --token")]
    MissingToken,
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
}
