// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Layered settings: defaults, then `config.json` in the platform config
//! dir, then `SPENDWISE_*` environment variables, then CLI flags.

use crate::error::ApiError;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.spendwise", "Spendwise", "spendwise"));

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "SPENDWISE_API_URL";
pub const ENV_TOKEN: &str = "SPENDWISE_TOKEN";
pub const ENV_TIMEOUT: &str = "SPENDWISE_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Defaults overlaid with the config file (when present) and environment.
    pub fn load() -> Result<Self, ApiError> {
        let mut cfg = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("read {}: {}", path.display(), e)))?;
        let cfg: Config = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(t) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = t
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{} must be whole seconds, got '{}'", ENV_TIMEOUT, t)))?;
        }
        Ok(())
    }

    pub fn with_overrides(mut self, api_url: Option<&str>, token: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.trim().to_string();
        }
        if let Some(t) = token {
            self.token = Some(t.trim().to_string());
        }
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn masked_token(&self) -> String {
        match &self.token {
            Some(t) if t.chars().count() > 4 => {
                let tail: String = t.chars().skip(t.chars().count() - 4).collect();
                format!("****{}", tail)
            }
            Some(_) => "****".into(),
            None => "(none)".into(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_API_URL, "https://api.example.com/"), (ENV_TOKEN, " abc123 ")]);
        let mut cfg = Config::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.base_url(), "https://api.example.com");
        assert_eq!(cfg.token.as_deref(), Some("abc123"));
        assert_eq!(cfg.masked_token(), "****c123");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env(|k| (k == ENV_TIMEOUT).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT));
    }
}
