// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where snapshots come from. The presentation layer decides when to call
//! [`DataSource::fetch`]; the analytics only ever see the result.

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    BudgetRequest, Category, Insights, InsightsEnvelope, NewTransaction, ReportSnapshot,
    Transaction, UserSnapshot, WalletRequest, lenient_list,
};
use crate::utils::http_client;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Everything the screens render, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub user: UserSnapshot,
    pub transactions: Vec<Transaction>,
    pub report: ReportSnapshot,
}

pub trait DataSource {
    fn fetch(&self) -> Result<Snapshot, ApiError>;
}

/// Serves a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Snapshot,
}

impl StaticSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Build from raw `GET /user`, `GET /transaction/{id}`, and
    /// `GET /user/{id}` bodies.
    pub fn from_json(user: Value, transactions: Value, report: Value) -> Result<Self, ApiError> {
        Ok(Self::new(Snapshot {
            user: object_or_default(user)?,
            transactions: lenient_list(transactions),
            report: object_or_default(report)?,
        }))
    }
}

impl DataSource for StaticSource {
    fn fetch(&self) -> Result<Snapshot, ApiError> {
        Ok(self.snapshot.clone())
    }
}

fn object_or_default<T: DeserializeOwned + Default>(value: Value) -> Result<T, ApiError> {
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(T::default()),
    }
}

pub struct HttpSource {
    client: Client,
    base: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            base: config.base_url().to_string(),
            token: config.token.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::MissingToken);
        }
        Ok(())
    }

    fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self.authed(self.client.get(&url)).send()?;
        let resp = check_status(resp, &url)?;
        let body = resp.text()?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn send_json<B: Serialize>(
        &self,
        req: RequestBuilder,
        url: &str,
        body: &B,
        expect: StatusCode,
    ) -> Result<(), ApiError> {
        let resp = self.authed(req).json(body).send()?;
        let status = resp.status();
        if status != expect {
            tracing::warn!(%url, status = status.as_u16(), expected = expect.as_u16(), "write rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    pub fn fetch_user(&self) -> Result<UserSnapshot, ApiError> {
        self.require_token()?;
        object_or_default(self.get_value("/user")?)
    }

    pub fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, ApiError> {
        Ok(lenient_list(self.get_value(&format!("/transaction/{}", user_id))?))
    }

    pub fn fetch_report(&self, user_id: &str) -> Result<ReportSnapshot, ApiError> {
        object_or_default(self.get_value(&format!("/user/{}", user_id))?)
    }

    pub fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(lenient_list(self.get_value("/categories")?))
    }

    pub fn fetch_insights(&self, user_id: &str) -> Result<Insights, ApiError> {
        let envelope: InsightsEnvelope =
            object_or_default(self.get_value(&format!("/user/ai/{}", user_id))?)?;
        unwrap_insights(envelope)
    }

    pub fn submit_transaction(&self, tx: &NewTransaction) -> Result<(), ApiError> {
        self.require_token()?;
        let url = self.url("/transaction");
        tracing::debug!(%url, "POST");
        self.send_json(self.client.post(&url), &url, tx, StatusCode::CREATED)
    }

    pub fn save_budget_line(&self, user_id: &str, req: &BudgetRequest) -> Result<(), ApiError> {
        self.require_token()?;
        let url = self.url(&format!("/budjet/{}", user_id));
        tracing::debug!(%url, "PUT");
        self.send_json(self.client.put(&url), &url, req, StatusCode::CREATED)
    }

    pub fn set_wallet_balance(&self, user_id: &str, req: &WalletRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/wallet/{}", user_id));
        tracing::debug!(%url, "PUT");
        self.send_json(self.client.put(&url), &url, req, StatusCode::OK)
    }

    /// The signed-in user's id, from `GET /user`.
    pub fn user_id(&self) -> Result<String, ApiError> {
        let user = self.fetch_user()?;
        user.user_id()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Backend("user payload has no id".into()))
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Snapshot, ApiError> {
        let user = self.fetch_user()?;
        let id = user
            .user_id()
            .ok_or_else(|| ApiError::Backend("user payload has no id".into()))?
            .to_string();
        let transactions = self.fetch_transactions(&id)?;
        let report = self.fetch_report(&id)?;
        Ok(Snapshot {
            user,
            transactions,
            report,
        })
    }
}

fn check_status(
    resp: reqwest::blocking::Response,
    url: &str,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "request failed");
        return Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp)
}

pub fn unwrap_insights(envelope: InsightsEnvelope) -> Result<Insights, ApiError> {
    if !envelope.success {
        let msg = if envelope.error.trim().is_empty() {
            "Failed to fetch data".to_string()
        } else {
            envelope.error
        };
        return Err(ApiError::Backend(msg));
    }
    Ok(envelope.data.unwrap_or_default())
}
