// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire types for the finance backend.
//!
//! The backend's JSON is loosely shaped: nested objects go missing, arrays
//! arrive as `null`, amounts show up as numbers or strings. Every field here
//! deserialises leniently so the analytics never see a decode failure for a
//! partially-populated payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
pub const DEFAULT_ICON: &str = "attach-money";
pub const DEFAULT_COLOR: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    #[default]
    Other,
}

impl TransactionType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => TransactionType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Other => "other",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::String(s)) => TransactionType::parse(&s),
            _ => TransactionType::Other,
        })
    }
}

/// Category as embedded in a transaction or budget line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
}

impl CategoryRef {
    pub fn display_name(&self) -> &str {
        non_empty_or(&self.name, UNKNOWN_CATEGORY)
    }

    pub fn display_icon(&self) -> &str {
        non_empty_or(&self.icon, DEFAULT_ICON)
    }

    pub fn display_color(&self) -> &str {
        non_empty_or(&self.color, DEFAULT_COLOR)
    }
}

/// Reference category from `GET /categories`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Always a magnitude; direction lives in `kind`.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
}

impl Transaction {
    pub fn category_id(&self) -> &str {
        self.category.as_ref().map(|c| c.id.as_str()).unwrap_or("")
    }

    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.display_name())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetLine {
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub limit: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub spent: Decimal,
    #[serde(
        rename = "startDate",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        rename = "endDate",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

impl BudgetLine {
    /// The line's own name, falling back to its category's.
    pub fn label(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.category
            .as_ref()
            .map(|c| c.display_name())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn category_id(&self) -> &str {
        self.category.as_ref().map(|c| c.id.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub categories: Vec<BudgetLine>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

/// Payload of `GET /user`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(default, deserialize_with = "lenient_object")]
    pub user: Option<UserProfile>,
    #[serde(rename = "wallet", default, deserialize_with = "lenient_vec")]
    pub wallets: Vec<Wallet>,
    #[serde(rename = "budjet", default, deserialize_with = "lenient_vec")]
    pub budgets: Vec<Budget>,
    #[serde(rename = "transaction", default, deserialize_with = "lenient_vec")]
    pub transactions: Vec<Transaction>,
}

impl UserSnapshot {
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn primary_wallet(&self) -> Option<&Wallet> {
        self.wallets.first()
    }

    pub fn primary_budget(&self) -> Option<&Budget> {
        self.budgets.first()
    }

    /// Lines of the first budget, empty when the user has none.
    pub fn budget_lines(&self) -> &[BudgetLine] {
        self.primary_budget()
            .map(|b| b.categories.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayBucket {
    #[serde(default, deserialize_with = "lenient_string")]
    pub day: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalancePoint {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_income: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_expense: Decimal,
}

/// Payload of `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    #[serde(default, deserialize_with = "lenient_object")]
    pub summary: Option<ReportTotals>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub weekly_data: Vec<DayBucket>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub balance_trend: Vec<BalancePoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub predicted_expenses: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub predicted_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub limit: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalData {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub category_analysis: Vec<CategoryAnalysis>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub budget_status: Vec<BudgetStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpendingPattern {
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeOpportunity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub opportunity: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub potential_increase: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPredictions {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub spending_patterns: Vec<SpendingPattern>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub budget_recommendations: Vec<BudgetRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    /// Ratio in 0..=1.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence_score: f64,
    #[serde(default, deserialize_with = "lenient_object")]
    pub ai_predictions: Option<AiPredictions>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeInsights {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub income: Vec<IncomeOpportunity>,
}

/// The `data` member of `GET /user/ai/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub predictions: Vec<Prediction>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub historical_data: Option<HistoricalData>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub ai_insights: Option<AiInsights>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub insights: Option<IncomeInsights>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_object")]
    pub data: Option<Insights>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: String,
}

/// Body of `POST /transaction`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub name: String,
    /// Category id.
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: String,
}

/// Body of `PUT /budjet/{userId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body of `PUT /wallet/{userId}`.
#[derive(Debug, Clone, Serialize)]
pub struct WalletRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

fn non_empty_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.trim().is_empty() { fallback } else { s }
}

/// Decode a JSON value as a list, tolerating `null`, non-arrays, and
/// elements that do not fit `T`.
pub fn lenient_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::debug!("skipping malformed list entry: {}", e);
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!("expected a list, got {}", kind_of(&other));
            Vec::new()
        }
    }
}

pub fn transactions_from_value(value: Value) -> Vec<Transaction> {
    lenient_list(value)
}

pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(&s).ok())
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => {
            let t = s.trim();
            t.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(t).ok())
        }
        _ => None,
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(lenient_list(v.unwrap_or(Value::Null)))
}

fn lenient_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

// Accepts a plain string or a populated object carrying a `name`.
fn lenient_label<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Object(map)) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    })
}

fn lenient_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(decimal_from_value).unwrap_or(Decimal::ZERO))
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    Ok(lenient_decimal(d)?.abs())
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => crate::utils::parse_iso_date(&s),
        _ => None,
    })
}

// The backend sends either a populated category or just its id.
fn lenient_category<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CategoryRef>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
        Some(Value::String(id)) if !id.is_empty() => Some(CategoryRef {
            id,
            ..CategoryRef::default()
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amount_accepts_strings_and_drops_sign() {
        let t: Transaction = serde_json::from_value(json!({
            "_id": "t1", "type": "Expense", "amount": "-12.50", "date": "2024-01-03"
        }))
        .unwrap();
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.amount, Decimal::new(1250, 2));
        assert!(t.category.is_none());
    }

    #[test]
    fn category_id_only() {
        let t: Transaction = serde_json::from_value(json!({ "category": "c9" })).unwrap();
        assert_eq!(t.category_id(), "c9");
        assert_eq!(t.category_name(), UNKNOWN_CATEGORY);
    }

    #[test]
    fn non_array_is_empty() {
        assert!(transactions_from_value(json!({"a": 1})).is_empty());
        assert!(transactions_from_value(Value::Null).is_empty());
    }
}
