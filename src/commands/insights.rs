// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::json_flags;
use crate::analytics::budget::{over_threshold, progress};
use crate::analytics::charts::{category_analysis_series, prediction_series};
use crate::analytics::ChartSeries;
use crate::models::Insights;
use crate::source::HttpSource;
use crate::utils::{fmt_usd, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BudgetStatusRow {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percent: Decimal,
    pub alert: bool,
}

#[derive(Debug, Serialize)]
pub struct InsightsView {
    /// Whole percent.
    pub confidence: u32,
    pub predictions: ChartSeries,
    pub category_analysis: ChartSeries,
    pub spending_patterns: Vec<(String, String)>,
    pub recommendations: Vec<(String, String)>,
    pub income_opportunities: Vec<(String, Decimal)>,
    pub budget_status: Vec<BudgetStatusRow>,
}

pub fn insights_view(data: &Insights) -> InsightsView {
    let ai = data.ai_insights.clone().unwrap_or_default();
    let preds = ai.ai_predictions.unwrap_or_default();
    let history = data.historical_data.clone().unwrap_or_default();
    InsightsView {
        confidence: (ai.confidence_score * 100.0).round().clamp(0.0, 100.0) as u32,
        predictions: prediction_series(&data.predictions),
        category_analysis: category_analysis_series(&history.category_analysis),
        spending_patterns: preds
            .spending_patterns
            .into_iter()
            .map(|p| (p.category, p.description))
            .collect(),
        recommendations: preds
            .budget_recommendations
            .into_iter()
            .map(|r| (r.category, r.recommendation))
            .collect(),
        income_opportunities: data
            .insights
            .as_ref()
            .map(|i| {
                i.income
                    .iter()
                    .map(|o| (o.opportunity.clone(), o.potential_increase))
                    .collect()
            })
            .unwrap_or_default(),
        budget_status: history
            .budget_status
            .iter()
            .map(|b| BudgetStatusRow {
                category: b.category.clone(),
                limit: b.limit,
                spent: b.spent,
                percent: progress(b.limit, b.spent).percent,
                alert: over_threshold(b.limit, b.spent),
            })
            .collect(),
    }
}

pub fn handle(source: &HttpSource, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let user_id = source.user_id()?;
    let data = source
        .fetch_insights(&user_id)
        .context("Failed to fetch AI analysis")?;
    let view = insights_view(&data);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("AI analysis confidence: {}%", view.confidence);

    let mut rows = Vec::new();
    for (i, day) in view.predictions.labels.iter().enumerate() {
        let pick = |n: usize| {
            view.predictions
                .datasets
                .get(n)
                .and_then(|d| d.data.get(i))
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default()
        };
        rows.push(vec![day.clone(), pick(0), pick(1)]);
    }
    println!(
        "{}",
        pretty_table(&["Day", "Predicted expenses", "Predicted income"], rows)
    );

    if let Some(spent) = view.category_analysis.datasets.first() {
        let rows = view
            .category_analysis
            .labels
            .iter()
            .zip(&spent.data)
            .map(|(c, v)| vec![c.clone(), format!("{:.2}", v)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    let pairs = |items: &[(String, String)]| -> Vec<Vec<String>> {
        items
            .iter()
            .map(|(a, b)| vec![a.clone(), b.clone()])
            .collect()
    };
    println!(
        "{}",
        pretty_table(
            &["Spending pattern", "Detail"],
            pairs(&view.spending_patterns)
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Category", "Recommendation"],
            pairs(&view.recommendations)
        )
    );
    let income = view
        .income_opportunities
        .iter()
        .map(|(o, amt)| vec![o.clone(), format!("Potential increase: {}", fmt_usd(amt))])
        .collect();
    println!("{}", pretty_table(&["Income opportunity", ""], income));

    let status = view
        .budget_status
        .iter()
        .map(|b| {
            vec![
                b.category.clone(),
                format!("Spent: {} / {}", fmt_usd(&b.spent), fmt_usd(&b.limit)),
                format!("{:.0}%", b.percent),
                if b.alert { "over 80%".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Budget", "Status", "Used", "Alert"], status)
    );
    Ok(())
}
