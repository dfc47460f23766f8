//! Hiring cost simulation service.
//!
//! Cost figures are facts from the fee reference table; the generative
//! call only enriches them with risks and notes and degrades to built-in
//! defaults when the backend is unconfigured or failing.

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use domain::models::simulation::{
    total_over_period, CalculateResponse, CostItem, FeeRecurrence,
};
use persistence::entities::SimulationFeeEntity;
use persistence::repositories::CalculatorRepository;

use crate::services::generative::GenerativeClient;

/// Errors from the simulation service.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Cost simulation service.
pub struct SimulationService {
    repo: CalculatorRepository,
    generative: Option<Arc<GenerativeClient>>,
}

impl SimulationService {
    pub fn new(repo: CalculatorRepository, generative: Option<Arc<GenerativeClient>>) -> Self {
        Self { repo, generative }
    }

    /// Computes the cost of hiring one worker in `field` from
    /// `nationality` over `period` months.
    pub async fn calculate(
        &self,
        nationality: &str,
        field: &str,
        period: i32,
    ) -> Result<CalculateResponse, SimulationError> {
        let fees = self.repo.fees_for(field, nationality).await?;
        if fees.is_empty() {
            return Err(SimulationError::UnknownField(field.to_string()));
        }

        let breakdown = build_breakdown(&fees, period);
        let total_cost = total_over_period(&breakdown);

        let (risks, notes) = self
            .advisory(nationality, field, period, total_cost)
            .await;

        Ok(CalculateResponse {
            total_cost,
            breakdown,
            risks,
            notes,
        })
    }

    /// Risks and notes from one generative call, or defaults.
    async fn advisory(
        &self,
        nationality: &str,
        field: &str,
        period: i32,
        total_cost: i64,
    ) -> (Vec<String>, String) {
        let Some(client) = self.generative.as_ref() else {
            return (default_risks(), default_notes());
        };

        let prompt = format!(
            "An employer in Japan plans to hire one foreign worker.\n\
             Field: {field}\nNationality: {nationality}\nPeriod: {period} months\n\
             Estimated total cost: {total_cost} JPY\n\n\
             Respond with JSON only, in Japanese: \
             {{\"risks\": [\"...\", \"...\"], \"notes\": \"...\"}} \
             with two or three concrete compliance or cost risks and one \
             short practical note."
        );
        let system = "You advise Japanese employers on hiring foreign workers under the \
                      Specified Skilled Worker program. Be factual and concise.";

        match client.generate_text(&prompt, Some(system)).await {
            Ok(generated) => {
                parse_advisory(&generated.text).unwrap_or_else(|| {
                    tracing::warn!("Unparseable simulation advisory, using defaults");
                    (default_risks(), default_notes())
                })
            }
            Err(e) => {
                tracing::warn!("Simulation advisory call failed: {}", e);
                (default_risks(), default_notes())
            }
        }
    }
}

/// Expands fee rows into the per-request breakdown.
fn build_breakdown(fees: &[SimulationFeeEntity], period: i32) -> Vec<CostItem> {
    fees.iter()
        .map(|fee| {
            let recurrence = match fee.recurrence.as_str() {
                "monthly" => FeeRecurrence::Monthly,
                _ => FeeRecurrence::OneTime,
            };
            let subtotal = match recurrence {
                FeeRecurrence::OneTime => fee.amount,
                FeeRecurrence::Monthly => fee.amount * i64::from(period),
            };
            CostItem {
                item_key: fee.item_key.clone(),
                label: fee.label.clone(),
                amount: fee.amount,
                recurrence,
                subtotal,
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct AdvisoryPayload {
    risks: Vec<String>,
    notes: String,
}

/// Parses the advisory JSON, tolerating a markdown code fence around it.
fn parse_advisory(text: &str) -> Option<(Vec<String>, String)> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let payload: AdvisoryPayload = serde_json::from_str(trimmed).ok()?;
    if payload.risks.is_empty() {
        return None;
    }
    Some((payload.risks, payload.notes))
}

fn default_risks() -> Vec<String> {
    vec![
        "在留資格の更新時期により、想定より早く申請費用が再発生する場合があります。".to_string(),
        "登録支援機関への委託範囲によって月額費用が変動します。".to_string(),
    ]
}

fn default_notes() -> String {
    "概算値です。実際の費用は送出国・支援体制・雇用条件により変動します。".to_string()
}
