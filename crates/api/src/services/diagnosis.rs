//! Compliance diagnosis service.
//!
//! Unlike the cost simulator, the diagnosis output IS the generated
//! report, so a backend failure propagates to the caller instead of
//! degrading. Every generated report is logged to the reports table on a
//! best-effort basis.

use std::sync::Arc;
use thiserror::Error;

use domain::models::diagnosis::{AnalyzeRequest, AnalyzeResponse};
use persistence::repositories::CalculatorRepository;

use crate::services::generative::{GenerativeClient, GenerativeError};

/// Errors from the diagnosis service.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("Diagnosis backend is not configured")]
    Unavailable,

    #[error("Diagnosis backend failed: {0}")]
    Backend(#[from] GenerativeError),
}

const SYSTEM_INSTRUCTION: &str =
    "You audit Japanese employers' readiness to hire foreign workers. Write \
     in Japanese. Produce a markdown report with sections for strengths, \
     gaps, and concrete next steps. Start with a one-paragraph summary.";

/// Compliance diagnosis service.
pub struct DiagnosisService {
    repo: CalculatorRepository,
    generative: Option<Arc<GenerativeClient>>,
}

impl DiagnosisService {
    pub fn new(repo: CalculatorRepository, generative: Option<Arc<GenerativeClient>>) -> Self {
        Self { repo, generative }
    }

    /// Turns questionnaire answers and scores into a written report.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DiagnosisError> {
        let client = self.generative.as_ref().ok_or(DiagnosisError::Unavailable)?;

        let prompt = build_prompt(request);
        let generated = client.generate_text(&prompt, Some(SYSTEM_INSTRUCTION)).await?;

        let report = generated.text.trim().to_string();
        let analysis = extract_summary(&report);

        // Report logging must not fail the request.
        if let Err(e) = self
            .repo
            .insert_report(
                &request.session_id,
                serde_json::to_value(&request.answers).unwrap_or_default(),
                serde_json::to_value(&request.scores).unwrap_or_default(),
                &report,
                &analysis,
            )
            .await
        {
            tracing::warn!(
                "Failed to log diagnosis report for session {}: {}",
                request.session_id,
                e
            );
        }

        Ok(AnalyzeResponse { report, analysis })
    }
}

/// Renders answers and scores into the analysis prompt with stable
/// ordering.
fn build_prompt(request: &AnalyzeRequest) -> String {
    let mut answers: Vec<_> = request.answers.iter().collect();
    answers.sort_by(|a, b| a.0.cmp(b.0));
    let mut scores: Vec<_> = request.scores.iter().collect();
    scores.sort_by(|a, b| a.0.cmp(b.0));

    let answers_block = answers
        .iter()
        .map(|(question, answer)| format!("- {}: {}", question, answer))
        .collect::<Vec<_>>()
        .join("\n");
    let scores_block = scores
        .iter()
        .map(|(category, score)| format!("- {}: {:.1}", category, score))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Questionnaire answers:\n{}\n\nCategory scores (0-100):\n{}\n\n\
         Write the compliance readiness report.",
        answers_block, scores_block
    )
}

/// First prose paragraph of the report, used as the short analysis.
fn extract_summary(report: &str) -> String {
    let summary = report
        .split("\n\n")
        .map(str::trim)
        .find(|paragraph| !paragraph.is_empty() && !paragraph.starts_with('#'))
        .unwrap_or(report);

    let mut summary = summary.replace('\n', " ");
    if summary.chars().count() > 300 {
        summary = summary.chars().take(300).collect::<String>() + "…";
    }
    summary
}
