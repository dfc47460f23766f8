//! Compliance diagnosis domain models.
//!
//! The diagnosis calculator collects questionnaire answers and per-category
//! scores on the client; the backend turns them into a written report via
//! one generative call and logs the result.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Request payload for `POST /api/diagnosis/analyze`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 128, message = "Session id is required"))]
    pub session_id: String,

    /// Question id -> selected answer.
    #[validate(length(min = 1, message = "At least one answer is required"))]
    pub answers: HashMap<String, String>,

    /// Category -> score.
    #[validate(length(min = 1, message = "At least one score is required"))]
    pub scores: HashMap<String, f64>,
}

/// Response body for `POST /api/diagnosis/analyze`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Full written report (markdown).
    pub report: String,
    /// One-paragraph summary of the findings.
    pub analysis: String,
}
