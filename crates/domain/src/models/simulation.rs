//! Hiring cost simulation domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether a fee applies once or every month of the employment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeRecurrence {
    OneTime,
    Monthly,
}

/// One row of the cost breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CostItem {
    pub item_key: String,
    pub label: String,
    /// Yen amount; for monthly items this is the per-month figure.
    pub amount: i64,
    pub recurrence: FeeRecurrence,
    /// Amount contributed to the total over the full period.
    pub subtotal: i64,
}

/// Request payload for `POST /api/simulation/calculate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CalculateRequest {
    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub nationality: String,

    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub field: String,

    /// Employment period in months.
    #[validate(range(min = 1, max = 120, message = "Period must be 1-120 months"))]
    pub period: i32,
}

/// Response body for `POST /api/simulation/calculate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CalculateResponse {
    pub total_cost: i64,
    pub breakdown: Vec<CostItem>,
    pub risks: Vec<String>,
    pub notes: String,
}

/// Sums one-time fees plus monthly fees over the period.
pub fn total_over_period(breakdown: &[CostItem]) -> i64 {
    breakdown.iter().map(|item| item.subtotal).sum()
}
