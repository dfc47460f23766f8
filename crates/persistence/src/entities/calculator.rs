//! Calculator database entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Simulation fee reference row. Rows with a NULL nationality apply to
/// every nationality; nationality-specific rows add on top.
#[derive(Debug, Clone, FromRow)]
pub struct SimulationFeeEntity {
    pub id: Uuid,
    pub field: String,
    pub nationality: Option<String>,
    pub item_key: String,
    pub label: String,
    pub amount: i64,
    pub recurrence: String,
    pub sort_order: i32,
}

/// Insert-only log of generated compliance reports.
#[derive(Debug, Clone, FromRow)]
pub struct DiagnosisReportEntity {
    pub id: Uuid,
    pub session_id: String,
    pub answers: serde_json::Value,
    pub scores: serde_json::Value,
    pub report: String,
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}
