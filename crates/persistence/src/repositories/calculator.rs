//! Calculator repository.

use sqlx::PgPool;

use crate::entities::{DiagnosisReportEntity, SimulationFeeEntity};

/// Repository for simulation fee reference data and diagnosis report logs.
#[derive(Clone)]
pub struct CalculatorRepository {
    pool: PgPool,
}

impl CalculatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fee rows applying to one (field, nationality) pair: generic rows
    /// (NULL nationality) plus nationality-specific rows, in display order.
    pub async fn fees_for(
        &self,
        field: &str,
        nationality: &str,
    ) -> Result<Vec<SimulationFeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, SimulationFeeEntity>(
            r#"
            SELECT id, field, nationality, item_key, label, amount, recurrence, sort_order
            FROM simulation_fees
            WHERE field = $1 AND (nationality IS NULL OR nationality = $2)
            ORDER BY sort_order, item_key
            "#,
        )
        .bind(field)
        .bind(nationality)
        .fetch_all(&self.pool)
        .await
    }

    /// Logs one generated compliance report.
    pub async fn insert_report(
        &self,
        session_id: &str,
        answers: serde_json::Value,
        scores: serde_json::Value,
        report: &str,
        analysis: &str,
    ) -> Result<DiagnosisReportEntity, sqlx::Error> {
        sqlx::query_as::<_, DiagnosisReportEntity>(
            r#"
            INSERT INTO diagnosis_reports (session_id, answers, scores, report, analysis)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, session_id, answers, scores, report, analysis, created_at
            "#,
        )
        .bind(session_id)
        .bind(answers)
        .bind(scores)
        .bind(report)
        .bind(analysis)
        .fetch_one(&self.pool)
        .await
    }
}
