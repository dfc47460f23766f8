//! Compliance diagnosis endpoint.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::diagnosis::{AnalyzeRequest, AnalyzeResponse};
use persistence::repositories::CalculatorRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionIdentity;
use crate::services::diagnosis::{DiagnosisError, DiagnosisService};
use crate::services::generative::GenerativeError;

/// POST /api/diagnosis/analyze
///
/// The report is the generated output itself, so backend failures are
/// surfaced to the caller instead of degraded.
pub async fn analyze(
    State(state): State<AppState>,
    _identity: SessionIdentity,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let service = DiagnosisService::new(
        CalculatorRepository::new(state.pool.clone()),
        state.generative.clone(),
    );

    let response = service.analyze(&request).await.map_err(|e| match e {
        DiagnosisError::Unavailable => {
            ApiError::ServiceUnavailable("Diagnosis backend is not configured".to_string())
        }
        DiagnosisError::Backend(GenerativeError::Api { status, body }) => {
            ApiError::Upstream(format!("Analysis backend returned {}: {}", status, body))
        }
        DiagnosisError::Backend(err) => ApiError::Upstream(err.to_string()),
    })?;

    Ok(Json(response))
}
