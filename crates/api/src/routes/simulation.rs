//! Hiring cost simulation endpoint.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::simulation::{CalculateRequest, CalculateResponse};
use persistence::repositories::CalculatorRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionIdentity;
use crate::services::simulation::{SimulationError, SimulationService};

/// POST /api/simulation/calculate
pub async fn calculate(
    State(state): State<AppState>,
    _identity: SessionIdentity,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let service = SimulationService::new(
        CalculatorRepository::new(state.pool.clone()),
        state.generative.clone(),
    );

    let response = service
        .calculate(&request.nationality, &request.field, request.period)
        .await
        .map_err(|e| match e {
            SimulationError::UnknownField(field) => {
                ApiError::NotFound(format!("Unknown simulation field: {}", field))
            }
            SimulationError::Database(err) => ApiError::from(err),
        })?;

    Ok(Json(response))
}
