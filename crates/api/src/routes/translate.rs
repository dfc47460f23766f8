//! Free-text translation endpoint.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::translation::{TranslateRequest, TranslateResponse};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionIdentity;
use crate::services::generative::GenerativeError;
use crate::services::translation::TranslationError;

/// POST /api/translate
///
/// Cache-aside translation: exact-match repeats are served from the
/// memoization table and flagged `cached`.
pub async fn translate(
    State(state): State<AppState>,
    _identity: SessionIdentity,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let result = state
        .translator
        .translate(
            &request.text,
            &request.source_lang,
            &request.target_lang,
            request.context.as_deref(),
        )
        .await
        .map_err(|e| match e {
            TranslationError::Unavailable => {
                ApiError::ServiceUnavailable("Translation backend is not configured".to_string())
            }
            TranslationError::Backend(GenerativeError::Api { status, body }) => {
                ApiError::Upstream(format!("Translator returned {}: {}", status, body))
            }
            TranslationError::Backend(err) => ApiError::Upstream(err.to_string()),
            TranslationError::Database(err) => ApiError::from(err),
        })?;

    Ok(Json(TranslateResponse {
        translated: result.text,
        cached: result.cached,
    }))
}
