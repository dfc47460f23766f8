//! Authentication routes: login, logout, current profile.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use validator::Validate;

use domain::models::profile::{LoginRequest, LoginResponse, ProfileResponse};
use persistence::repositories::ProfileRepository;
use shared::password::verify_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::{
    build_clear_session_cookie, build_session_cookie, SessionIdentity,
};

/// POST /api/auth/login
///
/// Verifies credentials, issues a session token, and tells the client
/// where to land based on the profile's role.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = ProfileRepository::new(state.pool.clone());
    let profile = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let password_ok = verify_password(&request.password, &profile.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !password_ok || !profile.is_active {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let role = profile
        .parsed_role()
        .ok_or_else(|| ApiError::Forbidden("Account has no valid role".to_string()))?;

    let (token, _jti) = state
        .session_keys
        .issue(profile.id)
        .map_err(|e| ApiError::Internal(format!("Token issuance failed: {}", e)))?;

    let cookie = build_session_cookie(
        &state.config.session.cookie_name,
        &token,
        state.config.session.session_expiry_secs,
        state.config.session.cookie_secure,
    );

    tracing::info!("Login for profile {} ({})", profile.id, role);

    let body = LoginResponse {
        token,
        role,
        redirect_to: role.home_path().to_string(),
    };

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)))
}

/// POST /api/auth/logout
///
/// Clears the session cookie. Idempotent; an unauthenticated call is not
/// an error.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = build_clear_session_cookie(
        &state.config.session.cookie_name,
        state.config.session.cookie_secure,
    );
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(serde_json::json!({"success": true})),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    identity: SessionIdentity,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.pool.clone());
    let profile = repo
        .find_by_id(identity.profile_id)
        .await?
        .and_then(|entity| entity.into_domain())
        .ok_or_else(|| ApiError::Unauthorized("Session profile no longer exists".to_string()))?;

    Ok(Json(ProfileResponse::from(&profile)))
}
