//! Session extraction middleware.
//!
//! Reads the httpOnly session cookie (with an `Authorization: Bearer`
//! fallback), validates the token, and stores the identity in request
//! extensions. Invalid or absent tokens leave the request
//! unauthenticated rather than failing it; the route guard decides what
//! an unauthenticated request may do.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use shared::session::extract_profile_id;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated identity extracted from a session token.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    /// Profile id from the token subject claim.
    pub profile_id: Uuid,
    /// Token id for log correlation.
    pub jti: String,
}

/// Extractor for handlers that require an authenticated identity.
/// Responds 401 when the session middleware attached no identity.
#[async_trait]
impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Middleware that attaches `SessionIdentity` when a valid session token
/// is present. Always lets the request continue.
pub async fn session_context(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = token_from_request(&req, &state.config.session.cookie_name) {
        match state.session_keys.validate(&token) {
            Ok(claims) => match extract_profile_id(&claims) {
                Ok(profile_id) => {
                    req.extensions_mut().insert(SessionIdentity {
                        profile_id,
                        jti: claims.jti,
                    });
                }
                Err(_) => {
                    tracing::debug!("Session token carried a non-uuid subject");
                }
            },
            Err(e) => {
                tracing::debug!("Session token rejected: {}", e);
            }
        }
    }

    next.run(req).await
}

/// Pulls the session token from the named cookie, falling back to a
/// Bearer Authorization header.
fn token_from_request(req: &Request<Body>, cookie_name: &str) -> Option<String> {
    if let Some(token) = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, cookie_name))
    {
        return Some(token);
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Finds one cookie value in a Cookie header.
fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Builds the Set-Cookie value for a fresh session.
pub fn build_session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the Set-Cookie value that clears the session on logout.
pub fn build_clear_session_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
