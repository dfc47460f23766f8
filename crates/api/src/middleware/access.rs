//! Route guard middleware.
//!
//! Applies the route access decision table to every request. The
//! requester's role is resolved fresh from its profile row; a lookup
//! failure downgrades the request to no role (least privilege) rather
//! than erroring. Denied requests are always answered with a redirect,
//! never a 4xx.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::str::FromStr;
use uuid::Uuid;

use domain::models::role::Role;
use domain::services::route_access::{self, RouteDecision};
use persistence::repositories::ProfileRepository;

use crate::app::AppState;
use crate::middleware::session::SessionIdentity;

/// Middleware enforcing role-based path access.
pub async fn route_guard(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if !route_access::requires_auth(&path) {
        return next.run(req).await;
    }

    let identity = match req.extensions().get::<SessionIdentity>() {
        Some(identity) => identity.clone(),
        None => {
            return apply(route_access::login_redirect(&path), req, next).await;
        }
    };

    let role = resolve_role(&state, identity.profile_id).await;

    apply(route_access::authorize(role, &path), req, next).await
}

/// Resolves the profile's role, mapping lookup failures and unknown role
/// strings to `None`. No retry within a request.
async fn resolve_role(state: &AppState, profile_id: Uuid) -> Option<Role> {
    let repo = ProfileRepository::new(state.pool.clone());
    match repo.fetch_role(profile_id).await {
        Ok(Some(role)) => Role::from_str(&role).ok(),
        Ok(None) => None,
        Err(e) => {
            tracing::error!("Role lookup failed for {}: {}", profile_id, e);
            None
        }
    }
}

async fn apply(decision: RouteDecision, req: Request<Body>, next: Next) -> Response {
    match decision {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::Redirect(target) => Redirect::temporary(&target).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_redirect_decision_maps_to_temporary_redirect() {
        let response = Redirect::temporary("/login?redirectTo=/admin").into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/login?redirectTo=/admin"
        );
    }
}
