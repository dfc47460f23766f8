//! Integration tests for the route guard.
//!
//! These run without a database: unauthenticated decisions never touch
//! the pool, and a failing role lookup must behave exactly like having
//! no role.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::{create_test_app, get_request, json_request_with_auth, session_token};

#[tokio::test]
async fn unauthenticated_admin_request_redirects_to_login() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/login?redirectTo=/admin"
    );
}

#[tokio::test]
async fn unauthenticated_business_request_carries_original_path() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/business/home")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/login?redirectTo=/business/home"
    );
}

#[tokio::test]
async fn unauthenticated_admin_api_request_redirects_to_login() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request_with_auth(
            Method::PUT,
            "/api/admin/settings",
            serde_json::json!({"section": "business", "key": "k", "value": "v"}),
            "not-a-valid-token",
        ))
        .await
        .unwrap();

    // An invalid token leaves the request unauthenticated.
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/login?redirectTo=/api/admin/settings"
    );
}

#[tokio::test]
async fn failed_role_lookup_is_least_privilege() {
    let app = create_test_app();

    // Valid token, but the role lookup fails (no database behind the lazy
    // pool). The guard must treat this exactly like having no role and
    // redirect away from the admin area.
    let response = app
        .oneshot(json_request_with_auth(
            Method::PUT,
            "/api/admin/settings",
            serde_json::json!({"section": "business", "key": "k", "value": "v"}),
            &session_token(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn liveness_probe_is_public() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/api/health/live")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn prefix_match_respects_segment_boundaries() {
    let app = create_test_app();

    // /administrator is not inside /admin; with no such route the router
    // answers 404 instead of redirecting to login.
    let response = app.oneshot(get_request("/administrator")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/api/health/live")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/api/health/live")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn request_id_is_propagated_from_header() {
    let app = create_test_app();

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/health/live")
        .header("X-Request-ID", "req-abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-abc-123");
}
