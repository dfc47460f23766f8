//! Integration tests for the public site resolution surface.
//!
//! With no database behind the lazy pool, every repository fetch fails.
//! The resolution surface must still answer 200 with empty data: a
//! partial page beats a failed page, and callers render from their own
//! fallback strings.

mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::{create_test_app, get_request, parse_response_body};

#[tokio::test]
async fn unauthored_page_content_resolves_to_empty_map() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/content/business_top"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["page"], "business_top");
    assert_eq!(body["lang"], "ja");
    assert!(body["blocks"].as_object().unwrap().is_empty());
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn content_lang_parameter_is_echoed() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/content/worker_top?lang=vi"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["lang"], "vi");
}

#[tokio::test]
async fn theme_resolution_never_fails() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/theme?sections=global,business"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["sections"], serde_json::json!(["global", "business"]));
    assert!(body["theme"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn cold_settings_cache_with_failing_fetch_is_empty() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/settings/business"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["section"], "business");
    assert!(body["settings"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn navigation_degrades_to_empty_list() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/navigation/business_header"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn translation_bundle_degrades_to_empty_strings() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/site/translations/en"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["lang"], "en");
    assert!(body["strings"].as_object().unwrap().is_empty());
}
