//! HTTP-level integration tests for the `/auth` endpoints that resolve
//! before any database round trip (input validation and the auth gate).

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json};

// ---------------------------------------------------------------------------
// Registration validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_register_with_invalid_email_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "not-an-email",
            "display_name": "Sam",
            "password": "long-enough-password"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_register_with_short_password_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "sam@example.com",
            "display_name": "Sam",
            "password": "short"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_register_with_blank_display_name_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "sam@example.com",
            "display_name": "   ",
            "password": "long-enough-password"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Auth gate on protected endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/auth/me").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["status"], "degraded");
    assert!(json["version"].is_string());
}
