//! HTTP-level integration tests for the `/items` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. The pool connects lazily, so every test
//! here exercises behaviour that resolves before any database round trip:
//! authentication, cursor parsing, and input validation.

mod common;

use axum::http::StatusCode;
use common::{assert_error, get, get_authed, post_json_authed, test_token};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/items").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_list_with_malformed_header_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_authed(app, "/api/v1/items", "").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_list_with_garbage_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_authed(app, "/api/v1/items", "not.a.jwt").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_delete_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = common::delete(app, &format!("/api/v1/items/{}", Uuid::new_v4())).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Store failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_store_failure_surfaces_error() {
    // The pool is unreachable, so the delete cannot touch the store. The
    // response must be an error envelope, never a 204 claiming the item
    // was removed.
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response =
        common::delete_authed(app, &format!("/api/v1/items/{}", Uuid::new_v4()), &token).await;
    assert_error(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
    )
    .await;
}

// ---------------------------------------------------------------------------
// Cursor parsing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_with_malformed_cursor_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = get_authed(app, "/api/v1/items?cursor=garbage", &token).await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[tokio::test]
async fn test_list_with_truncated_cursor_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    // Valid micros prefix but no id half.
    let response = get_authed(app, "/api/v1/items?cursor=1700000000000000", &token).await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

// ---------------------------------------------------------------------------
// Creation validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_bookmark_without_url_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = post_json_authed(
        app,
        "/api/v1/items",
        &token,
        serde_json::json!({"type": "bookmark", "title": "Rust homepage"}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_create_note_without_content_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = post_json_authed(
        app,
        "/api/v1/items",
        &token,
        serde_json::json!({"type": "note", "title": "Empty note"}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_create_with_unknown_color_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = post_json_authed(
        app,
        "/api/v1/items",
        &token,
        serde_json::json!({
            "type": "note",
            "title": "Tinted",
            "content": "body",
            "color": "#123456"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_create_note_with_url_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = post_json_authed(
        app,
        "/api/v1/items",
        &token,
        serde_json::json!({
            "type": "note",
            "title": "Mislabeled",
            "content": "body",
            "url": "https://example.com"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Export filter parsing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_with_unknown_type_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = test_token(Uuid::new_v4());
    let response = get_authed(app, "/api/v1/items/export?type=video", &token).await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}
