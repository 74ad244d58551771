//! Route definitions, grouped by resource.

pub mod auth;
pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register          register (public)
/// /auth/login             login (public)
/// /auth/refresh           refresh (public)
/// /auth/logout            logout (requires auth)
/// /auth/me                current user (requires auth)
///
/// /items                  list, create
/// /items/export           filtered export of the whole feed
/// /items/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/items", items::router())
}
