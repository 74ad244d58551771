//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`. All require authentication.
///
/// ```text
/// GET    /          -> paginated list (?cursor=&limit=)
/// POST   /          -> create
/// GET    /export    -> filtered export (?type=&q=)
/// GET    /{id}      -> fetch one
/// PUT    /{id}      -> partial update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list).post(items::create))
        .route("/export", get(items::export))
        .route(
            "/{id}",
            get(items::get_by_id)
                .put(items::update)
                .delete(items::delete),
        )
}
