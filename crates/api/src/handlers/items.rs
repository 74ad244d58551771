//! Handlers for the `/items` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use stashpad_core::error::CoreError;
use stashpad_core::feed::FeedLoader;
use stashpad_core::filter::{filter_items, TypeFilter};
use stashpad_core::item::{validate_item_update, validate_new_item, NewItemFields, UpdateItemFields};
use stashpad_core::types::DbId;
use stashpad_db::cursor::ItemCursor;
use stashpad_db::models::item::{CreateItem, Item, UpdateItem};
use stashpad_db::repositories::{clamp_limit, ItemRepo};
use stashpad_db::source::PgItemSource;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{FeedParams, FilterParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One page of items plus continuation state, returned by `list`.
#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<Item>,
    /// Opaque continuation token; pass back as `?cursor=` for the next page.
    pub next_cursor: Option<String>,
    /// False once the final page has been served.
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/items?cursor=&limit=
///
/// List one page of the caller's items, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<FeedParams>,
) -> AppResult<Json<ListItemsResponse>> {
    let cursor = match params.cursor.as_deref() {
        Some(token) => Some(
            ItemCursor::decode(token)
                .ok_or_else(|| AppError::BadRequest("invalid cursor".into()))?,
        ),
        None => None,
    };

    let limit = clamp_limit(params.limit);
    let page = ItemRepo::list_by_owner(&state.pool, auth_user.user_id, cursor, limit).await?;

    Ok(Json(ListItemsResponse {
        has_more: page.next_cursor.is_some(),
        next_cursor: page.next_cursor.map(|c| c.encode()),
        items: page.items,
    }))
}

/// GET /api/v1/items/export?type=&q=
///
/// Drain every page of the caller's feed, apply the type/search filter, and
/// return the matching items in feed order.
pub async fn export(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    let filter = match params.item_type.as_deref() {
        Some(label) => TypeFilter::parse(label)
            .ok_or_else(|| AppError::BadRequest(format!("unknown item type: {label}")))?,
        None => TypeFilter::All,
    };
    let query = params.q.unwrap_or_default();

    let source = PgItemSource::new(state.pool.clone(), auth_user.user_id);
    let mut loader = FeedLoader::new(source);
    while loader.has_more() {
        loader.load_more().await?;
    }

    let all = loader.into_items();
    let matched: Vec<Item> = filter_items(&all, filter, &query)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data: matched }))
}

/// POST /api/v1/items
///
/// Create a new item. Returns 201 with the stored row.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    validate_new_item(&NewItemFields {
        item_type: input.item_type,
        title: &input.title,
        content: &input.content,
        url: input.url.as_deref(),
        language: input.language.as_deref(),
        color: input.color.as_deref(),
    })?;

    let item = ItemRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(user_id = %auth_user.user_id, item_id = %item.id, "item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = ItemRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id,
        }))?;
    Ok(Json(item))
}

/// PUT /api/v1/items/{id}
///
/// Partial update. Absent fields are left untouched; the type tag cannot
/// change after creation.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let existing = ItemRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id,
        }))?;

    let item_type = existing.item_type().ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "item {id} has unrecognized type '{}'",
            existing.item_type
        )))
    })?;

    validate_item_update(
        item_type,
        &UpdateItemFields {
            title: input.title.as_deref(),
            content: input.content.as_deref(),
            url: input.url.as_deref(),
            language: input.language.as_deref(),
            color: input.color.as_deref(),
        },
    )?;

    let item = ItemRepo::update(&state.pool, auth_user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id,
        }))?;

    tracing::info!(user_id = %auth_user.user_id, item_id = %id, "item updated");
    Ok(Json(item))
}

/// DELETE /api/v1/items/{id}
///
/// Hard delete. Returns 204, or 404 if the caller has no such item.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = ItemRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id,
        }));
    }
    tracing::info!(user_id = %auth_user.user_id, item_id = %id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
