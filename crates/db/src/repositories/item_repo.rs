//! Repository for the `items` table.
//!
//! All operations are scoped to one owner identity; an item belonging to a
//! different owner is indistinguishable from a missing one. Listing uses
//! keyset pagination over `(created_at DESC, id DESC)` so a page boundary
//! stays stable while new items are prepended by concurrent writes.

use sqlx::{PgPool, Postgres, QueryBuilder};

use stashpad_core::types::DbId;

use crate::cursor::ItemCursor;
use crate::models::item::{CreateItem, Item, ItemPage, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, item_type, title, content, url, language, \
                       tags, color, created_at, updated_at";

/// Default page size for item listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for item listing.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a client-supplied page size into the allowed range.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Provides CRUD and paginated listing for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the stored row.
    ///
    /// `id` and `created_at` are assigned by the database (never the client
    /// clock), so ordering is consistent with the store's own view of
    /// insertion order.
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (user_id, item_type, title, content, url, language, tags, color)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(owner)
            .bind(input.item_type.as_str())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.url.as_deref())
            .bind(input.language.as_deref())
            .bind(&input.tags)
            .bind(input.color.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find one of the owner's items by id.
    pub async fn find_by_id(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List one page of the owner's items, newest first, resuming strictly
    /// after `cursor` when present.
    ///
    /// The returned `next_cursor` points at the last record of the page, or
    /// is `None` when the page came back short of `limit` -- the store's
    /// signal that no further data exists.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: DbId,
        cursor: Option<ItemCursor>,
        limit: i64,
    ) -> Result<ItemPage, sqlx::Error> {
        let items = match cursor {
            Some(after) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM items
                     WHERE user_id = $1 AND (created_at, id) < ($2, $3)
                     ORDER BY created_at DESC, id DESC
                     LIMIT $4"
                );
                sqlx::query_as::<_, Item>(&query)
                    .bind(owner)
                    .bind(after.created_at)
                    .bind(after.id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM items
                     WHERE user_id = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, Item>(&query)
                    .bind(owner)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
        };

        let next_cursor = if (items.len() as i64) < limit {
            None
        } else {
            items.last().map(Item::cursor)
        };

        Ok(ItemPage { items, next_cursor })
    }

    /// Apply a partial update, returning the updated row.
    ///
    /// Only fields present in `input` appear in the generated SQL; absent
    /// fields are never transmitted, so the store cannot see a "no value"
    /// sentinel. An update carrying no fields degenerates to a fetch.
    /// Returns `None` if the owner has no item with the given id.
    pub async fn update(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        if !has_update_fields(input) {
            return Self::find_by_id(pool, owner, id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE items SET ");
        push_update_fields(&mut builder, input);
        builder.push(", updated_at = now() WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND user_id = ");
        builder.push_bind(owner);
        builder.push(format!(" RETURNING {COLUMNS}"));

        builder
            .build_query_as::<Item>()
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete one of the owner's items. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, owner: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn has_update_fields(input: &UpdateItem) -> bool {
    input.title.is_some()
        || input.content.is_some()
        || input.url.is_some()
        || input.language.is_some()
        || input.tags.is_some()
        || input.color.is_some()
}

/// Append `column = $n` assignments for exactly the fields present in `input`.
fn push_update_fields(builder: &mut QueryBuilder<'_, Postgres>, input: &UpdateItem) {
    let mut set = builder.separated(", ");
    if let Some(title) = &input.title {
        set.push("title = ").push_bind_unseparated(title.clone());
    }
    if let Some(content) = &input.content {
        set.push("content = ").push_bind_unseparated(content.clone());
    }
    if let Some(url) = &input.url {
        set.push("url = ").push_bind_unseparated(url.clone());
    }
    if let Some(language) = &input.language {
        set.push("language = ")
            .push_bind_unseparated(language.clone());
    }
    if let Some(tags) = &input.tags {
        set.push("tags = ").push_bind_unseparated(tags.clone());
    }
    if let Some(color) = &input.color {
        set.push("color = ").push_bind_unseparated(color.clone());
    }
}
