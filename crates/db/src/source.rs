//! Postgres-backed [`ItemSource`] for the core feed loader.

use async_trait::async_trait;

use stashpad_core::feed::{ItemSource, SourcePage};
use stashpad_core::types::DbId;

use crate::cursor::ItemCursor;
use crate::models::item::Item;
use crate::repositories::ItemRepo;
use crate::DbPool;

/// Pages through one owner's items via [`ItemRepo::list_by_owner`].
///
/// Constructing the source fixes the owner identity, which is what makes
/// "an owner identity is available" a precondition the feed loader never
/// has to re-check.
pub struct PgItemSource {
    pool: DbPool,
    owner: DbId,
}

impl PgItemSource {
    pub fn new(pool: DbPool, owner: DbId) -> Self {
        Self { pool, owner }
    }
}

#[async_trait]
impl ItemSource for PgItemSource {
    type Record = Item;
    type Cursor = ItemCursor;
    type Error = sqlx::Error;

    async fn fetch_page(
        &self,
        cursor: Option<&ItemCursor>,
        limit: i64,
    ) -> Result<SourcePage<Item, ItemCursor>, sqlx::Error> {
        let page = ItemRepo::list_by_owner(&self.pool, self.owner, cursor.copied(), limit).await?;
        Ok(SourcePage {
            records: page.items,
            next_cursor: page.next_cursor,
        })
    }
}
