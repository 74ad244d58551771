//! Item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stashpad_core::feed::FeedRecord;
use stashpad_core::filter::Searchable;
use stashpad_core::item::ItemType;
use stashpad_core::types::{DbId, Timestamp};

use crate::cursor::ItemCursor;

/// A row from the `items` table.
///
/// `item_type` is stored as its lowercase label; the CHECK constraint keeps
/// it inside the closed set, and [`Item::item_type`] gives the typed view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub user_id: DbId,
    pub item_type: String,
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub language: Option<String>,
    pub tags: Vec<String>,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    /// Typed view of the stored type label. `None` only if the row predates
    /// the CHECK constraint, which the schema does not allow.
    pub fn item_type(&self) -> Option<ItemType> {
        ItemType::parse(&self.item_type)
    }

    /// The keyset cursor pointing at this row.
    pub fn cursor(&self) -> ItemCursor {
        ItemCursor {
            created_at: self.created_at,
            id: self.id,
        }
    }
}

impl FeedRecord for Item {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Searchable for Item {
    fn type_label(&self) -> &str {
        &self.item_type
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn content(&self) -> &str {
        &self.content
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// DTO for creating a new item. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub url: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub color: Option<String>,
}

/// DTO for partial item updates.
///
/// A `None` field was absent from the request and is never written; the
/// repository omits it from the generated SQL entirely. The type tag is
/// deliberately not here: it is immutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItem {
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
}

/// One page of a user's items plus the continuation cursor.
///
/// `next_cursor` of `None` means the store signalled no further data
/// (the page came back short).
#[derive(Debug)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub next_cursor: Option<ItemCursor>,
}
