//! Opaque keyset-pagination cursor for item listing.
//!
//! Item pages are ordered by `(created_at DESC, id DESC)`; the cursor names
//! the last record of a page so the next page can resume strictly after it.
//! The wire form is `<microseconds-since-epoch>.<uuid>`. Clients must treat
//! the token as opaque; a token that fails to decode is a client error, not
//! a panic.

use chrono::DateTime;
use uuid::Uuid;

use stashpad_core::types::{DbId, Timestamp};

/// Position of the last record returned in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCursor {
    pub created_at: Timestamp,
    pub id: DbId,
}

impl ItemCursor {
    /// Encode into the opaque wire token.
    pub fn encode(&self) -> String {
        format!(
            "{}.{}",
            self.created_at.timestamp_micros(),
            self.id.as_simple()
        )
    }

    /// Decode a wire token. Returns `None` for any malformed input.
    pub fn decode(token: &str) -> Option<Self> {
        let (micros, id) = token.split_once('.')?;
        let micros: i64 = micros.parse().ok()?;
        let created_at = DateTime::from_timestamp_micros(micros)?;
        let id = Uuid::parse_str(id).ok()?;
        Some(Self { created_at, id })
    }
}
