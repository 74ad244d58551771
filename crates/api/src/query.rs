//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters for the item feed (`?cursor=&limit=`).
///
/// `cursor` is the opaque continuation token from a previous page; `limit`
/// is clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Filter parameters for the export endpoint (`?type=&q=`).
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    /// `all` (default) or one of `bookmark | note | code`.
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    /// Free-text query matched case-insensitively against title, content,
    /// and tags.
    pub q: Option<String>,
}
