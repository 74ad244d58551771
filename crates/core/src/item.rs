//! Item domain types and field validation.
//!
//! An item is a single saved bookmark, note, or code snippet. The type tag
//! is closed and immutable after creation: it decides which optional fields
//! are meaningful (`url` for bookmarks, `language` for code) and how content
//! renders. Validators here return [`CoreError::Validation`] and are shared
//! by the create and update paths in the API layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed tag deciding an item's shape and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Bookmark,
    Note,
    Code,
}

impl ItemType {
    /// The lowercase label stored in the `items.item_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Bookmark => "bookmark",
            ItemType::Note => "note",
            ItemType::Code => "code",
        }
    }

    /// Parse a stored label. Returns `None` for anything outside the closed set.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "bookmark" => Some(ItemType::Bookmark),
            "note" => Some(ItemType::Note),
            "code" => Some(ItemType::Code),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed accent palette an item color must come from.
pub const ACCENT_COLORS: &[&str] = &["#FFC0CB", "#ADD8E6", "#90EE90", "#FFFFE0", "#E6E6FA"];

/// Check whether a color value is one of the allowed accents.
pub fn is_accent_color(color: &str) -> bool {
    ACCENT_COLORS.contains(&color)
}

/// Borrowed view of the fields of a new item, as submitted by a client.
#[derive(Debug, Clone, Copy)]
pub struct NewItemFields<'a> {
    pub item_type: ItemType,
    pub title: &'a str,
    pub content: &'a str,
    pub url: Option<&'a str>,
    pub language: Option<&'a str>,
    pub color: Option<&'a str>,
}

/// Borrowed view of the fields present in a partial update.
///
/// `None` means the field was absent from the request and must be left
/// untouched; it is never interpreted as "clear".
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateItemFields<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub url: Option<&'a str>,
    pub language: Option<&'a str>,
    pub color: Option<&'a str>,
}

/// Validate all fields of a new item against its declared type.
pub fn validate_new_item(fields: &NewItemFields<'_>) -> Result<(), CoreError> {
    validate_title(fields.title)?;

    match fields.item_type {
        ItemType::Bookmark => {
            let url = fields.url.ok_or_else(|| {
                CoreError::Validation("url is required for bookmarks".to_string())
            })?;
            validate_url(url)?;
        }
        ItemType::Note => {
            if fields.url.is_some() {
                return Err(CoreError::Validation(
                    "url is only valid on bookmarks".to_string(),
                ));
            }
            validate_content_required(fields.content, "notes")?;
        }
        ItemType::Code => {
            if fields.url.is_some() {
                return Err(CoreError::Validation(
                    "url is only valid on bookmarks".to_string(),
                ));
            }
            validate_content_required(fields.content, "code snippets")?;
        }
    }

    if fields.language.is_some() && fields.item_type != ItemType::Code {
        return Err(CoreError::Validation(
            "language is only valid on code snippets".to_string(),
        ));
    }

    if let Some(color) = fields.color {
        validate_color(color)?;
    }

    Ok(())
}

/// Validate a partial update against the stored (immutable) item type.
///
/// The type itself cannot change, so an update naming fields the stored type
/// has no use for is rejected instead of silently discarding data.
pub fn validate_item_update(
    item_type: ItemType,
    fields: &UpdateItemFields<'_>,
) -> Result<(), CoreError> {
    if let Some(title) = fields.title {
        validate_title(title)?;
    }

    if let Some(url) = fields.url {
        if item_type != ItemType::Bookmark {
            return Err(CoreError::Validation(
                "url is only valid on bookmarks".to_string(),
            ));
        }
        validate_url(url)?;
    }

    if fields.language.is_some() && item_type != ItemType::Code {
        return Err(CoreError::Validation(
            "language is only valid on code snippets".to_string(),
        ));
    }

    if let Some(content) = fields.content {
        if item_type != ItemType::Bookmark {
            validate_content_required(
                content,
                if item_type == ItemType::Note {
                    "notes"
                } else {
                    "code snippets"
                },
            )?;
        }
    }

    if let Some(color) = fields.color {
        validate_color(color)?;
    }

    Ok(())
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_content_required(content: &str, kind: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "content is required for {kind}"
        )));
    }
    Ok(())
}

/// Syntactic URL check: http(s) scheme, a non-empty host part, no whitespace.
fn validate_url(url: &str) -> Result<(), CoreError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    let valid = match rest {
        Some(rest) => !rest.is_empty() && !url.chars().any(char::is_whitespace),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("invalid url: {url}")))
    }
}

fn validate_color(color: &str) -> Result<(), CoreError> {
    if is_accent_color(color) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "color must be one of the accent palette, got {color}"
        )))
    }
}
