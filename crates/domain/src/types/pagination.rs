//! Cursor-paginated response envelope
//!
//! List endpoints answer with:
//!
//! ```json
//! {
//!   "results": [...],
//!   "next_cursor": "opaque-cursor-string",
//!   "total_count": 240
//! }
//! ```
//!
//! A `null` (or absent) `next_cursor` marks the last page. A `null` (or
//! absent) `results` is an empty page.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// Cursor for the following page, if any. Empty strings count as absent.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }

    pub fn is_last_page(&self) -> bool {
        self.next_cursor().is_none()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
