//! Bearer token cache
//!
//! Owned by the client instead of living in process-global state, so each
//! test (or each independently configured client) gets its own cache.
//! Clones share storage.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use hotjar_domain::CachedToken;

#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    entries: Arc<DashMap<String, CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `client_id` if it is still valid at `now` beyond `margin_seconds`.
    pub fn get_valid(
        &self,
        client_id: &str,
        now: DateTime<Utc>,
        margin_seconds: i64,
    ) -> Option<String> {
        self.entries
            .get(client_id)
            .filter(|entry| entry.is_valid_at(now, margin_seconds))
            .map(|entry| entry.token.clone())
    }

    /// Store a token, replacing any previous entry for the same client id.
    pub fn insert(&self, client_id: impl Into<String>, token: CachedToken) {
        self.entries.insert(client_id.into(), token);
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, client_id: &str) -> bool {
        self.entries.contains_key(client_id)
    }
}
