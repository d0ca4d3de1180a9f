//! OAuth2 client-credentials types
//!
//! Credentials are supplied by the host environment, exchanged for a bearer
//! token at the token endpoint, and the token is cached per client id.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Client id / secret pair for the client-credentials grant.
/// The secret is never serialized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Token endpoint response (RFC 6749 section 5.1 subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Bearer token held in the in-memory cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Build a cache entry from a token response received at `issued_at`.
    ///
    /// Returns `None` when `expires_in` pushes the expiry out of the
    /// representable date range.
    pub fn from_response(response: &TokenResponse, issued_at: DateTime<Utc>) -> Option<Self> {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))?;
        Some(Self { token: response.access_token.clone(), expires_at })
    }

    /// A token is reusable only while `now + margin` is strictly before expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>, margin_seconds: i64) -> bool {
        Duration::try_seconds(margin_seconds)
            .and_then(|margin| now.checked_add_signed(margin))
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}
