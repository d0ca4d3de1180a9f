//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{RATE_LIMIT_PER_MINUTE, RATE_LIMIT_PER_SECOND};

/// Main error type for Hotjar API operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum HotjarError {
    /// Token exchange failed or the API answered 401.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The API answered 429.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Any other non-2xx answer.
    #[error("Hotjar API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx answer whose body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pagination stopped after {max_pages} pages without reaching the last page")]
    PaginationCapExceeded { max_pages: usize },
}

impl HotjarError {
    /// Build the rate-limit error, citing the documented request budget.
    pub fn rate_limited(detail: impl AsRef<str>) -> Self {
        let detail = detail.as_ref();
        let mut message = format!(
            "Hotjar allows {RATE_LIMIT_PER_MINUTE} requests per minute ({RATE_LIMIT_PER_SECOND}/second)"
        );
        if !detail.is_empty() {
            message.push_str(": ");
            message.push_str(detail);
        }
        Self::RateLimit(message)
    }

    /// HTTP status associated with this error, when one is known.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimit(_) => Some(429),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit(_))
    }
}

/// Result type alias for Hotjar operations
pub type Result<T> = std::result::Result<T, HotjarError>;
