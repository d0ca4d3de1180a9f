//! OAuth2 client-credentials authentication
//!
//! - [`TokenCache`]: in-memory bearer tokens keyed by client id
//! - [`TokenManager`]: exchanges credentials for tokens and caches them
//! - [`AccessTokenProvider`]: seam used by the API client, mockable in tests

pub mod token_cache;
pub mod token_manager;

use async_trait::async_trait;
use hotjar_domain::{Credentials, Result};

pub use token_cache::TokenCache;
pub use token_manager::TokenManager;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a bearer token for `credentials`, exchanging a new one if needed.
    async fn access_token(&self, credentials: &Credentials) -> Result<String>;

    /// Drop every cached token, whichever client id it belongs to.
    fn invalidate_all(&self);
}
