//! Token manager for the client-credentials grant
//!
//! Manages the bearer token lifecycle:
//! - Cache lookup by client id (reuse while valid beyond a 60 s margin)
//! - Token exchange against `POST /v1/oauth/token` on a miss
//! - Wholesale invalidation when the API rejects a token
//!
//! Concurrent callers with a cold cache each perform their own exchange and
//! the last one to finish wins the cache slot.

use std::sync::Arc;

use async_trait::async_trait;
use hotjar_common::time::{Clock, SystemClock};
use hotjar_domain::constants::{TOKEN_EXPIRY_MARGIN_SECS, TOKEN_PATH};
use hotjar_domain::{CachedToken, Credentials, HotjarError, Result, TokenResponse};
use reqwest::header::ACCEPT;
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::{AccessTokenProvider, TokenCache};
use crate::http::HttpClient;

const TOKEN_ERROR_PREFIX: &str = "Failed to obtain access token from Hotjar";

pub struct TokenManager {
    http: HttpClient,
    cache: TokenCache,
    clock: Arc<dyn Clock>,
    token_url: String,
    margin_seconds: i64,
}

impl TokenManager {
    /// Create a token manager for the API host at `base_url` with a fresh cache.
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            cache: TokenCache::new(),
            clock: Arc::new(SystemClock),
            token_url: format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH),
            margin_seconds: TOKEN_EXPIRY_MARGIN_SECS,
        }
    }

    /// Share an existing cache (for example between several clients).
    #[must_use]
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Return a valid bearer token for `credentials`.
    ///
    /// # Errors
    /// `HotjarError::Authentication` if the exchange fails for any reason;
    /// nothing is cached in that case.
    #[instrument(skip(self, credentials), fields(client_id = %credentials.client_id))]
    pub async fn get_token(&self, credentials: &Credentials) -> Result<String> {
        if let Some(token) =
            self.cache.get_valid(&credentials.client_id, self.clock.now(), self.margin_seconds)
        {
            debug!("using cached access token");
            return Ok(token);
        }

        let response = self.exchange(credentials).await?;
        let cached = CachedToken::from_response(&response, self.clock.now()).ok_or_else(|| {
            HotjarError::Authentication(format!(
                "{TOKEN_ERROR_PREFIX}: malformed token response: expires_in {} is out of range",
                response.expires_in
            ))
        })?;

        info!(expires_at = %cached.expires_at, "obtained access token");
        self.cache.insert(credentials.client_id.clone(), cached);

        Ok(response.access_token)
    }

    /// Clear every cached token.
    pub fn invalidate_all(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        debug!(dropped, "token cache cleared");
    }

    async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let request = self
            .http
            .request(Method::POST, &self.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ]);

        let response = self
            .http
            .send(request)
            .await
            .map_err(|err| HotjarError::Authentication(format!("{TOKEN_ERROR_PREFIX}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|err| {
                debug!(error = %err, "failed to read token error response body");
                String::new()
            });
            warn!(%status, "token endpoint rejected the credentials");
            let message = if body.is_empty() {
                format!("{TOKEN_ERROR_PREFIX}: token endpoint returned {status}")
            } else {
                format!("{TOKEN_ERROR_PREFIX}: token endpoint returned {status}: {body}")
            };
            return Err(HotjarError::Authentication(message));
        }

        response.json::<TokenResponse>().await.map_err(|err| {
            HotjarError::Authentication(format!("{TOKEN_ERROR_PREFIX}: malformed token response: {err}"))
        })
    }
}

#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self, credentials: &Credentials) -> Result<String> {
        self.get_token(credentials).await
    }

    fn invalidate_all(&self) {
        TokenManager::invalidate_all(self);
    }
}
