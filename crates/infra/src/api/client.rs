//! Authenticated request executor for the Hotjar REST API
//!
//! Every call resolves a bearer token through the [`AccessTokenProvider`],
//! sends exactly one HTTP request and decodes the answer once into either a
//! JSON value or a typed [`HotjarError`]. There are no retries: a 429 or 5xx
//! goes straight back to the caller.

use std::sync::Arc;
use std::time::Duration;

use hotjar_common::emit_license_notice_once;
use hotjar_common::time::Clock;
use hotjar_domain::constants::API_VERSION_PREFIX;
use hotjar_domain::{ApiConfig, Credentials, HotjarConfig, HotjarError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::query::to_query_pairs;
use crate::auth::{AccessTokenProvider, TokenCache, TokenManager};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Client for one set of Hotjar credentials.
pub struct HotjarClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    credentials: Credentials,
    config: ApiConfig,
}

impl HotjarClient {
    /// Create a client with the default token manager.
    ///
    /// # Errors
    /// `HotjarError::Config` if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, config: ApiConfig) -> Result<Self> {
        Self::builder().credentials(credentials).config(config).build()
    }

    pub fn from_config(config: &HotjarConfig) -> Result<Self> {
        Self::new(config.credentials.clone(), config.api.clone())
    }

    pub fn builder() -> HotjarClientBuilder {
        HotjarClientBuilder::default()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Full URL for an API path such as `/sites/123/surveys`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}{}", self.config.normalized_base_url(), API_VERSION_PREFIX, path)
    }

    /// Execute one authenticated request.
    ///
    /// `body` is sent as JSON and `query` as URL parameters, each only when
    /// non-empty. A successful empty body decodes to `Value::Null`.
    ///
    /// # Errors
    /// - `Authentication` if no token can be obtained, or on 401 (after the
    ///   whole token cache has been cleared)
    /// - `RateLimit` on 429
    /// - `Api` on any other non-2xx status
    /// - `Network` on transport failure
    /// - `InvalidResponse` if a 2xx body is not JSON
    #[instrument(skip(self, body, query), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Map<String, Value>>,
        query: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        emit_license_notice_once();

        let token = self.auth.access_token(&self.credentials).await?;
        let url = self.endpoint_url(path);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(query) = query.filter(|query| !query.is_empty()) {
            request = request.query(&to_query_pairs(query));
        }

        if let Some(body) = body.filter(|body| !body.is_empty()) {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|err| {
                debug!(%status, error = %err, "failed to read error response body");
                String::new()
            });
            return Err(self.map_status_error(status, &body));
        }

        let bytes = response.bytes().await.map_err(|err| HotjarError::from(InfraError::from(err)))?;
        debug!(%status, bytes = bytes.len(), "request succeeded");
        decode_body(&bytes)
    }

    pub async fn get(&self, path: &str, query: Option<&Map<String, Value>>) -> Result<Value> {
        self.request(Method::GET, path, None, query).await
    }

    pub async fn post(&self, path: &str, body: &Map<String, Value>) -> Result<Value> {
        self.request(Method::POST, path, Some(body), None).await
    }

    pub async fn patch(&self, path: &str, body: &Map<String, Value>) -> Result<Value> {
        self.request(Method::PATCH, path, Some(body), None).await
    }

    pub async fn delete(&self, path: &str, query: Option<&Map<String, Value>>) -> Result<Value> {
        self.request(Method::DELETE, path, None, query).await
    }

    fn map_status_error(&self, status: StatusCode, body: &str) -> HotjarError {
        let message = upstream_message(status, body);

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("access token rejected, clearing token cache");
                self.auth.invalidate_all();
                HotjarError::Authentication(format!(
                    "please verify your Hotjar API credentials ({message})"
                ))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("rate limit exceeded");
                HotjarError::rate_limited(message)
            }
            _ => {
                debug!(%status, "request failed");
                HotjarError::Api { status: status.as_u16(), message }
            }
        }
    }
}

/// Prefer the `error.message` field of a JSON error payload, then any
/// top-level `message`, then the raw body.
fn upstream_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status.canonical_reason().unwrap_or("no response body").to_string();
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        let message = json
            .pointer("/error/message")
            .or_else(|| json.get("message"))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }

    trimmed.to_string()
}

fn decode_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|err| InfraError::from(err).into())
}

/// Builder for [`HotjarClient`]
#[derive(Default)]
pub struct HotjarClientBuilder {
    credentials: Option<Credentials>,
    config: Option<ApiConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    cache: Option<TokenCache>,
    clock: Option<Arc<dyn Clock>>,
}

impl HotjarClientBuilder {
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default [`TokenManager`] entirely.
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Share a token cache with other clients. Ignored when [`Self::auth`] is set.
    pub fn token_cache(mut self, cache: TokenCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Clock used for token expiry. Ignored when [`Self::auth`] is set.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// # Errors
    /// `HotjarError::Config` if credentials are missing or the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<HotjarClient> {
        let credentials = self
            .credentials
            .ok_or_else(|| HotjarError::Config("Hotjar credentials not set".to_string()))?;
        let config = self.config.unwrap_or_default();

        if credentials.client_id.trim().is_empty() {
            return Err(HotjarError::Config("client_id must not be empty".to_string()));
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        let auth = match self.auth {
            Some(auth) => auth,
            None => {
                let mut manager = TokenManager::new(http.clone(), config.normalized_base_url());
                if let Some(cache) = self.cache {
                    manager = manager.with_cache(cache);
                }
                if let Some(clock) = self.clock {
                    manager = manager.with_clock(clock);
                }
                Arc::new(manager)
            }
        };

        Ok(HotjarClient { http, auth, credentials, config })
    }
}
