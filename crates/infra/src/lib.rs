//! # Hotjar Infrastructure
//!
//! I/O side of the Hotjar API client.
//!
//! This crate contains:
//! - HTTP client wrapper and error conversions
//! - OAuth2 client-credentials token cache and manager
//! - Request executor, cursor paginator and query normalizer
//! - Webhook receiver (axum)
//! - Configuration loader
//!
//! ## Architecture
//! - Types and errors come from `hotjar-domain`
//! - Clock and tracing setup come from `hotjar-common`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod webhook;

// Re-export commonly used items
pub use api::{build_query_params, format_date, HotjarClient, HotjarClientBuilder};
pub use auth::{AccessTokenProvider, TokenCache, TokenManager};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use webhook::{webhook_router, WebhookFilter, WebhookServer};
