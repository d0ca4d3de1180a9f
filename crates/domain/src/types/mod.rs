//! Domain types and models

pub mod auth;
pub mod pagination;
pub mod webhook;

pub use auth::{CachedToken, Credentials, TokenResponse};
pub use pagination::PaginatedResponse;
pub use webhook::{WebhookDelivery, WebhookEvent};
