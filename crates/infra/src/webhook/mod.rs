//! Webhook receiver
//!
//! Hotjar webhooks are registered by hand in the Hotjar dashboard; this
//! module only receives them. [`WebhookFilter`] decides whether a call is for
//! the configured event and [`webhook_router`] exposes it over HTTP.

pub mod filter;
pub mod server;

pub use filter::WebhookFilter;
pub use server::{webhook_router, WebhookServer};
