//! Hotjar REST API client
//!
//! - [`client`]: authenticated request executor and error mapping
//! - [`pagination`]: cursor paginator on top of the executor
//! - [`query`]: pure query-parameter normalization
//!
//! Resource paths (`/sites/{id}/surveys`, ...) are supplied by callers; this
//! module knows nothing about individual endpoints.

pub mod client;
pub mod pagination;
pub mod query;

pub use client::{HotjarClient, HotjarClientBuilder};
pub use query::{build_query_params, format_date, to_snake_case};
