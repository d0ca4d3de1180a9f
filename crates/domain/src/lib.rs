//! # Hotjar Domain
//!
//! Domain types and models for the Hotjar API client.
//!
//! This crate contains:
//! - Credential, token and pagination envelope types
//! - Webhook event types
//! - The `HotjarError` taxonomy and `Result` alias
//! - Configuration structures
//! - API constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; pure data structures and conversions

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
