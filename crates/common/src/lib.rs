//! Cross-cutting utilities shared across the Hotjar client crates.
//!
//! - [`time`]: clock abstraction so token expiry can be tested without sleeping
//! - [`observability`]: tracing subscriber setup and the one-time notice

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod observability;
pub mod time;

pub use observability::{emit_license_notice_once, init_tracing};
pub use time::{Clock, MockClock, SystemClock};
