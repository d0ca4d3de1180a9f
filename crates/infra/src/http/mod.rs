//! Thin reqwest wrapper shared by the token manager and the API client.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
