//! HTTP client functionality.
//!
//! - [`client`] - Client creation with tracing and optional retry middleware

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
