//! HTTP client setup and middleware configuration.
//!
//! The client is the transport collaborator of the engine: connection
//! pooling, TLS and redirects are all left to reqwest. Requests are traced
//! with `reqwest-tracing`; transient failures are retried at this layer only
//! when the caller asks for it, the engine itself never retries.
//!
//! # Examples
//!
//! ```rust
//! use stashget::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     retries: 2,
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Number of transport-level retries for transient failures.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers for every request. Headers configured on the
    /// downloader are set per request and take precedence.
    pub headers: Option<HeaderMap>,
}

/// Creates an HTTP client with middleware configuration.
///
/// The retry middleware is only installed when `retries` is non-zero.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());

    if config.retries > 0 {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    Ok(builder.build())
}
