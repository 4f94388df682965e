//! Builder for [`Downloader`] instances.
//!
//! # Examples
//!
//! ```rust
//! use stashget::downloader::{DownloaderBuilder, ProbePolicy};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), stashget::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .concurrent_downloads(4)
//!     .timeout(Duration::from_secs(30))
//!     .probe_policy(ProbePolicy::FailClosed)
//!     .verbose(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::config::{DownloaderConfig, ProbePolicy};
use super::downloader::Downloader;
use super::lifecycle::Lifecycle;
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// use stashget::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().concurrent_downloads(3).build().unwrap();
/// assert_eq!(d.concurrent_downloads(), 3);
/// ```
#[derive(Debug, Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Set the number of concurrent downloads of a batch. `0` is treated as `1`.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads;
        self
    }

    /// Bound every task run by `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Show progress bars.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.style_options = if verbose {
            StyleOptions::visible()
        } else {
            StyleOptions::hidden()
        };
        self
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Resume partial files with range requests.
    pub fn resumable(mut self, resumable: bool) -> Self {
        self.config.resumable = resumable;
        self
    }

    /// Set what happens when the metadata probe fails.
    pub fn probe_policy(mut self, probe_policy: ProbePolicy) -> Self {
        self.config.probe_policy = probe_policy;
        self
    }

    /// Copy the remote `Last-Modified` time onto downloaded files.
    pub fn preserve_modified(mut self, preserve_modified: bool) -> Self {
        self.config.preserve_modified = preserve_modified;
        self
    }

    /// Set the lifecycle hooks.
    pub fn lifecycle(mut self, lifecycle: impl Lifecycle + 'static) -> Self {
        self.config.lifecycle = Some(Arc::new(lifecycle));
        self
    }

    /// Set the settings of the HTTP client built by [`build()`].
    ///
    /// Ignored when a client is injected with [`client()`].
    ///
    /// [`build()`]: DownloaderBuilder::build
    /// [`client()`]: DownloaderBuilder::client
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Use a caller supplied HTTP client.
    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.config.client = Some(client);
        self
    }

    /// Merge `headers` into the request headers.
    ///
    /// Headers given here replace the defaults of the same name, and win over
    /// the default headers of the HTTP client.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config.headers.extend(headers);
        self
    }

    /// Set a single request header.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use stashget::downloader::DownloaderBuilder;
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("curl/7.87"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(downloader.headers()[header::USER_AGENT], "curl/7.87");
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Drop every request header, including the default user agent.
    pub fn clear_headers(mut self) -> Self {
        self.config.headers.clear();
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn build(self) -> Result<Downloader> {
        let mut config = self.config;
        let client = match config.client.take() {
            Some(client) => client,
            None => create_http_client(config.http.clone())?,
        };
        Ok(Downloader::new(config, client))
    }
}
