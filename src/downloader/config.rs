//! Configuration structures and defaults for the downloader.

use super::lifecycle::Lifecycle;
use crate::http::HttpClientConfig;
use crate::progress::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use std::time::Duration;

/// User agent sent unless the caller configures another one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.72 Safari/537.36";

/// What to do when the metadata probe of a partially present file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbePolicy {
    /// Go on with a full or resumed download.
    #[default]
    FailOpen,
    /// Fail the task with the probe error.
    FailClosed,
}

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Headers set on every request, winning over client defaults.
    pub headers: HeaderMap,
    /// Settings used to build the HTTP client when none is injected.
    pub http: HttpClientConfig,
    /// Caller supplied HTTP client.
    pub client: Option<ClientWithMiddleware>,
    /// Number of maximum concurrent downloads in a batch.
    pub concurrent_downloads: usize,
    /// Deadline of each task run.
    pub timeout: Option<Duration>,
    /// Progress bar style options.
    pub style_options: StyleOptions,
    /// Resume partial files with range requests.
    pub resumable: bool,
    /// Behaviour when the metadata probe fails.
    pub probe_policy: ProbePolicy,
    /// Copy the remote `Last-Modified` onto the file.
    pub preserve_modified: bool,
    /// Lifecycle hooks.
    pub lifecycle: Option<Arc<dyn Lifecycle>>,
}

impl DownloaderConfig {
    pub const DEFAULT_CONCURRENT_DOWNLOADS: usize = 32;

    /// Header set of a default configuration.
    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("headers", &self.headers)
            .field("http", &self.http)
            .field("client", &self.client.is_some())
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("timeout", &self.timeout)
            .field("style_options", &self.style_options)
            .field("resumable", &self.resumable)
            .field("probe_policy", &self.probe_policy)
            .field("preserve_modified", &self.preserve_modified)
            .field("lifecycle", &self.lifecycle.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            headers: Self::default_headers(),
            http: HttpClientConfig::default(),
            client: None,
            concurrent_downloads: Self::DEFAULT_CONCURRENT_DOWNLOADS,
            timeout: None,
            style_options: StyleOptions::default(),
            resumable: true,
            probe_policy: ProbePolicy::default(),
            preserve_modified: true,
            lifecycle: None,
        }
    }
}
