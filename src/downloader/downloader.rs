//! The download controller and the run of a single task.
//!
//! # Examples
//!
//! ```rust,no_run
//! use stashget::download::Task;
//! use stashget::downloader::DownloaderBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), stashget::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .timeout(Duration::from_secs(3))
//!     .build()?;
//!
//! let mut task = Task::new("https://example.com/file.bin", "file.bin");
//! let link = task.link().to_string();
//! if let Some(err) = downloader.download(&mut task).await {
//!     eprintln!("{} failed: {}", link, err);
//! }
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::lifecycle::Lifecycle;
use crate::download::{Outcome, Task};
use crate::error::{Error, Result};
use crate::progress::ProgressDisplay;

use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Represents the download controller.
///
/// Cloning is cheap: the HTTP client and the hooks are shared.
///
/// ```rust
/// use stashget::downloader::Downloader;
///
/// let d = Downloader::new_default().unwrap();
/// assert_eq!(d.concurrent_downloads(), 32);
/// ```
#[derive(Clone)]
pub struct Downloader {
    pub(super) config: DownloaderConfig,
    pub(super) client: ClientWithMiddleware,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    pub(crate) fn new(config: DownloaderConfig, client: ClientWithMiddleware) -> Self {
        Self { config, client }
    }

    /// Creates a downloader with the default configuration.
    pub fn new_default() -> Result<Self> {
        super::DownloaderBuilder::new().build()
    }

    /// Gets the configured concurrency ceiling.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the per-task timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    /// Gets whether partial files are resumed.
    pub fn resumable(&self) -> bool {
        self.config.resumable
    }

    /// Gets the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.config.headers
    }

    /// Gets the full configuration.
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Runs `task` and records its result on it.
    ///
    /// Returns the error of the run, `None` on success.
    pub async fn download<'t>(&self, task: &'t mut Task) -> Option<&'t Error> {
        self.download_with_cancel(task, &CancellationToken::new())
            .await
    }

    /// Like [`Downloader::download`], also stopping when `cancel` fires.
    pub async fn download_with_cancel<'t>(
        &self,
        task: &'t mut Task,
        cancel: &CancellationToken,
    ) -> Option<&'t Error> {
        let progress = ProgressDisplay::new(self.config.style_options.clone(), 1);
        let result = self.run(task, cancel, &progress).await;
        progress.finish();
        task.record(result);
        task.error()
    }

    /// Downloads `link` to `path` without a [`Task`] to record on.
    pub async fn fetch(&self, link: &str, path: impl Into<PathBuf>) -> Result<Outcome> {
        let task = Task::new(link, path);
        let progress = ProgressDisplay::new(self.config.style_options.clone(), 1);
        let result = self.run(&task, &CancellationToken::new(), &progress).await;
        progress.finish();
        result
    }

    /// One run of the state machine: skip decision, then transfer.
    ///
    /// Both steps share the task deadline. Hooks fire around the run.
    pub(crate) async fn run(
        &self,
        task: &Task,
        cancel: &CancellationToken,
        progress: &ProgressDisplay,
    ) -> Result<Outcome> {
        let deadline = self.config.timeout.map(|timeout| Instant::now() + timeout);

        let url = match task.url() {
            Ok(url) => url,
            Err(e) => return self.stop_early(task, e),
        };

        match self
            .bounded(deadline, cancel, self.should_skip(task, &url))
            .await
        {
            Ok(Some(reason)) => {
                debug!("Skipping {} ({:?})", task.link(), reason);
                if let Some(hooks) = self.hooks() {
                    hooks.on_skip(task);
                }
                return Ok(Outcome::Skipped(reason));
            }
            Ok(None) => {}
            Err(e) => return self.stop_early(task, e),
        }

        if let Some(hooks) = self.hooks() {
            hooks.before_start(task);
        }
        let result = self
            .bounded(deadline, cancel, self.transfer(task, &url, progress))
            .await;
        if let Some(hooks) = self.hooks() {
            hooks.after_stop(task, result.as_ref().err());
        }
        result
    }

    /// Reports a failure that happened before the transfer started.
    pub(super) fn stop_early(&self, task: &Task, error: Error) -> Result<Outcome> {
        if let Some(hooks) = self.hooks() {
            hooks.before_start(task);
            hooks.after_stop(task, Some(&error));
        }
        Err(error)
    }

    /// Races `fut` against the deadline and the cancellation token.
    ///
    /// Losing the race drops `fut`, which aborts its in-flight request.
    async fn bounded<T>(
        &self,
        deadline: Option<Instant>,
        cancel: &CancellationToken,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let timed = async {
            match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout(self.config.timeout.unwrap_or_default())),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = timed => result,
        }
    }

    fn hooks(&self) -> Option<&dyn Lifecycle> {
        self.config.lifecycle.as_deref()
    }
}
