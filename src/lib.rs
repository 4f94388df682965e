//! Stashget is a crate for downloading many files concurrently over HTTP(S),
//! resuming partial files and skipping the ones already complete.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stashget::{DownloaderBuilder, Error, Tasks};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let mut tasks = Tasks::new();
//! tasks.add(
//!     "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip",
//!     "output/reqwest-0.11.9.zip",
//! );
//!
//! let downloader = DownloaderBuilder::new().concurrent_downloads(8).build()?;
//! downloader.batch(&mut tasks).await;
//!
//! if let Some(errors) = tasks.errors() {
//!     for (link, err) in errors {
//!         eprintln!("{} failed: {}", link, err);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A completed file gets an empty `<path>.ok` marker next to it. Later runs
//! skip any task whose marker exists, so re-running a batch only fetches what
//! is missing.
//!
//! # Module Organization
//!
//! - [`download`] - The `Task` model, the deduplicated `Tasks` collection and the completion marker
//! - [`downloader`] - The `Downloader`, its builder, configuration and lifecycle hooks
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client creation
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Shared utility functions

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::{Outcome, SkipReason, Task, Tasks};
pub use downloader::{
    ChannelLifecycle, Downloader, DownloaderBuilder, Lifecycle, LifecycleEvent, ProbePolicy,
};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
