//! Downloader module containing the transfer engine, the batch orchestrator,
//! the builder and the configuration.
//!
//! # Overview
//!
//! - `downloader` - The [`Downloader`] and the run of a single task
//! - `transfer` - Skip decision, resumed transfer, verification and marking
//! - `batch` - Bounded concurrent runs over many tasks
//! - `builder` - [`DownloaderBuilder`] for configuring a downloader
//! - `config` - Configuration structures and defaults
//! - `lifecycle` - Hooks fired around each run
//!
//! # Examples
//!
//! ## Batch Usage
//!
//! ```rust,no_run
//! use stashget::download::Tasks;
//! use stashget::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), stashget::Error> {
//! let downloader = DownloaderBuilder::new().concurrent_downloads(4).build()?;
//!
//! let mut tasks = Tasks::new();
//! tasks.add("https://example.com/file1.zip", "downloads/file1.zip");
//! tasks.add("https://example.com/file2.pdf", "downloads/file2.pdf");
//!
//! downloader.batch(&mut tasks).await;
//! if let Some(errors) = tasks.errors() {
//!     for (link, err) in errors {
//!         eprintln!("{}: {}", link, err);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Map Usage
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use stashget::downloader::Downloader;
//!
//! # async fn example() -> Result<(), stashget::Error> {
//! let downloader = Downloader::new_default()?;
//! let mut downloads = HashMap::new();
//! downloads.insert("https://example.com/a.bin", "a.bin");
//!
//! assert!(downloader.batch_map(downloads).await.is_none());
//! # Ok(())
//! # }
//! ```

mod batch;
pub mod builder;
pub mod config;
pub mod downloader;
pub mod lifecycle;
mod transfer;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, ProbePolicy, DEFAULT_USER_AGENT};
pub use downloader::Downloader;
pub use lifecycle::{ChannelLifecycle, Lifecycle, LifecycleEvent};
