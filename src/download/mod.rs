//! Task model.
//!
//! This module holds what a download run operates on and produces:
//!
//! - [`task`] - The [`Task`] unit, a link and a local path plus the result of its last run
//! - [`collection`] - [`Tasks`], an ordered set of tasks deduplicated by `(link, path)`
//! - [`outcome`] - What a successful run did ([`Outcome`], [`SkipReason`])
//! - [`marker`] - The `.ok` completion marker written next to finished files
//!
//! # Examples
//!
//! ```rust
//! use stashget::download::Tasks;
//!
//! let mut tasks = Tasks::new();
//! tasks.add("https://example.com/one.bin", "out/one.bin");
//! tasks.add("https://example.com/two.bin", "out/two.bin");
//!
//! for task in &tasks {
//!     println!("{} -> {:?}", task.link(), task.path());
//! }
//! ```

pub mod collection;
pub mod marker;
pub mod outcome;
pub mod task;

pub use collection::Tasks;
pub use outcome::{Outcome, SkipReason};
pub use task::Task;
