//! Lifecycle hooks fired by the engine around each run.
//!
//! A run that transfers fires [`Lifecycle::before_start`] and then exactly one
//! [`Lifecycle::after_stop`], even when it fails early. A run that skips fires
//! [`Lifecycle::on_skip`] only.
//!
//! # Examples
//!
//! Observing runs through a channel:
//!
//! ```rust
//! use stashget::downloader::{ChannelLifecycle, DownloaderBuilder, LifecycleEvent};
//!
//! # fn example() -> Result<(), stashget::Error> {
//! let (hooks, mut events) = ChannelLifecycle::new();
//! let downloader = DownloaderBuilder::new().lifecycle(hooks).build()?;
//! // ... run downloads, then drain `events`.
//! # Ok(())
//! # }
//! ```

use crate::download::Task;
use crate::error::Error;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Observer of task runs. Every method defaults to doing nothing.
///
/// Hooks run inline on the worker driving the task, so they should return
/// quickly.
pub trait Lifecycle: Send + Sync {
    /// Called before the transfer of `task` starts.
    fn before_start(&self, _task: &Task) {}

    /// Called instead of the start/stop pair when `task` is skipped.
    fn on_skip(&self, _task: &Task) {}

    /// Called once the run of `task` stopped, with its error if it failed.
    fn after_stop(&self, _task: &Task, _error: Option<&Error>) {}
}

impl<L: Lifecycle + ?Sized> Lifecycle for Arc<L> {
    fn before_start(&self, task: &Task) {
        (**self).before_start(task)
    }

    fn on_skip(&self, task: &Task) {
        (**self).on_skip(task)
    }

    fn after_stop(&self, task: &Task, error: Option<&Error>) {
        (**self).after_stop(task, error)
    }
}

/// A lifecycle event, as sent by [`ChannelLifecycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started {
        link: String,
        path: PathBuf,
    },
    Skipped {
        link: String,
        path: PathBuf,
    },
    Stopped {
        link: String,
        path: PathBuf,
        /// Rendered error, `None` on success.
        error: Option<String>,
    },
}

impl LifecycleEvent {
    /// Link of the task the event is about.
    pub fn link(&self) -> &str {
        match self {
            LifecycleEvent::Started { link, .. }
            | LifecycleEvent::Skipped { link, .. }
            | LifecycleEvent::Stopped { link, .. } => link,
        }
    }
}

/// Forwards lifecycle hooks as [`LifecycleEvent`]s over an unbounded channel.
///
/// Events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelLifecycle {
    sender: UnboundedSender<LifecycleEvent>,
}

impl ChannelLifecycle {
    /// Creates the hook and the receiving end of its channel.
    pub fn new() -> (Self, UnboundedReceiver<LifecycleEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    fn send(&self, event: LifecycleEvent) {
        let _ = self.sender.send(event);
    }
}

impl Lifecycle for ChannelLifecycle {
    fn before_start(&self, task: &Task) {
        self.send(LifecycleEvent::Started {
            link: task.link().to_string(),
            path: task.path().to_path_buf(),
        });
    }

    fn on_skip(&self, task: &Task) {
        self.send(LifecycleEvent::Skipped {
            link: task.link().to_string(),
            path: task.path().to_path_buf(),
        });
    }

    fn after_stop(&self, task: &Task, error: Option<&Error>) {
        self.send(LifecycleEvent::Stopped {
            link: task.link().to_string(),
            path: task.path().to_path_buf(),
            error: error.map(|e| e.to_string()),
        });
    }
}
