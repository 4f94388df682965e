//! Concurrent runs over many tasks.
//!
//! A batch runs every task, never stopping at the first failure, with at most
//! [`Downloader::concurrent_downloads`] transfers in flight. Every worker runs
//! on its own copy of a task's link and path; only the collector writes results
//! back, once per task.

use super::downloader::Downloader;
use crate::download::{Task, Tasks};
use crate::error::Error;
use crate::progress::ProgressDisplay;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;

impl Downloader {
    /// Runs every task of `tasks` and records each result on its task.
    ///
    /// Use [`Tasks::errors`] or [`Tasks::failed`] afterwards to inspect the
    /// failures.
    pub async fn batch(&self, tasks: &mut Tasks) {
        self.batch_with_cancel(tasks, &CancellationToken::new())
            .await
    }

    /// Like [`Downloader::batch`], stopping every task when `cancel` fires.
    ///
    /// Tasks still waiting for a slot at that point fail with
    /// [`Error::Cancelled`].
    pub async fn batch_with_cancel(&self, tasks: &mut Tasks, cancel: &CancellationToken) {
        self.run_batch(tasks.as_mut_slice(), cancel).await
    }

    /// Downloads every `link -> path` entry.
    ///
    /// Returns the errors keyed by link, or `None` when every entry succeeded.
    pub async fn batch_map<L, P>(&self, downloads: HashMap<L, P>) -> Option<HashMap<String, Error>>
    where
        L: Into<String>,
        P: Into<PathBuf>,
    {
        let mut tasks: Vec<Task> = downloads
            .into_iter()
            .map(|(link, path)| Task::new(link, path))
            .collect();
        self.run_batch(&mut tasks, &CancellationToken::new()).await;

        let errors: HashMap<String, Error> = tasks
            .into_iter()
            .filter_map(|task| {
                let link = task.link().to_string();
                task.into_error().map(|e| (link, e))
            })
            .collect();
        (!errors.is_empty()).then_some(errors)
    }

    /// Downloads `(link, path)` pairs.
    ///
    /// Returns the failed links with their errors in the order the pairs were
    /// given, or `None` when every pair succeeded. Pairs are not deduplicated.
    pub async fn batch_in_order<I, L, P>(&self, downloads: I) -> Option<Vec<(String, Error)>>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<PathBuf>,
    {
        let mut tasks: Vec<Task> = downloads
            .into_iter()
            .map(|(link, path)| Task::new(link, path))
            .collect();
        self.run_batch(&mut tasks, &CancellationToken::new()).await;

        let errors: Vec<(String, Error)> = tasks
            .into_iter()
            .filter_map(|task| {
                let link = task.link().to_string();
                task.into_error().map(|e| (link, e))
            })
            .collect();
        (!errors.is_empty()).then_some(errors)
    }

    async fn run_batch(&self, tasks: &mut [Task], cancel: &CancellationToken) {
        if tasks.is_empty() {
            return;
        }

        let slots = Arc::new(Semaphore::new(self.concurrent_downloads().max(1)));
        let progress = Arc::new(ProgressDisplay::new(
            self.config.style_options.clone(),
            tasks.len(),
        ));

        let mut workers = JoinSet::new();
        let mut indices = HashMap::with_capacity(tasks.len());
        for (index, task) in tasks.iter().enumerate() {
            let downloader = self.clone();
            let slots = Arc::clone(&slots);
            let progress = Arc::clone(&progress);
            let cancel = cancel.clone();
            let task = task.identity();

            let handle = workers.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return downloader.stop_early(&task, Error::Cancelled),
                    permit = slots.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(e) => return Err(Error::Internal(format!("download slots closed: {}", e))),
                    },
                };
                downloader.run(&task, &cancel, &progress).await
            });
            indices.insert(handle.id(), index);
        }

        let mut failed = 0usize;
        while let Some(joined) = workers.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (
                    e.id(),
                    Err(Error::Internal(format!("download worker failed: {}", e))),
                ),
            };
            progress.task_finished();
            if result.is_err() {
                failed += 1;
            }
            if let Some(&index) = indices.get(&id) {
                tasks[index].record(result);
            }
        }
        progress.finish();

        info!(
            "Finished a batch of {} downloads, {} failed",
            tasks.len(),
            failed
        );
    }
}
