//! Ordered, deduplicated set of tasks.

use super::task::Task;
use crate::error::Error;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// An ordered collection of [`Task`]s with no two tasks sharing the same
/// `(link, path)` pair.
///
/// Tasks can only be appended. A batch run borrows the collection and writes
/// each task's result back in place.
///
/// ```rust
/// use stashget::download::Tasks;
///
/// let mut tasks = Tasks::new();
/// assert!(tasks.add("https://example.com/a.bin", "a.bin"));
/// assert!(!tasks.add("https://example.com/a.bin", "a.bin"));
/// assert_eq!(tasks.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Tasks {
    list: Vec<Task>,
    seen: HashSet<(String, PathBuf)>,
}

impl Tasks {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new task unless the identical `(link, path)` pair is already
    /// present. Returns `true` if the task was added.
    pub fn add(&mut self, link: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let key = (link.into(), path.into());
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.list.push(Task::new(key.0, key.1));
        true
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if there are no tasks.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Task at `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.list.get(index)
    }

    /// Looks up the task for a `(link, path)` pair.
    pub fn find(&self, link: &str, path: &Path) -> Option<&Task> {
        self.list
            .iter()
            .find(|task| task.link() == link && task.path() == path)
    }

    /// Iterates over the tasks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.list.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Task] {
        &mut self.list
    }

    /// Tasks whose last run failed, or `None` if none did.
    pub fn failed(&self) -> Option<Vec<&Task>> {
        let failed: Vec<&Task> = self.list.iter().filter(|t| t.error().is_some()).collect();
        if failed.is_empty() {
            None
        } else {
            Some(failed)
        }
    }

    /// Errors keyed by link, or `None` if no task failed.
    ///
    /// When the same link is used for several paths only one of its errors is
    /// kept; use [`Tasks::failed`] to see all of them.
    pub fn errors(&self) -> Option<HashMap<&str, &Error>> {
        self.failed().map(|failed| {
            failed
                .into_iter()
                .filter_map(|task| task.error().map(|e| (task.link(), e)))
                .collect()
        })
    }

    /// Builds a fresh collection holding only the failed pairs, ready to be
    /// run again.
    pub fn retry_set(&self) -> Tasks {
        self.list
            .iter()
            .filter(|t| t.error().is_some())
            .map(|t| (t.link().to_string(), t.path().to_path_buf()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<L, P> Extend<(L, P)> for Tasks
where
    L: Into<String>,
    P: Into<PathBuf>,
{
    fn extend<I: IntoIterator<Item = (L, P)>>(&mut self, iter: I) {
        for (link, path) in iter {
            self.add(link, path);
        }
    }
}

impl<L, P> FromIterator<(L, P)> for Tasks
where
    L: Into<String>,
    P: Into<PathBuf>,
{
    fn from_iter<I: IntoIterator<Item = (L, P)>>(iter: I) -> Self {
        let mut tasks = Tasks::new();
        tasks.extend(iter);
        tasks
    }
}
