//! Represents one link to path download unit.

use super::outcome::Outcome;
use crate::error::{Error, Result};

use reqwest::Url;
use std::path::{Path, PathBuf};

/// One download unit: a link, the local path it lands at, and the result of
/// the last run.
///
/// The link and path never change once the task exists. The result is written
/// by the engine, once per run.
///
/// ```rust
/// use stashget::download::Task;
///
/// let task = Task::new("https://example.com/file.bin", "/tmp/file.bin");
/// assert_eq!(task.link(), "https://example.com/file.bin");
/// assert!(task.error().is_none());
/// assert!(!task.is_finished());
/// ```
#[derive(Debug)]
pub struct Task {
    link: String,
    path: PathBuf,
    outcome: Option<Outcome>,
    error: Option<Error>,
}

impl Task {
    /// Creates a new [`Task`].
    ///
    /// The link is not validated here; a malformed link fails the run.
    pub fn new(link: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            link: link.into(),
            path: path.into(),
            outcome: None,
            error: None,
        }
    }

    /// Link of the resource.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Destination of the resource.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Error of the last run, `None` on success or if the task never ran.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Outcome of the last run if it succeeded.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns `true` once a run has recorded its result.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some() || self.error.is_some()
    }

    /// Returns `true` if the last run succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_some()
    }

    /// Parses the link.
    pub(crate) fn url(&self) -> Result<Url> {
        Url::parse(&self.link).map_err(|e| {
            Error::InvalidUrl(format!("the url \"{}\" cannot be parsed: {}", self.link, e))
        })
    }

    /// Human readable label for progress output: the decoded last path
    /// segment of the link, or the link itself.
    pub(crate) fn label(&self) -> String {
        self.url()
            .ok()
            .and_then(|url| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back().map(String::from))
            })
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                urlencoding::decode(&segment)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or(segment)
            })
            .unwrap_or_else(|| self.link.clone())
    }

    /// Copy of the identity of this task, without any result.
    pub(crate) fn identity(&self) -> Task {
        Task::new(self.link.clone(), self.path.clone())
    }

    /// Records the result of a run, replacing the previous one.
    pub(crate) fn record(&mut self, result: Result<Outcome>) {
        match result {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.error = None;
            }
            Err(e) => {
                self.outcome = None;
                self.error = Some(e);
            }
        }
    }

    /// Takes the error out of a finished task.
    pub(crate) fn into_error(self) -> Option<Error> {
        self.error
    }
}
