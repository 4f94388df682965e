//! Error handling for stashget.
//!
//! Every failure is local to the task it happened on: the engine records it on
//! the [`Task`](crate::download::Task) and the batch orchestrator hands it back to
//! the caller, it never aborts sibling transfers.

use indicatif::HumanBytes;
use reqwest::StatusCode;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can happen while fetching a task.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Used when a worker dies before reporting, or the admission limiter
    /// is closed under it.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The link could not be turned into a request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Creating, opening, statting or writing the destination failed.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, typically while streaming the body.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the HTTP client.
    #[error("Request error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a status the engine cannot use.
    #[error("response status code {} invalid", .0.as_u16())]
    Status(StatusCode),

    /// The written length differs from the declared length.
    #[error("expected {} but downloaded {}", HumanBytes(*expected), HumanBytes(*written))]
    Incomplete { expected: u64, written: u64 },

    /// The per-task deadline expired.
    #[error("download timed out after {0:?}")]
    Timeout(Duration),

    /// The run was cancelled by the caller.
    #[error("download cancelled")]
    Cancelled,

    /// The metadata probe failed and the probe policy is fail-closed.
    #[error("metadata probe failed: {0}")]
    ProbeFailed(String),
}

impl Error {
    /// Returns the HTTP status carried by a [`Error::Status`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for stashget operations.
pub type Result<T> = std::result::Result<T, Error>;
