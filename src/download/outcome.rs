//! Terminal outcome of a successful task run.

/// Why the engine decided not to transfer anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The completion marker was already on disk.
    Marker,
    /// The local file already had the size the server declared; the marker
    /// was created on the way out.
    SizeMatch,
}

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was transferred.
    Skipped(SkipReason),
    /// Bytes were streamed to disk and verified.
    Downloaded {
        /// Bytes written during this run.
        written: u64,
        /// Offset the transfer started from, `0` unless the run resumed.
        resumed_from: u64,
    },
}

impl Outcome {
    /// Returns `true` if the run skipped the transfer.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    /// Final size of the destination for a completed transfer.
    pub fn total(&self) -> Option<u64> {
        match self {
            Outcome::Skipped(_) => None,
            Outcome::Downloaded {
                written,
                resumed_from,
            } => Some(written + resumed_from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_total() {
        let resumed = Outcome::Downloaded {
            written: 24,
            resumed_from: 1000,
        };
        assert_eq!(resumed.total(), Some(1024));
        assert!(!resumed.is_skipped());

        let skipped = Outcome::Skipped(SkipReason::Marker);
        assert!(skipped.is_skipped());
        assert_eq!(skipped.total(), None);
    }
}
