//! RunOutcome - Summary of a single export run

use std::path::PathBuf;

/// Where a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// The admission loop ran to the end
    #[default]
    Completed,

    /// Destination could not be created or listed
    DestinationUnavailable,

    /// Source could not be opened for traversal
    SourceUnavailable,

    /// Source was readable but held no matching files
    NoCandidates,
}

/// Counters accumulated during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: RunStatus,

    /// Files copied under a new index
    pub copied: usize,

    /// Candidates whose content was already present
    pub skipped_duplicates: usize,

    /// Candidates that could not be read for hashing
    pub unreadable: usize,

    /// Candidates whose copy failed
    pub failed_copies: usize,

    /// (source path, assigned index) in admission order
    pub admitted: Vec<(PathBuf, u64)>,
}

impl RunOutcome {
    /// Outcome for a run that stopped before the admission loop
    pub fn stopped(status: RunStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Total candidates the loop looked at
    pub fn processed(&self) -> usize {
        self.copied + self.skipped_duplicates + self.unreadable + self.failed_copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_completed() {
        let outcome = RunOutcome::default();
        assert!(outcome.is_completed());
        assert_eq!(outcome.copied, 0);
        assert_eq!(outcome.processed(), 0);
        assert!(outcome.admitted.is_empty());
    }

    #[test]
    fn test_stopped_carries_status() {
        let outcome = RunOutcome::stopped(RunStatus::SourceUnavailable);
        assert_eq!(outcome.status, RunStatus::SourceUnavailable);
        assert!(!outcome.is_completed());
        assert_eq!(outcome.copied, 0);
    }

    #[test]
    fn test_processed_sums_all_counters() {
        let outcome = RunOutcome {
            copied: 2,
            skipped_duplicates: 3,
            unreadable: 1,
            failed_copies: 1,
            ..Default::default()
        };
        assert_eq!(outcome.processed(), 7);
    }
}
