//! Main export command

use crate::executor::{admit_candidate, Admission};
use crate::index::DestinationIndex;
use crate::platform::{default_notifier, default_revealer, Notifier, Revealer};
use crate::scanner::{scan_bundles, CandidateFilter};
use crate::types::{ExportError, RunOutcome, RunStatus};
use crate::Config;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub const EXPORT_FAILED: &str = "Export failed";
pub const EXPORT_COMPLETE: &str = "Export complete";
pub const NO_CANDIDATES: &str = "No images to export";
pub const DUPLICATES_SKIPPED: &str = "Skipped duplicates";
pub const COPIES_FAILED: &str = "Some images were not copied";

/// Runs one export: index destination, scan source, admit candidates, report
///
/// Single-threaded and strictly sequential. Two engines running against the
/// same destination at once can pick the same index; the later copy then
/// fails instead of replacing the earlier file.
pub struct SyncEngine<'a> {
    config: &'a Config,
    notifier: &'a dyn Notifier,
    revealer: &'a dyn Revealer,
}

impl<'a> SyncEngine<'a> {
    pub fn new(config: &'a Config, notifier: &'a dyn Notifier, revealer: &'a dyn Revealer) -> Self {
        Self {
            config,
            notifier,
            revealer,
        }
    }

    /// Run the export
    ///
    /// Never fails: fatal problems become a notification and an outcome
    /// whose status says where the run stopped.
    pub fn run(&self) -> RunOutcome {
        let start_time = Instant::now();
        let config = self.config;
        info!(
            source = %config.source.display(),
            destination = %config.destination.display(),
            "export started"
        );

        let mut index =
            match DestinationIndex::initialize(&config.destination, &config.image_extension) {
                Ok(index) => index,
                Err(e) => {
                    error!("{}", e);
                    let (title, body) = destination_failure_message(&config.destination, &e);
                    self.notifier.notify(title, &body);
                    return RunOutcome::stopped(RunStatus::DestinationUnavailable);
                }
            };

        let filter = CandidateFilter::from_config(config);
        let mut candidates = match scan_bundles(&config.source, &filter) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("{}", e);
                let (title, body) = source_failure_message();
                self.notifier.notify(title, body);
                return RunOutcome::stopped(RunStatus::SourceUnavailable);
            }
        };

        if candidates.is_empty() {
            info!("no candidates found");
            let (title, body) = no_candidates_message();
            self.notifier.notify(title, body);
            return RunOutcome::stopped(RunStatus::NoCandidates);
        }

        candidates.sort();

        let mut outcome = RunOutcome::default();
        let mut copy_errors: Vec<ExportError> = Vec::new();

        for candidate in &candidates {
            let admission = admit_candidate(candidate, &mut index);
            debug!(path = %candidate.path.display(), result = admission.label(), "candidate processed");

            match admission {
                Admission::Copied {
                    index: n,
                    dest,
                    bytes_copied,
                } => {
                    info!(
                        "Copied {} -> {} ({} bytes)",
                        candidate.path.display(),
                        dest.display(),
                        bytes_copied
                    );
                    outcome.copied += 1;
                    outcome.admitted.push((candidate.path.clone(), n));
                }
                Admission::Duplicate { digest } => {
                    debug!(%digest, "duplicate content skipped");
                    outcome.skipped_duplicates += 1;
                }
                Admission::Unreadable(e) => {
                    warn!("{}", e);
                    outcome.unreadable += 1;
                }
                Admission::CopyFailed(e) => {
                    warn!("{}", e);
                    outcome.failed_copies += 1;
                    copy_errors.push(e);
                }
            }
        }

        self.report(&outcome, copy_errors.first());
        self.revealer.reveal(&config.destination);

        info!(
            copied = outcome.copied,
            skipped_duplicates = outcome.skipped_duplicates,
            unreadable = outcome.unreadable,
            failed_copies = outcome.failed_copies,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "export finished"
        );

        outcome
    }

    fn report(&self, outcome: &RunOutcome, first_copy_error: Option<&ExportError>) {
        let (title, body) = completion_message(outcome.copied, &self.config.destination);
        self.notifier.notify(title, &body);

        if let Some((title, body)) = duplicates_message(outcome.skipped_duplicates) {
            self.notifier.notify(title, &body);
        }

        if let Some((title, body)) = copy_failures_message(outcome.failed_copies, first_copy_error)
        {
            self.notifier.notify(title, &body);
        }
    }
}

/// Run an export with the platform's notifier and revealer
pub fn run_export(config: &Config) -> RunOutcome {
    let notifier = default_notifier();
    let revealer = default_revealer(config.reveal);
    SyncEngine::new(config, notifier.as_ref(), revealer.as_ref()).run()
}

/// Tell the user that no export could start because the settings are unusable
pub fn notify_config_failure(notifier: &dyn Notifier, error: &ExportError) {
    let (title, body) = config_failure_message(error);
    notifier.notify(title, &body);
}

fn config_failure_message(error: &ExportError) -> (&'static str, String) {
    (
        EXPORT_FAILED,
        format!("Cannot start the export: {}", error.reason()),
    )
}

fn destination_failure_message(destination: &Path, error: &ExportError) -> (&'static str, String) {
    let body = match error {
        ExportError::IndexExhausted { .. } => format!(
            "Cannot number new images in {}: {}",
            destination.display(),
            error.reason()
        ),
        _ => format!(
            "Cannot create destination {}: {}",
            destination.display(),
            error.reason()
        ),
    };
    (EXPORT_FAILED, body)
}

fn source_failure_message() -> (&'static str, &'static str) {
    (EXPORT_FAILED, "Cannot access the Passes directory")
}

fn no_candidates_message() -> (&'static str, &'static str) {
    (
        NO_CANDIDATES,
        "Check that Wallet cards exist or whether the file name has changed",
    )
}

fn completion_message(copied: usize, destination: &Path) -> (&'static str, String) {
    (
        EXPORT_COMPLETE,
        format!(
            "Copied {} new image(s) to {}",
            copied,
            destination.display()
        ),
    )
}

fn duplicates_message(skipped: usize) -> Option<(&'static str, String)> {
    (skipped > 0).then(|| {
        (
            DUPLICATES_SKIPPED,
            format!("Found {} duplicate image(s)", skipped),
        )
    })
}

fn copy_failures_message(
    failed: usize,
    first_error: Option<&ExportError>,
) -> Option<(&'static str, String)> {
    if failed == 0 {
        return None;
    }
    let body = match first_error {
        Some(e) => format!("{} image(s) failed to copy: {}", failed, e.reason()),
        None => format!("{} image(s) failed to copy", failed),
    };
    Some((COPIES_FAILED, body))
}
