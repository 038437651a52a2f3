//! Sequential bundle walker

use super::CandidateFilter;
use crate::types::{CandidateFile, ExportError};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Scan a source tree for candidate files
///
/// Walks `root_path` recursively, skipping hidden entries at every level,
/// and keeps every regular file accepted by `filter`.
///
/// # Arguments
/// * `root_path` - The directory holding the pass bundles
/// * `filter` - Bundle + name predicate
///
/// # Returns
/// * `Ok(Vec<CandidateFile>)` - Matching files in traversal order (unsorted, possibly empty)
/// * `Err(ExportError::SourceUnavailable)` - root missing, not a directory, or unreadable
///
/// # Errors
/// * Errors on entries below the root are logged and skipped; the scan continues
pub fn scan_bundles(
    root_path: &Path,
    filter: &CandidateFilter,
) -> Result<Vec<CandidateFile>, ExportError> {
    let start_time = Instant::now();

    // The walker reports an unreadable root as an ordinary entry error,
    // so probe it up front.
    fs::read_dir(root_path).map_err(|source| ExportError::SourceUnavailable {
        path: root_path.to_path_buf(),
        source,
    })?;

    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .build();

    let mut candidates = Vec::new();
    let mut files_seen: u64 = 0;

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Error during directory traversal: {}. Scan will continue with remaining files.",
                    e
                );
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if !is_file {
            continue;
        }
        files_seen += 1;

        let path = entry.path();
        let in_bundle = filter.is_in_bundle(path);
        if in_bundle && filter.is_target(path) {
            debug!(path = %path.display(), "candidate found");
            candidates.push(CandidateFile::new(path.to_path_buf(), in_bundle));
        }
    }

    debug!(
        root = %root_path.display(),
        files_seen,
        candidates = candidates.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "scan finished"
    );

    Ok(candidates)
}
