//! Executor module: per-candidate admission

pub mod copy;

use crate::hash::compute_hash;
use crate::index::DestinationIndex;
use crate::types::{CandidateFile, ContentDigest, ExportError};
use std::path::PathBuf;

pub use copy::copy_file_atomic;

/// What happened to one candidate
#[derive(Debug)]
pub enum Admission {
    /// Copied under a freshly allocated index
    Copied {
        index: u64,
        dest: PathBuf,
        bytes_copied: u64,
    },

    /// Content already present; no copy, no index consumed
    Duplicate { digest: ContentDigest },

    /// Could not be read for hashing
    Unreadable(ExportError),

    /// Hashed and new, but the copy failed; no index consumed
    CopyFailed(ExportError),
}

impl Admission {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Admission::Copied { .. } => "Copied",
            Admission::Duplicate { .. } => "Duplicate",
            Admission::Unreadable(_) => "Unreadable",
            Admission::CopyFailed(_) => "CopyFailed",
        }
    }
}

/// Decide and carry out admission of a single candidate
///
/// The index is only mutated after a successful copy, so a failed copy
/// leaves no gap and its content stays eligible later in the run. Once the
/// numbering is exhausted every new content is refused as a copy failure.
pub fn admit_candidate(candidate: &CandidateFile, index: &mut DestinationIndex) -> Admission {
    let digest = match compute_hash(candidate.path()) {
        Ok(digest) => digest,
        Err(e) => return Admission::Unreadable(e),
    };

    if index.contains(&digest) {
        return Admission::Duplicate { digest };
    }

    let next = match index.reserve() {
        Ok(next) => next,
        Err(e) => return Admission::CopyFailed(e),
    };
    let dest = index.output_path(next);

    let bytes_copied = match copy_file_atomic(candidate.path(), &dest) {
        Ok(bytes) => bytes,
        Err(e) => return Admission::CopyFailed(e),
    };

    match index.record(digest) {
        Ok(used) => Admission::Copied {
            index: used,
            dest,
            bytes_copied,
        },
        Err(e) => Admission::CopyFailed(e),
    }
}
