//! Error types for cardex

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source root cannot be opened for traversal
    #[error("Cannot access source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Destination root cannot be created or listed
    #[error("Cannot access destination {}: {source}", path.display())]
    DestinationUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Numbering in the destination has no unused index left
    #[error("No free index left in {}", path.display())]
    IndexExhausted { path: PathBuf },

    /// A single file could not be read for hashing
    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A single admitted file could not be copied
    #[error("Cannot copy {} to {}: {source}", path.display(), dest.display())]
    CopyFailed {
        path: PathBuf,
        dest: PathBuf,
        source: std::io::Error,
    },
}

impl ExportError {
    /// Underlying IO error, if any
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            ExportError::SourceUnavailable { source: e, .. }
            | ExportError::DestinationUnavailable { source: e, .. }
            | ExportError::Unreadable { source: e, .. }
            | ExportError::CopyFailed { source: e, .. } => Some(e),
            ExportError::Config(_) | ExportError::IndexExhausted { .. } => None,
        }
    }

    /// Plain-English reason suitable for a notification body
    pub fn reason(&self) -> String {
        match self.io_error() {
            Some(io) => match io.kind() {
                ErrorKind::NotFound => "file or directory was not found".to_string(),
                ErrorKind::PermissionDenied => "permission denied".to_string(),
                ErrorKind::AlreadyExists => "a conflicting file already exists".to_string(),
                ErrorKind::WriteZero | ErrorKind::UnexpectedEof => {
                    "the transfer was interrupted".to_string()
                }
                _ if io.raw_os_error() == Some(28) => "not enough disk space".to_string(),
                _ => io.to_string(),
            },
            None => match self {
                ExportError::IndexExhausted { .. } => "no free file number left".to_string(),
                _ => self.to_string(),
            },
        }
    }
}
