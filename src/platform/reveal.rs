//! Open the destination in the system file browser

use super::Revealer;
use std::path::Path;
use tracing::{debug, warn};

/// Revealer backed by the `open` crate (Finder on macOS, xdg-open elsewhere)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRevealer;

impl Revealer for SystemRevealer {
    fn reveal(&self, path: &Path) {
        match open::that_detached(path) {
            Ok(()) => debug!(path = %path.display(), "revealed"),
            Err(e) => warn!("Failed to open {}: {}", path.display(), e),
        }
    }
}
