//! Notification and reveal capabilities
//!
//! The export core only sees these two traits. Both are fire-and-forget:
//! implementations log their own failures and never report back.

mod osascript;
mod reveal;

use std::path::Path;
use tracing::info;

pub use osascript::{applescript_escape, OsascriptNotifier};
pub use reveal::SystemRevealer;

/// Shows a user-facing message
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Opens a directory in the platform file browser
pub trait Revealer {
    fn reveal(&self, path: &Path);
}

/// Notifier that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// Revealer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevealer;

impl Revealer for NoopRevealer {
    fn reveal(&self, _path: &Path) {}
}

/// Notifier that writes messages to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(title, "{}", body);
    }
}

/// Native notifier for this platform
pub fn default_notifier() -> Box<dyn Notifier> {
    if cfg!(target_os = "macos") {
        Box::new(OsascriptNotifier)
    } else {
        Box::new(LogNotifier)
    }
}

/// Revealer honouring the `reveal` setting
pub fn default_revealer(reveal: bool) -> Box<dyn Revealer> {
    if reveal {
        Box::new(SystemRevealer)
    } else {
        Box::new(NoopRevealer)
    }
}
