//! macOS notifications through `osascript`

use super::Notifier;
use std::process::Command;
use tracing::{debug, warn};

/// Posts a Notification Center banner by running AppleScript
///
/// If the user has not allowed notifications the banner is silently
/// dropped by the system; nothing here can tell the difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsascriptNotifier;

impl OsascriptNotifier {
    /// AppleScript source for one notification
    pub fn script(title: &str, body: &str) -> String {
        format!(
            "display notification \"{}\" with title \"{}\"",
            applescript_escape(body),
            applescript_escape(title)
        )
    }
}

impl Notifier for OsascriptNotifier {
    fn notify(&self, title: &str, body: &str) {
        let output = Command::new("osascript")
            .arg("-e")
            .arg(Self::script(title, body))
            .output();

        match output {
            Ok(output) if output.status.success() => debug!(title, "notification posted"),
            Ok(output) => warn!(
                "Notification failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) => warn!("Failed to execute osascript: {}", e),
        }
    }
}

/// Escape a string for use inside an AppleScript string literal
pub fn applescript_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(applescript_escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(applescript_escape("line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn test_script_places_body_and_title() {
        let script = OsascriptNotifier::script("Export complete", "Copied 2 new image(s)");
        assert_eq!(
            script,
            "display notification \"Copied 2 new image(s)\" with title \"Export complete\""
        );
    }
}
