//! Candidate predicate: inside a bundle AND named exactly like the target

use crate::config::Config;
use std::path::{Component, Path};

/// Structural + name filter applied to every regular file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    bundle_suffix: String,
    target_name: String,
}

impl CandidateFilter {
    pub fn new(bundle_suffix: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            bundle_suffix: bundle_suffix.into(),
            target_name: target_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bundle_suffix.clone(), config.target_name.clone())
    }

    /// True when some directory above the file ends with the bundle suffix
    ///
    /// Only directory components count: a file that is itself named
    /// `x.pkpass` is not "inside" a bundle.
    pub fn is_in_bundle(&self, path: &Path) -> bool {
        let Some(parent) = path.parent() else {
            return false;
        };

        parent.components().any(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|name| name.ends_with(&self.bundle_suffix)),
            _ => false,
        })
    }

    /// True when the base name equals the target name exactly (case-sensitive)
    pub fn is_target(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == self.target_name)
    }
}
