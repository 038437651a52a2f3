//! CandidateFile - A source image found inside a pass bundle

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A file discovered by the scanner that may be admitted to the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Whether some ancestor directory is a bundle container
    pub in_bundle: bool,

    /// Base file name
    pub file_name: String,
}

impl CandidateFile {
    /// Create a new CandidateFile
    pub fn new(path: PathBuf, in_bundle: bool) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            in_bundle,
            file_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Admission order is lexicographic over the whole path string, not per component.
impl Ord for CandidateFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.as_os_str().cmp(other.path.as_os_str())
    }
}

impl PartialOrd for CandidateFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_extracts_file_name() {
        let candidate = CandidateFile::new(
            PathBuf::from("/cards/A.pkpass/cardBackgroundCombined@2x.png"),
            true,
        );

        assert_eq!(candidate.file_name, "cardBackgroundCombined@2x.png");
        assert!(candidate.in_bundle);
        assert_eq!(
            candidate.path(),
            Path::new("/cards/A.pkpass/cardBackgroundCombined@2x.png")
        );
    }

    #[test]
    fn test_sorts_by_path() {
        let mut candidates = vec![
            CandidateFile::new(PathBuf::from("/c/B.pkpass/x.png"), true),
            CandidateFile::new(PathBuf::from("/c/A.pkpass/x.png"), true),
            CandidateFile::new(PathBuf::from("/c/A.pkpass/deep/x.png"), true),
        ];
        candidates.sort();

        let paths: Vec<_> = candidates.iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/c/A.pkpass/deep/x.png"),
                PathBuf::from("/c/A.pkpass/x.png"),
                PathBuf::from("/c/B.pkpass/x.png"),
            ]
        );
    }

    #[test]
    fn test_sort_compares_whole_path_string() {
        let mut candidates = vec![
            CandidateFile::new(PathBuf::from("/c/a/x.png"), true),
            CandidateFile::new(PathBuf::from("/c/a-b/x.png"), true),
        ];
        candidates.sort();

        // '-' sorts before '/'
        assert_eq!(candidates[0].path, PathBuf::from("/c/a-b/x.png"));
    }

    #[test]
    fn test_root_path_has_empty_name() {
        let candidate = CandidateFile::new(PathBuf::from("/"), false);
        assert!(candidate.file_name.is_empty());
    }
}
