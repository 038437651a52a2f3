//! Destination index: digests already exported and the next free number
//!
//! Rebuilt from the destination directory on every run. Nothing is
//! persisted besides the exported files themselves, so manual edits in the
//! destination are picked up on the next run.

use crate::hash::compute_hash;
use crate::types::{ContentDigest, ExportError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Digest set plus high-water mark for the destination directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationIndex {
    root: PathBuf,
    extension: String,
    digests: HashSet<ContentDigest>,
    // None once u64::MAX has been handed out.
    next_index: Option<u64>,
}

impl DestinationIndex {
    /// An index for an empty destination
    pub fn empty(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            digests: HashSet::new(),
            next_index: Some(1),
        }
    }

    /// Build the index from the destination's current contents
    ///
    /// Creates `dest_root` (recursively) if missing. Every file with the
    /// admitted extension is hashed; unreadable ones are skipped. The next
    /// index is one past the largest `<n>.<extension>` name, or 1.
    ///
    /// # Errors
    /// * `ExportError::DestinationUnavailable` - the directory cannot be created or listed
    /// * `ExportError::IndexExhausted` - the largest existing index is `u64::MAX`
    pub fn initialize(dest_root: &Path, extension: &str) -> Result<Self, ExportError> {
        let unavailable = |source| ExportError::DestinationUnavailable {
            path: dest_root.to_path_buf(),
            source,
        };

        fs::create_dir_all(dest_root).map_err(unavailable)?;
        let listing = fs::read_dir(dest_root).map_err(unavailable)?;

        let mut index = Self::empty(dest_root, extension);
        let mut max_seen: Option<u64> = None;

        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read destination entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if !index.has_extension(&path) {
                continue;
            }

            if let Some(n) = index.parse_index(&path) {
                max_seen = Some(max_seen.map_or(n, |m| m.max(n)));
            }

            let is_file = entry.file_type().is_ok_and(|ft| ft.is_file());
            if !is_file {
                continue;
            }

            match compute_hash(&path) {
                Ok(digest) => {
                    index.digests.insert(digest);
                }
                Err(e) => warn!("Skipping unreadable destination file: {}", e),
            }
        }

        index.next_index = match max_seen {
            None => Some(1),
            Some(max) => Some(max.checked_add(1).ok_or_else(|| index.exhausted())?),
        };

        debug!(
            root = %dest_root.display(),
            digests = index.len(),
            next_index = ?index.next_index,
            "destination indexed"
        );

        Ok(index)
    }

    /// Number that the next admitted file will receive, if any is left
    pub fn next_index(&self) -> Option<u64> {
        self.next_index
    }

    /// The next index, or `IndexExhausted` when none is left
    pub fn reserve(&self) -> Result<u64, ExportError> {
        self.next_index.ok_or_else(|| self.exhausted())
    }

    /// Whether this content is already represented in the destination
    pub fn contains(&self, digest: &ContentDigest) -> bool {
        self.digests.contains(digest)
    }

    /// Number of distinct digests known
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// `<root>/<index>.<extension>`
    pub fn output_path(&self, index: u64) -> PathBuf {
        self.root.join(format!("{}.{}", index, self.extension))
    }

    /// Record a completed admission
    ///
    /// Inserts the digest and advances the high-water mark by exactly one.
    /// Returns the index that was consumed. After `u64::MAX` is consumed
    /// no further index is handed out.
    pub fn record(&mut self, digest: ContentDigest) -> Result<u64, ExportError> {
        let used = self.reserve()?;
        self.digests.insert(digest);
        self.next_index = used.checked_add(1);
        Ok(used)
    }

    fn exhausted(&self) -> ExportError {
        ExportError::IndexExhausted {
            path: self.root.clone(),
        }
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn parse_index(&self, path: &Path) -> Option<u64> {
        path.file_stem()?.to_str()?.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_missing_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path().join("Desktop/Cards");

        let index = DestinationIndex::initialize(&dest, "png").expect("initialize");

        assert!(dest.is_dir());
        assert_eq!(index.next_index(), Some(1));
        assert!(index.is_empty());
    }

    #[test]
    fn test_initialize_over_file_is_unavailable() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("Cards");
        fs::write(&blocker, b"not a dir").expect("write blocker");

        let err = DestinationIndex::initialize(&blocker, "png").unwrap_err();
        assert!(matches!(err, ExportError::DestinationUnavailable { .. }));
    }

    #[test]
    fn test_next_index_follows_max_not_count() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join("1.png"), b"one").expect("write");
        fs::write(dest.join("3.png"), b"three").expect("write");

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        assert_eq!(index.next_index(), Some(4));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_non_numeric_png_is_hashed_but_not_numbered() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join("holiday.png"), b"manual").expect("write");
        fs::write(dest.join("2.png"), b"two").expect("write");

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        assert_eq!(index.next_index(), Some(3));
        assert!(index.contains(&ContentDigest::from(blake3::hash(b"manual"))));
    }

    #[test]
    fn test_other_extensions_are_ignored() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join("9.jpg"), b"jpeg").expect("write");
        fs::write(dest.join("7.part"), b"partial").expect("write");
        fs::write(dest.join("notes.txt"), b"txt").expect("write");

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        assert_eq!(index.next_index(), Some(1));
        assert!(index.is_empty());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join("5.PNG"), b"upper").expect("write");

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        assert_eq!(index.next_index(), Some(6));
        assert!(index.contains(&ContentDigest::from(blake3::hash(b"upper"))));
    }

    #[test]
    fn test_numbered_directory_reserves_index() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::create_dir(dest.join("4.png")).expect("create dir");

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        assert_eq!(index.next_index(), Some(5));
        assert!(index.is_empty());
    }

    #[test]
    fn test_record_advances_by_one() {
        let mut index = DestinationIndex::empty("/out", "png");
        let digest = ContentDigest::from(blake3::hash(b"x"));

        assert_eq!(index.reserve().expect("free index"), 1);
        assert_eq!(index.record(digest).expect("record"), 1);
        assert_eq!(index.next_index(), Some(2));
        assert!(index.contains(&digest));
        assert_eq!(index.output_path(12), PathBuf::from("/out/12.png"));
    }

    #[test]
    fn test_max_index_in_destination_is_exhausted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join(format!("{}.png", u64::MAX)), b"last").expect("write");

        let err = DestinationIndex::initialize(dest, "png").unwrap_err();
        assert!(matches!(err, ExportError::IndexExhausted { .. }));
    }

    #[test]
    fn test_last_index_is_handed_out_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        fs::write(dest.join(format!("{}.png", u64::MAX - 1)), b"penultimate").expect("write");

        let mut index = DestinationIndex::initialize(dest, "png").expect("initialize");
        assert_eq!(index.next_index(), Some(u64::MAX));

        let used = index
            .record(ContentDigest::from(blake3::hash(b"a")))
            .expect("last index is free");
        assert_eq!(used, u64::MAX);
        assert_eq!(index.next_index(), None);

        let err = index
            .record(ContentDigest::from(blake3::hash(b"b")))
            .unwrap_err();
        assert!(matches!(err, ExportError::IndexExhausted { .. }));
        assert!(!index.contains(&ContentDigest::from(blake3::hash(b"b"))));
    }

    /// Lock a file and report whether reads are really refused (not as root)
    #[cfg(unix)]
    fn lock_file(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).expect("chmod");
        fs::read(path).is_err()
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_destination_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dest = temp_dir.path();
        let locked = dest.join("2.png");
        fs::write(&locked, b"locked").expect("write");
        fs::write(dest.join("1.png"), b"open").expect("write");

        if !lock_file(&locked) {
            eprintln!("skipping: permissions do not restrict reads for this user");
            return;
        }

        let index = DestinationIndex::initialize(dest, "png").expect("initialize");

        // Still numbered even though its content is unknown.
        assert_eq!(index.next_index(), Some(3));
        assert!(!index.contains(&ContentDigest::from(blake3::hash(b"locked"))));
        assert!(index.contains(&ContentDigest::from(blake3::hash(b"open"))));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).expect("restore");
    }
}
