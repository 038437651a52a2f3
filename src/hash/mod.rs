//! Hashing utilities

use crate::types::{ContentDigest, ExportError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the Blake3 content digest of a file
///
/// The whole file is read on every call; nothing is cached between calls.
/// The file is streamed in 64KB chunks.
///
/// # Arguments
/// * `file_path` - Path to the file to hash
///
/// # Returns
/// * `Ok(ContentDigest)` - 256-bit Blake3 digest
/// * `Err(ExportError::Unreadable)` - file could not be opened or read
///
/// # Example
/// ```no_run
/// use cardex::hash::compute_hash;
/// use std::path::Path;
///
/// let digest = compute_hash(Path::new("1.png"))?;
/// println!("{digest}");
/// # Ok::<(), cardex::types::ExportError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<ContentDigest, ExportError> {
    let unreadable = |source| ExportError::Unreadable {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::open(file_path).map_err(unreadable)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(unreadable)?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(ContentDigest::from(hasher.finalize()))
}
