//! Atomic file copy implementation

use crate::types::ExportError;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream into a temporary `.part` file beside `dest`
/// 2. Flush and sync to disk
/// 3. Preserve permissions and mtime
/// 4. Rename onto `dest`
///
/// On failure the `.part` file is removed and `dest` is left untouched.
/// An existing `dest` is never replaced: the copy fails with
/// `AlreadyExists` instead.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(ExportError::CopyFailed)` - any step failed
///
/// # Example
/// ```no_run
/// use cardex::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(
///     Path::new("A.pkpass/cardBackgroundCombined@2x.png"),
///     Path::new("Cards/1.png"),
/// )?;
/// # Ok::<(), cardex::types::ExportError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, ExportError> {
    let part_path = part_path_for(dest);

    match copy_via_part(src, dest, &part_path) {
        Ok(bytes) => Ok(bytes),
        Err(source) => {
            let _ = fs::remove_file(&part_path);
            Err(ExportError::CopyFailed {
                path: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source,
            })
        }
    }
}

/// `<dest stem>.part`, e.g. `4.png` -> `4.part`
pub fn part_path_for(dest: &Path) -> PathBuf {
    dest.with_extension("part")
}

fn copy_via_part(src: &Path, dest: &Path, part_path: &Path) -> io::Result<u64> {
    refuse_existing(dest)?;

    let mut src_file = File::open(src)?;
    let mut part_file = File::create(part_path)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;

        if bytes_read == 0 {
            break; // EOF
        }

        part_file.write_all(&buffer[0..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src)?;
    fs::set_permissions(part_path, src_metadata.permissions())?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part_path, mtime)?;

    refuse_existing(dest)?;
    fs::rename(part_path, dest)?;

    Ok(total_bytes)
}

fn refuse_existing(dest: &Path) -> io::Result<()> {
    if fs::symlink_metadata(dest).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        ));
    }
    Ok(())
}
