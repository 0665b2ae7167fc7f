//! Atomic file write operations.
//!
//! Documents are written to a temp file in the target directory and renamed
//! into place, so readers observe either the old or the new content and never
//! a partial write. Temp files are cleaned up on failure.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write content to a file atomically, replacing any existing file.
///
/// # Errors
///
/// Returns an `io::Error` if the parent directory cannot be determined, the
/// temp file cannot be created or written, or the rename fails.
pub async fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let (parent, target) = split_target(path)?;
    let content_owned = content.to_string();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let temp_file = write_temp(&parent, &content_owned)?;
        temp_file.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

/// Write content to a new file atomically.
///
/// Fails with `io::ErrorKind::AlreadyExists` if the target exists; the
/// existing file is left untouched.
pub async fn atomic_create(path: &Path, content: &str) -> io::Result<()> {
    let (parent, target) = split_target(path)?;
    let content_owned = content.to_string();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let temp_file = write_temp(&parent, &content_owned)?;
        temp_file.persist_noclobber(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

fn split_target(path: &Path) -> io::Result<(PathBuf, PathBuf)> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?
        .to_path_buf();
    Ok((parent, path.to_path_buf()))
}

fn write_temp(parent: &Path, content: &str) -> io::Result<NamedTempFile> {
    // Same directory as the target, otherwise the rename is not atomic
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    Ok(temp_file)
}
