//! Filesystem side of the mirror: directory creation and file writes

use std::fs;
use std::io;
use std::path::Path;

/// Ensures a directory exists, creating it and any missing parents
///
/// Returns true if the directory had to be created.
pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    tracing::info!("Creating directory '{}'.", dir.display());
    fs::create_dir_all(dir)?;
    Ok(true)
}

/// Writes raw bytes to `path`, creating parent directories first
///
/// Existing files are overwritten.
pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    tracing::info!("Writing file '{}'.", path.display());
    fs::write(path, contents)
}
