//! Completion marker handling.
//!
//! The marker is a zero-length file placed directly inside an unpacked
//! directory. Its presence is the only thing that decides whether a directory
//! counts as unpacked; nothing else about the directory is inspected.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// File name of the completion marker.
pub const COMPLETION_MARKER: &str = "unpack-completed.flag";

/// Returns the marker path for `directory`.
#[must_use]
pub fn marker_path(directory: &Path) -> PathBuf {
    directory.join(COMPLETION_MARKER)
}

/// Returns `true` if `directory` carries a completion marker.
///
/// # Examples
///
/// ```
/// use ndunpack_core::marker::is_unpacked;
/// use std::path::Path;
///
/// assert!(!is_unpacked(Path::new("/nonexistent/unpack/target")));
/// ```
#[must_use]
pub fn is_unpacked(directory: &Path) -> bool {
    marker_path(directory).exists()
}

/// Creates the completion marker inside `directory`.
///
/// The marker must not already exist; creation uses `create_new` so a marker
/// is never silently rewritten.
pub(crate) fn write_marker(directory: &Path) -> io::Result<PathBuf> {
    let path = marker_path(directory);
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to write completion marker {}: {e}", path.display()),
            )
        })?;
    Ok(path)
}
