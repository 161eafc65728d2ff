//! Extraction target preparation.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::Result;
use crate::UnpackError;
use crate::marker;

/// A directory that is ready to receive extracted files.
///
/// Once constructed, the path existed as a directory at the time of the
/// check. The path is kept exactly as the caller supplied it so strategies
/// and log lines see the same location the build tool configured.
///
/// # Examples
///
/// ```no_run
/// use ndunpack_core::TargetDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::prepare("target/native/libfoo")?;
/// println!("unpacking into {}", target.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir {
    path: PathBuf,
    created: bool,
}

impl TargetDir {
    /// Ensures `path` exists as a directory, creating it and every missing
    /// ancestor when absent.
    ///
    /// # Errors
    ///
    /// - `DirectoryCreationFailed` if the directory was absent and could not
    ///   be created
    /// - `InvalidTarget` if something other than a directory occupies the
    ///   path
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut created = false;

        if !path.exists() {
            info!(directory = %path.display(), "target directory does not exist, creating it");
            fs::create_dir_all(&path).map_err(|source| UnpackError::DirectoryCreationFailed {
                path: path.clone(),
                source,
            })?;
            created = true;
        }

        if !path.is_dir() {
            return Err(UnpackError::InvalidTarget { path });
        }

        Ok(Self { path, created })
    }

    /// Returns the directory path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if this call created the directory.
    #[inline]
    #[must_use]
    pub const fn was_created(&self) -> bool {
        self.created
    }

    /// Returns `true` if the directory carries a completion marker.
    #[must_use]
    pub fn is_unpacked(&self) -> bool {
        marker::is_unpacked(&self.path)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}
