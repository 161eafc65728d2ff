//! Error types for unpack orchestration and extraction strategies.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `UnpackError`.
pub type Result<T> = std::result::Result<T, UnpackError>;

/// Result type alias for extraction strategies.
pub type ExtractResult<T> = std::result::Result<T, ExtractionError>;

/// Represents a specific quota resource that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// File count quota exceeded.
    FileCount {
        /// Current file count.
        current: usize,
        /// Maximum allowed file count.
        max: usize,
    },
    /// Total size quota exceeded.
    TotalSize {
        /// Current total size in bytes.
        current: u64,
        /// Maximum allowed total size in bytes.
        max: u64,
    },
    /// Single file size quota exceeded.
    FileSize {
        /// File size in bytes.
        size: u64,
        /// Maximum allowed file size in bytes.
        max: u64,
    },
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCount { current, max } => {
                write!(f, "quota exceeded: file count ({current} > {max})")
            }
            Self::TotalSize { current, max } => {
                write!(f, "quota exceeded: total size ({current} > {max})")
            }
            Self::FileSize { size, max } => {
                write!(f, "quota exceeded: single file size ({size} > {max})")
            }
        }
    }
}

/// Errors reported by an extraction strategy.
///
/// Every strategy reports I/O and format problems through this single type so
/// the orchestrator can wrap them uniformly into [`UnpackError::UnpackFailed`].
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Entry path escapes the destination directory.
    #[error("path traversal detected: {}", path.display())]
    PathTraversal {
        /// The offending entry path.
        path: PathBuf,
    },

    /// Entry cannot be extracted with the current configuration.
    #[error("unsupported entry {}: {reason}", path.display())]
    UnsupportedEntry {
        /// The entry path.
        path: PathBuf,
        /// Why the entry was refused.
        reason: String,
    },

    /// Extraction quota exceeded.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// Failure reported by a third-party strategy.
    #[error("{0}")]
    Other(String),
}

impl ExtractionError {
    /// Returns `true` if the archive itself is at fault (corrupt, hostile or
    /// oversized), as opposed to the environment.
    #[must_use]
    pub const fn is_archive_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_)
                | Self::PathTraversal { .. }
                | Self::UnsupportedEntry { .. }
                | Self::QuotaExceeded { .. }
        )
    }
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

/// Coarse classification of an [`UnpackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Type key absent from the strategy registry.
    UnknownArtifactType,
    /// Download descriptor without a resolvable artifact.
    InvalidArtifactReference,
    /// Target directory could not be created.
    DirectoryCreationFailed,
    /// Target path exists but is not a directory.
    InvalidTarget,
    /// Strategy or completion marker failed.
    UnpackFailed,
}

impl ErrorKind {
    /// Stable lowercase identifier, used in machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownArtifactType => "unknown_artifact_type",
            Self::InvalidArtifactReference => "invalid_artifact_reference",
            Self::DirectoryCreationFailed => "directory_creation_failed",
            Self::InvalidTarget => "invalid_target",
            Self::UnpackFailed => "unpack_failed",
        }
    }
}

/// Errors returned by the unpack orchestrator.
///
/// All variants are terminal for the call that produced them; nothing is
/// retried and nothing is cleaned up.
#[derive(Error, Debug)]
pub enum UnpackError {
    /// No strategy is registered for the artifact's type key.
    #[error("unknown type: {type_key}")]
    UnknownArtifactType {
        /// The type key that was looked up.
        type_key: String,
    },

    /// Upstream download descriptor carries no artifact.
    #[error("{descriptor} has no valid artifact reference")]
    InvalidArtifactReference {
        /// Human-readable description of the download.
        descriptor: String,
    },

    /// The target directory was absent and could not be created.
    #[error("could not create directory: {}: {source}", path.display())]
    DirectoryCreationFailed {
        /// The directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The target path exists but is not a directory.
    #[error("{} must be directory for unpacking, but is not", path.display())]
    InvalidTarget {
        /// The offending path.
        path: PathBuf,
    },

    /// Extraction or completion marking failed.
    #[error("can't unpack {}: {source}", artifact.display())]
    UnpackFailed {
        /// The artifact file being unpacked.
        artifact: PathBuf,
        /// The target directory.
        directory: PathBuf,
        /// Underlying strategy or marker failure.
        #[source]
        source: ExtractionError,
    },
}

impl UnpackError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownArtifactType { .. } => ErrorKind::UnknownArtifactType,
            Self::InvalidArtifactReference { .. } => ErrorKind::InvalidArtifactReference,
            Self::DirectoryCreationFailed { .. } => ErrorKind::DirectoryCreationFailed,
            Self::InvalidTarget { .. } => ErrorKind::InvalidTarget,
            Self::UnpackFailed { .. } => ErrorKind::UnpackFailed,
        }
    }

    /// Returns the filesystem path involved in the failure, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndunpack_core::UnpackError;
    /// use std::path::Path;
    /// use std::path::PathBuf;
    ///
    /// let err = UnpackError::InvalidTarget {
    ///     path: PathBuf::from("/tmp/target"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("/tmp/target")));
    ///
    /// let err = UnpackError::UnknownArtifactType {
    ///     type_key: "rar".into(),
    /// };
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::DirectoryCreationFailed { path, .. } | Self::InvalidTarget { path } => {
                Some(path)
            }
            Self::UnpackFailed { artifact, .. } => Some(artifact),
            Self::UnknownArtifactType { .. } | Self::InvalidArtifactReference { .. } => None,
        }
    }

    /// Returns `true` if the failure stems from caller configuration rather
    /// than from the filesystem or the artifact contents.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownArtifactType { .. } | Self::InvalidArtifactReference { .. }
        )
    }

    /// Returns the wrapped strategy error for `UnpackFailed`.
    #[must_use]
    pub const fn extraction_error(&self) -> Option<&ExtractionError> {
        match self {
            Self::UnpackFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
