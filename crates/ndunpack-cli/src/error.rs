//! Error conversion utilities for CLI.
//!
//! Converts ndunpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use ndunpack_core::ExtractionError;
use ndunpack_core::UnpackError;

/// Converts `UnpackError` to user-friendly anyhow error with a hint
pub fn convert_unpack_error(err: UnpackError) -> anyhow::Error {
    let hint = match &err {
        UnpackError::UnknownArtifactType { .. } => {
            "Run `ndunpack types` to list known types, or add one with --alias KEY=BUILTIN."
        }
        UnpackError::DirectoryCreationFailed { .. } => {
            "Check that the parent directory is writable and not occupied by a file."
        }
        UnpackError::InvalidTarget { .. } => {
            "Remove the file occupying the target path or choose another directory."
        }
        UnpackError::UnpackFailed { source, .. } => extraction_hint(source),
        UnpackError::InvalidArtifactReference { .. } => return anyhow::Error::from(err),
    };
    anyhow!("{err}\nHINT: {hint}")
}

fn extraction_hint(err: &ExtractionError) -> &'static str {
    match err {
        ExtractionError::PathTraversal { .. } => {
            "This archive writes outside its target directory and may be malicious."
        }
        ExtractionError::QuotaExceeded { .. } => {
            "Use --max-files, --max-total-size, or --max-file-size to increase limits."
        }
        ExtractionError::UnsupportedEntry { .. } => {
            "The archive contains an entry that cannot be extracted safely."
        }
        ExtractionError::InvalidArchive(_) => {
            "The archive may be corrupted, or --type does not match its format."
        }
        ExtractionError::Io(_) | ExtractionError::Other(_) => {
            "Nothing was marked complete; running the command again retries the unpack."
        }
    }
}
