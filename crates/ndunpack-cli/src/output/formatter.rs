//! Output formatter trait for CLI results.

use anyhow::Result;
use ndunpack_core::UnpackOutcome;
use serde::Serialize;
use std::path::Path;

/// State of a directory as seen by `ndunpack status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryStatus {
    /// Nothing exists at the path.
    Missing,
    /// Something other than a directory occupies the path.
    NotADirectory,
    /// Directory exists without a completion marker.
    Pending,
    /// Directory carries a completion marker.
    Unpacked,
}

impl DirectoryStatus {
    /// Classifies `directory`.
    pub fn of(directory: &Path) -> Self {
        if !directory.exists() {
            Self::Missing
        } else if !directory.is_dir() {
            Self::NotADirectory
        } else if ndunpack_core::is_unpacked(directory) {
            Self::Unpacked
        } else {
            Self::Pending
        }
    }
}

/// One registered type key and the strategy serving it.
#[derive(Debug, Serialize)]
pub struct TypeEntry<'a> {
    pub key: &'a str,
    pub strategy: &'a str,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of an unpack
    fn format_unpack_result(
        &self,
        artifact: &Path,
        directory: &Path,
        type_key: &str,
        outcome: &UnpackOutcome,
    ) -> Result<()>;

    /// Format a directory status
    fn format_status(&self, directory: &Path, status: DirectoryStatus) -> Result<()>;

    /// Format the list of known types
    fn format_types(&self, types: &[TypeEntry<'_>]) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_status() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            DirectoryStatus::of(&temp.path().join("missing")),
            DirectoryStatus::Missing
        );
        assert_eq!(DirectoryStatus::of(temp.path()), DirectoryStatus::Pending);

        let file = temp.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(DirectoryStatus::of(&file), DirectoryStatus::NotADirectory);

        std::fs::write(ndunpack_core::marker_path(temp.path()), b"").unwrap();
        assert_eq!(DirectoryStatus::of(temp.path()), DirectoryStatus::Unpacked);
    }

    #[test]
    fn test_error_output_shape() {
        let json = serde_json::to_string(&JsonOutput::<()>::error("unpack", "boom")).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("\"data\""));
    }
}
