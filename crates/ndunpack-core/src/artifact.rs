//! Artifact descriptors handed over by the resolution subsystem.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::UnpackError;

/// Repository coordinates identifying an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    /// Group (organization) identifier.
    pub group_id: String,
    /// Artifact identifier.
    pub artifact_id: String,
    /// Artifact version.
    pub version: String,
    /// Optional classifier, e.g. `linux-x86_64`.
    pub classifier: Option<String>,
    /// File extension, used as the type key for downloads.
    pub extension: String,
}

impl Coordinates {
    /// Creates coordinates without a classifier.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            extension: extension.into(),
        }
    }

    /// Sets the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl fmt::Display for Coordinates {
    /// Formats as `group:artifact:extension[:classifier]:version`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

/// Borrowed view of what the orchestrator needs: a file and a type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactRef<'a> {
    /// Path to the downloaded payload.
    pub file: &'a Path,
    /// Type key used for strategy lookup.
    pub type_key: &'a str,
}

/// An artifact that has been resolved and downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    coordinates: Option<Coordinates>,
    type_key: String,
    file: PathBuf,
}

impl ResolvedArtifact {
    /// Creates a resolved artifact from a file and its declared type.
    pub fn new(file: impl Into<PathBuf>, type_key: impl Into<String>) -> Self {
        Self {
            coordinates: None,
            type_key: type_key.into(),
            file: file.into(),
        }
    }

    /// Attaches repository coordinates, used in log lines.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Returns the coordinates, if known.
    #[must_use]
    pub const fn coordinates(&self) -> Option<&Coordinates> {
        self.coordinates.as_ref()
    }

    /// Returns the declared type key.
    #[must_use]
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Returns the downloaded file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the file and type key.
    #[must_use]
    pub fn artifact_ref(&self) -> ArtifactRef<'_> {
        ArtifactRef {
            file: &self.file,
            type_key: &self.type_key,
        }
    }
}

/// A pending download that may or may not carry an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDownload {
    artifact: Option<Coordinates>,
    file: PathBuf,
}

impl ArtifactDownload {
    /// Creates a download of `artifact` into `file`.
    pub fn new(artifact: Option<Coordinates>, file: impl Into<PathBuf>) -> Self {
        Self {
            artifact,
            file: file.into(),
        }
    }

    /// Returns the artifact coordinates, if present.
    #[must_use]
    pub const fn artifact(&self) -> Option<&Coordinates> {
        self.artifact.as_ref()
    }

    /// Returns the download destination file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the file and the coordinates' extension as type key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArtifactReference` if the download has no artifact.
    pub fn artifact_ref(&self) -> Result<ArtifactRef<'_>> {
        let coordinates =
            self.artifact
                .as_ref()
                .ok_or_else(|| UnpackError::InvalidArtifactReference {
                    descriptor: self.to_string(),
                })?;
        Ok(ArtifactRef {
            file: &self.file,
            type_key: &coordinates.extension,
        })
    }
}

impl fmt::Display for ArtifactDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artifact {
            Some(coordinates) => write!(f, "{coordinates} - {}", self.file.display()),
            None => write!(f, "download {}", self.file.display()),
        }
    }
}
