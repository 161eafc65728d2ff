//! Idempotent unpack orchestration.
//!
//! The orchestrator is the only component that reads or writes the completion
//! marker. Per target directory it moves through
//! `Absent -> Prepared -> Unpacking -> {Completed | Failed}`, where
//! `Completed` is sticky (a marker exists, every later call short-circuits)
//! and `Failed` leaves no marker, so the next call starts over from
//! `Prepared`.
//!
//! There is no locking: two processes racing on one directory may both run
//! the strategy.

use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ExtractionError;
use crate::Result;
use crate::StrategyRegistry;
use crate::TargetDir;
use crate::UnpackError;
use crate::artifact::ArtifactDownload;
use crate::artifact::ArtifactRef;
use crate::artifact::ResolvedArtifact;
use crate::marker;
use crate::observer::NoopObserver;
use crate::observer::UnpackObserver;

/// What a successful unpack call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackOutcome {
    /// The strategy ran and the completion marker was written.
    Unpacked {
        /// Time spent in the strategy and marker write.
        duration: Duration,
    },
    /// The marker was already present; nothing was done.
    AlreadyUnpacked,
}

impl UnpackOutcome {
    /// Returns `true` if the strategy was skipped.
    #[must_use]
    pub const fn was_skipped(&self) -> bool {
        matches!(self, Self::AlreadyUnpacked)
    }
}

/// Unpacks artifacts into directories at most once per directory.
///
/// # Examples
///
/// ```no_run
/// use ndunpack_core::ExtractConfig;
/// use ndunpack_core::StrategyRegistry;
/// use ndunpack_core::Unpacker;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = StrategyRegistry::builtin(&ExtractConfig::default());
/// let unpacker = Unpacker::new(&registry);
///
/// let outcome = unpacker.unpack("target/native/libfoo", "libfoo-1.2.0.tar.gz", "tar.gz")?;
/// if outcome.was_skipped() {
///     println!("already unpacked");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Unpacker<'r, O = NoopObserver> {
    registry: &'r StrategyRegistry,
    observer: O,
}

impl<'r> Unpacker<'r> {
    /// Creates an unpacker reading strategies from `registry`, without
    /// notifications.
    #[must_use]
    pub const fn new(registry: &'r StrategyRegistry) -> Self {
        Self {
            registry,
            observer: NoopObserver,
        }
    }
}

impl<'r, O: UnpackObserver> Unpacker<'r, O> {
    /// Replaces the observer receiving the unpack notifications.
    #[must_use]
    pub fn with_observer<P: UnpackObserver>(self, observer: P) -> Unpacker<'r, P> {
        Unpacker {
            registry: self.registry,
            observer,
        }
    }

    /// Returns the registry strategies are resolved from.
    #[must_use]
    pub const fn registry(&self) -> &'r StrategyRegistry {
        self.registry
    }

    /// Unpacks `artifact` of type `type_key` into `directory`.
    ///
    /// # Errors
    ///
    /// - `UnknownArtifactType` if `type_key` is not registered; the
    ///   filesystem is not touched
    /// - `DirectoryCreationFailed` if `directory` is absent and cannot be
    ///   created
    /// - `InvalidTarget` if `directory` exists but is not a directory
    /// - `UnpackFailed` if the strategy or the marker write fails
    pub fn unpack(
        &self,
        directory: impl AsRef<Path>,
        artifact: impl AsRef<Path>,
        type_key: &str,
    ) -> Result<UnpackOutcome> {
        self.run(
            directory.as_ref(),
            ArtifactRef {
                file: artifact.as_ref(),
                type_key,
            },
        )
    }

    /// Unpacks a resolved artifact, using its declared type as the key.
    ///
    /// # Errors
    ///
    /// Same as [`Unpacker::unpack`].
    pub fn unpack_artifact(
        &self,
        directory: impl AsRef<Path>,
        artifact: &ResolvedArtifact,
    ) -> Result<UnpackOutcome> {
        if let Some(coordinates) = artifact.coordinates() {
            debug!(artifact = %coordinates, "unpacking resolved artifact");
        }
        self.run(directory.as_ref(), artifact.artifact_ref())
    }

    /// Unpacks a pending download, using its artifact extension as the key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArtifactReference` if the download carries no
    /// artifact, in addition to the errors of [`Unpacker::unpack`].
    pub fn unpack_download(
        &self,
        directory: impl AsRef<Path>,
        download: &ArtifactDownload,
    ) -> Result<UnpackOutcome> {
        let artifact = download.artifact_ref()?;
        self.run(directory.as_ref(), artifact)
    }

    fn run(&self, directory: &Path, artifact: ArtifactRef<'_>) -> Result<UnpackOutcome> {
        debug!(type_key = artifact.type_key, "getting strategy for artifact type");
        let strategy = self.registry.get(artifact.type_key).ok_or_else(|| {
            UnpackError::UnknownArtifactType {
                type_key: artifact.type_key.to_string(),
            }
        })?;

        let target = TargetDir::prepare(directory)?;

        if target.is_unpacked() {
            info!(directory = %target.as_path().display(), "already unpacked");
            self.observer.on_already_unpacked(target.as_path());
            return Ok(UnpackOutcome::AlreadyUnpacked);
        }

        self.observer.on_unpacking(artifact.file, target.as_path());
        info!(
            artifact = %artifact.file.display(),
            directory = %target.as_path().display(),
            created = target.was_created(),
            strategy = strategy.name(),
            "unpacking artifact"
        );

        let started = Instant::now();
        strategy
            .extract(artifact.file, target.as_path())
            .map_err(|source| Self::failed(artifact.file, target.as_path(), source))?;

        let marker = marker::write_marker(target.as_path()).map_err(|e| {
            Self::failed(artifact.file, target.as_path(), ExtractionError::Io(e))
        })?;
        debug!(marker = %marker.display(), "completion marker written");

        Ok(UnpackOutcome::Unpacked {
            duration: started.elapsed(),
        })
    }

    fn failed(artifact: &Path, directory: &Path, source: ExtractionError) -> UnpackError {
        warn!(
            artifact = %artifact.display(),
            directory = %directory.display(),
            error = %source,
            "unpack failed"
        );
        UnpackError::UnpackFailed {
            artifact: artifact.to_path_buf(),
            directory: directory.to_path_buf(),
            source,
        }
    }
}
