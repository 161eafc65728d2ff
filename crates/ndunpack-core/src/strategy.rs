//! Extraction strategy contract.

use std::path::Path;

use crate::error::ExtractResult;

/// Format-specific extraction logic for one kind of artifact.
///
/// Implementations must:
/// - produce the same result for the same inputs,
/// - never create the completion marker (the orchestrator owns completion),
/// - report every I/O and format failure as an
///   [`ExtractionError`](crate::ExtractionError).
///
/// Strategies are shared through the registry, hence `Send + Sync` and
/// `&self`. Implementations that keep state need interior mutability.
///
/// # Examples
///
/// ```
/// use ndunpack_core::ExtractResult;
/// use ndunpack_core::ExtractionStrategy;
/// use std::path::Path;
///
/// struct CopyStrategy;
///
/// impl ExtractionStrategy for CopyStrategy {
///     fn extract(&self, source: &Path, destination: &Path) -> ExtractResult<()> {
///         let name = source.file_name().unwrap_or_default();
///         std::fs::copy(source, destination.join(name))?;
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "copy"
///     }
/// }
/// ```
pub trait ExtractionStrategy: Send + Sync {
    /// Extracts `source` into the existing directory `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read, is malformed, or the
    /// destination cannot be written.
    fn extract(&self, source: &Path, destination: &Path) -> ExtractResult<()>;

    /// Returns a short human-readable name of the strategy.
    fn name(&self) -> &str;
}
