//! Free-function entry points for one-off unpacks.

use std::path::Path;

use crate::Result;
use crate::StrategyRegistry;
use crate::UnpackObserver;
use crate::UnpackOutcome;
use crate::Unpacker;

/// Unpacks `artifact` into `directory` unless a previous call completed.
///
/// This is a thin wrapper over [`Unpacker::unpack`] for callers that do not
/// keep an unpacker around.
///
/// # Arguments
///
/// * `directory` - Target directory, created if absent
/// * `artifact` - Path to the artifact file
/// * `type_key` - Registered type key selecting the extraction strategy
/// * `registry` - Strategies available for lookup
///
/// # Errors
///
/// Returns an error if:
/// - `type_key` has no registered strategy
/// - `directory` cannot be created or is not a directory
/// - The strategy fails or the completion marker cannot be written
///
/// # Examples
///
/// ```no_run
/// use ndunpack_core::ExtractConfig;
/// use ndunpack_core::StrategyRegistry;
/// use ndunpack_core::unpack;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = StrategyRegistry::builtin(&ExtractConfig::default());
/// unpack("build/natives/libfoo", "libfoo-1.2.0.zip", "zip", &registry)?;
/// # Ok(())
/// # }
/// ```
pub fn unpack<P: AsRef<Path>, Q: AsRef<Path>>(
    directory: P,
    artifact: Q,
    type_key: &str,
    registry: &StrategyRegistry,
) -> Result<UnpackOutcome> {
    Unpacker::new(registry).unpack(directory, artifact, type_key)
}

/// Like [`unpack`], reporting progress to `observer`.
///
/// # Errors
///
/// Same as [`unpack`].
pub fn unpack_with_observer<P: AsRef<Path>, Q: AsRef<Path>>(
    directory: P,
    artifact: Q,
    type_key: &str,
    registry: &StrategyRegistry,
    observer: &dyn UnpackObserver,
) -> Result<UnpackOutcome> {
    Unpacker::new(registry)
        .with_observer(observer)
        .unpack(directory, artifact, type_key)
}
