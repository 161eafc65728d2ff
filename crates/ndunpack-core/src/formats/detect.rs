//! Type key detection from artifact file names.

use std::path::Path;

use crate::StrategyRegistry;

/// Picks the registered type key that matches the end of `path`'s file name.
///
/// The longest matching key wins, so `libfoo.tar.gz` resolves to `tar.gz`
/// rather than a registered `gz`. File names are compared lowercased; keys
/// are compared as registered.
///
/// # Examples
///
/// ```
/// use ndunpack_core::ExtractConfig;
/// use ndunpack_core::StrategyRegistry;
/// use ndunpack_core::formats::detect_type_key;
/// use std::path::Path;
///
/// let registry = StrategyRegistry::builtin(&ExtractConfig::default());
/// assert_eq!(detect_type_key(Path::new("libfoo-1.0.tar.gz"), &registry), Some("tar.gz"));
/// assert_eq!(detect_type_key(Path::new("libfoo.rar"), &registry), None);
/// ```
#[must_use]
pub fn detect_type_key<'r>(path: &Path, registry: &'r StrategyRegistry) -> Option<&'r str> {
    let file_name = path.file_name()?.to_str()?.to_ascii_lowercase();

    registry
        .type_keys()
        .into_iter()
        .filter(|key| {
            file_name
                .strip_suffix(key)
                .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1)
        })
        .max_by_key(|key| key.len())
}
