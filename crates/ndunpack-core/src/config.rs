//! Limits and policy for the built-in extraction strategies.

/// Configuration shared by the built-in tar and zip strategies.
///
/// Native dependency archives routinely ship executables and versioned
/// shared-library symlinks (`libfoo.so -> libfoo.so.1`), so the defaults keep
/// permissions and allow symlinks that stay inside the destination.
///
/// # Examples
///
/// ```
/// use ndunpack_core::ExtractConfig;
///
/// let config = ExtractConfig {
///     max_file_count: 500,
///     ..Default::default()
/// };
/// assert!(config.allow_symlinks);
///
/// let strict = ExtractConfig::strict();
/// assert!(!strict.allow_symlinks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Maximum size for a single file in bytes.
    pub max_file_size: u64,

    /// Maximum total size for all extracted files in bytes.
    pub max_total_size: u64,

    /// Maximum number of entries that can be extracted.
    pub max_file_count: usize,

    /// Preserve Unix permission bits from the archive.
    pub preserve_permissions: bool,

    /// Allow symlinks whose target stays inside the destination.
    pub allow_symlinks: bool,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `max_file_size`: 512 MiB
    /// - `max_total_size`: 4 GiB
    /// - `max_file_count`: 100,000
    /// - `preserve_permissions`: true
    /// - `allow_symlinks`: true
    fn default() -> Self {
        Self {
            max_file_size: 512 * 1024 * 1024,
            max_total_size: 4 * 1024 * 1024 * 1024,
            max_file_count: 100_000,
            preserve_permissions: true,
            allow_symlinks: true,
        }
    }
}

impl ExtractConfig {
    /// Creates a configuration for artifacts from less trusted repositories.
    ///
    /// Symlinks are refused, permissions are not preserved and the size
    /// limits are tightened.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024,
            max_total_size: 512 * 1024 * 1024,
            max_file_count: 10_000,
            preserve_permissions: false,
            allow_symlinks: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_file_size, 512 * 1024 * 1024);
        assert_eq!(config.max_total_size, 4 * 1024 * 1024 * 1024);
        assert_eq!(config.max_file_count, 100_000);
        assert!(config.preserve_permissions);
        assert!(config.allow_symlinks);
    }

    #[test]
    fn test_strict_is_tighter_than_default() {
        let default = ExtractConfig::default();
        let strict = ExtractConfig::strict();
        assert!(strict.max_file_size < default.max_file_size);
        assert!(strict.max_total_size < default.max_total_size);
        assert!(strict.max_file_count < default.max_file_count);
        assert!(!strict.allow_symlinks);
        assert!(!strict.preserve_permissions);
    }
}
