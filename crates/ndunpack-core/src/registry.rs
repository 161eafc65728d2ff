//! Strategy registry keyed by artifact type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ExtractConfig;
use crate::formats::CompressionCodec;
use crate::formats::TarStrategy;
use crate::formats::ZipStrategy;
use crate::strategy::ExtractionStrategy;

/// Mapping from artifact type key to extraction strategy.
///
/// Keys are case-sensitive and there is no fallback entry: a lookup for a key
/// that was never registered returns `None`. The orchestrator only reads the
/// registry.
///
/// # Examples
///
/// ```
/// use ndunpack_core::ExtractConfig;
/// use ndunpack_core::StrategyRegistry;
///
/// let mut registry = StrategyRegistry::builtin(&ExtractConfig::default());
/// registry.alias("ane", "zip");
///
/// assert!(registry.contains("tar.gz"));
/// assert!(registry.contains("ane"));
/// assert!(!registry.contains("ZIP"));
/// ```
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn ExtractionStrategy>>,
}

impl StrategyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in tar and zip strategies.
    ///
    /// Registered keys: `tar`, `tar.gz`, `tgz`, `tar.bz2`, `tbz2`, `tar.xz`,
    /// `txz`, `tar.zst`, `tzst`, `zip`, `jar`.
    #[must_use]
    pub fn builtin(config: &ExtractConfig) -> Self {
        let mut registry = Self::new();

        let tar: Arc<dyn ExtractionStrategy> =
            Arc::new(TarStrategy::new(None, config.clone()));
        registry.register_shared("tar", tar);

        for codec in [
            CompressionCodec::Gzip,
            CompressionCodec::Bzip2,
            CompressionCodec::Xz,
            CompressionCodec::Zstd,
        ] {
            let strategy: Arc<dyn ExtractionStrategy> =
                Arc::new(TarStrategy::new(Some(codec), config.clone()));
            registry.register_shared(codec.extension(), Arc::clone(&strategy));
            registry.register_shared(codec.short_extension(), strategy);
        }

        let zip: Arc<dyn ExtractionStrategy> = Arc::new(ZipStrategy::new(config.clone()));
        registry.register_shared("zip", Arc::clone(&zip));
        registry.register_shared("jar", zip);

        registry
    }

    /// Registers `strategy` under `type_key`, returning the strategy it
    /// replaced.
    pub fn register<S>(
        &mut self,
        type_key: impl Into<String>,
        strategy: S,
    ) -> Option<Arc<dyn ExtractionStrategy>>
    where
        S: ExtractionStrategy + 'static,
    {
        self.register_shared(type_key, Arc::new(strategy))
    }

    /// Registers an already shared strategy under `type_key`.
    pub fn register_shared(
        &mut self,
        type_key: impl Into<String>,
        strategy: Arc<dyn ExtractionStrategy>,
    ) -> Option<Arc<dyn ExtractionStrategy>> {
        self.strategies.insert(type_key.into(), strategy)
    }

    /// Makes `new_key` resolve to the strategy registered under
    /// `existing_key`.
    ///
    /// Returns `false` and leaves the registry unchanged if `existing_key` is
    /// not registered.
    pub fn alias(&mut self, new_key: impl Into<String>, existing_key: &str) -> bool {
        let Some(strategy) = self.strategies.get(existing_key).cloned() else {
            return false;
        };
        self.strategies.insert(new_key.into(), strategy);
        true
    }

    /// Looks up the strategy for `type_key`.
    #[must_use]
    pub fn get(&self, type_key: &str) -> Option<&dyn ExtractionStrategy> {
        self.strategies.get(type_key).map(|strategy| &**strategy)
    }

    /// Returns `true` if `type_key` is registered.
    #[must_use]
    pub fn contains(&self, type_key: &str) -> bool {
        self.strategies.contains_key(type_key)
    }

    /// Returns every registered key in sorted order.
    #[must_use]
    pub fn type_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns `true` if no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.type_keys() {
            if let Some(strategy) = self.get(key) {
                map.entry(&key, &strategy.name());
            }
        }
        map.finish()
    }
}
