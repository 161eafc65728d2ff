//! Command implementations.

pub mod completion;
pub mod status;
pub mod types;
pub mod unpack;

use anyhow::Result;
use anyhow::bail;
use ndunpack_core::StrategyRegistry;
use tracing::debug;

use crate::cli::RegistryArgs;

/// Builds the built-in registry with the CLI limits and aliases applied.
pub fn build_registry(args: &RegistryArgs) -> Result<StrategyRegistry> {
    let mut registry = StrategyRegistry::builtin(&args.extract_config());
    for (key, target) in &args.aliases {
        if !registry.alias(key.clone(), target) {
            bail!(
                "cannot alias '{key}': '{target}' is not a known type\n\
                 HINT: Run `ndunpack types` to list the built-in types."
            );
        }
        debug!(alias = %key, target = %target, "registered type alias");
    }
    Ok(registry)
}
