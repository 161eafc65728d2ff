//! Types command implementation.

use crate::cli::TypesArgs;
use crate::commands::build_registry;
use crate::output::OutputFormatter;
use crate::output::TypeEntry;
use anyhow::Result;

pub fn execute(args: &TypesArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let registry = build_registry(&args.registry)?;
    let entries: Vec<TypeEntry<'_>> = registry
        .type_keys()
        .into_iter()
        .filter_map(|key| {
            registry.get(key).map(|strategy| TypeEntry {
                key,
                strategy: strategy.name(),
            })
        })
        .collect();
    formatter.format_types(&entries)
}
