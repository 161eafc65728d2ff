//! Unpack command implementation.

use crate::cli::UnpackArgs;
use crate::commands::build_registry;
use crate::error::convert_unpack_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::anyhow;
use ndunpack_core::StrategyRegistry;
use ndunpack_core::Unpacker;
use ndunpack_core::formats::detect_type_key;
use tracing::debug;

pub fn execute(
    args: &UnpackArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let registry = build_registry(&args.registry)?;
    let type_key = resolve_type_key(args, &registry)?;
    let unpacker = Unpacker::new(&registry);

    let result = if show_progress {
        let progress = CliProgress::new();
        unpacker
            .with_observer(&progress)
            .unpack(&args.directory, &args.artifact, &type_key)
    } else {
        unpacker.unpack(&args.directory, &args.artifact, &type_key)
    };
    let outcome = result.map_err(convert_unpack_error)?;

    formatter.format_unpack_result(&args.artifact, &args.directory, &type_key, &outcome)
}

/// Uses `--type` when given, otherwise detects the key from the file name.
fn resolve_type_key(args: &UnpackArgs, registry: &StrategyRegistry) -> Result<String> {
    if let Some(key) = &args.type_key {
        return Ok(key.clone());
    }

    let key = detect_type_key(&args.artifact, registry).ok_or_else(|| {
        anyhow!(
            "cannot detect the type of '{}' from its file name\n\
             HINT: Pass --type with one of: {}",
            args.artifact.display(),
            registry.type_keys().join(", ")
        )
    })?;
    debug!(type_key = key, "detected artifact type");
    Ok(key.to_string())
}
