//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use ndunpack_core::ExtractConfig;
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::logging::LogLevel;

#[derive(Parser)]
#[command(name = "ndunpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (also raises the log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unpack an artifact into a directory unless it is already unpacked
    Unpack(UnpackArgs),
    /// Report whether a directory carries a completion marker
    Status(StatusArgs),
    /// List the known artifact type keys
    Types(TypesArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Path to the artifact file
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Target directory, created if absent
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Artifact type key (default: detected from the artifact file name)
    #[arg(short = 't', long = "type", value_name = "KEY")]
    pub type_key: Option<String>,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Directory to inspect
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,
}

#[derive(clap::Args)]
pub struct TypesArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Options shaping the strategy registry.
#[derive(clap::Args)]
pub struct RegistryArgs {
    /// Extra type key served by a built-in strategy, e.g. `ane=zip` (repeatable)
    #[arg(long = "alias", value_name = "KEY=BUILTIN", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,

    /// Maximum number of entries per artifact
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Maximum total extracted size in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_total_size: Option<u64>,

    /// Maximum single file size in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Refuse archives containing symlinks
    #[arg(long)]
    pub no_symlinks: bool,

    /// Do not apply permission bits stored in the archive
    #[arg(long)]
    pub no_preserve_permissions: bool,
}

impl RegistryArgs {
    /// Builds the extraction limits, falling back to library defaults.
    pub fn extract_config(&self) -> ExtractConfig {
        let defaults = ExtractConfig::default();
        ExtractConfig {
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            max_total_size: self.max_total_size.unwrap_or(defaults.max_total_size),
            max_file_count: self.max_files.unwrap_or(defaults.max_file_count),
            preserve_permissions: !self.no_preserve_permissions,
            allow_symlinks: !self.no_symlinks,
        }
    }
}

/// Parse a `KEY=BUILTIN` alias pair
fn parse_alias(s: &str) -> Result<(String, String), String> {
    let (key, target) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=BUILTIN, got '{s}'"))?;
    let (key, target) = (key.trim(), target.trim());
    if key.is_empty() || target.is_empty() {
        return Err(format!("expected KEY=BUILTIN, got '{s}'"));
    }
    Ok((key.to_ascii_lowercase(), target.to_ascii_lowercase()))
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
