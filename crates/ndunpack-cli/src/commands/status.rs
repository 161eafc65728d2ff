//! Status command implementation.

use crate::cli::StatusArgs;
use crate::output::DirectoryStatus;
use crate::output::OutputFormatter;
use anyhow::Result;

pub fn execute(args: &StatusArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let status = DirectoryStatus::of(&args.directory);
    formatter.format_status(&args.directory, status)
}
