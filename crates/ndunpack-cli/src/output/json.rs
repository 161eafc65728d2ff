//! JSON output formatter for machine-readable results.

use super::formatter::DirectoryStatus;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::TypeEntry;
use anyhow::Result;
use ndunpack_core::UnpackOutcome;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_unpack_result(
        &self,
        artifact: &Path,
        directory: &Path,
        type_key: &str,
        outcome: &UnpackOutcome,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct UnpackOutput<'a> {
            artifact: String,
            directory: String,
            type_key: &'a str,
            result: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            duration_ms: Option<u128>,
        }

        let (result, duration_ms) = match outcome {
            UnpackOutcome::Unpacked { duration } => ("unpacked", Some(duration.as_millis())),
            UnpackOutcome::AlreadyUnpacked => ("already_unpacked", None),
        };

        let data = UnpackOutput {
            artifact: artifact.display().to_string(),
            directory: directory.display().to_string(),
            type_key,
            result,
            duration_ms,
        };

        Self::output(&JsonOutput::success("unpack", data))
    }

    fn format_status(&self, directory: &Path, status: DirectoryStatus) -> Result<()> {
        #[derive(Serialize)]
        struct StatusOutput {
            directory: String,
            state: DirectoryStatus,
            unpacked: bool,
        }

        let data = StatusOutput {
            directory: directory.display().to_string(),
            state: status,
            unpacked: status == DirectoryStatus::Unpacked,
        };

        Self::output(&JsonOutput::success("status", data))
    }

    fn format_types(&self, types: &[TypeEntry<'_>]) -> Result<()> {
        Self::output(&JsonOutput::success("types", types))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
