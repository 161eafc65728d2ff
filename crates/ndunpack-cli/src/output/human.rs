//! Human-readable output formatter with colors and styling.

use super::formatter::DirectoryStatus;
use super::formatter::OutputFormatter;
use super::formatter::TypeEntry;
use anyhow::Result;
use console::Term;
use console::style;
use ndunpack_core::UnpackOutcome;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn write_status_line(&self, mark: &str, message: &str) -> Result<()> {
        if self.use_colors {
            self.term
                .write_line(&format!("{} {message}", style(mark).green().bold()))?;
        } else {
            self.term.write_line(message)?;
        }
        Ok(())
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_unpack_result(
        &self,
        artifact: &Path,
        directory: &Path,
        type_key: &str,
        outcome: &UnpackOutcome,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        match outcome {
            UnpackOutcome::Unpacked { duration } => {
                self.write_status_line(
                    "✓",
                    &format!(
                        "Unpacked {} into {}",
                        artifact.display(),
                        directory.display()
                    ),
                )?;
                if self.verbose {
                    self.term.write_line(&format!("  Type: {type_key}"))?;
                    self.term.write_line(&format!("  Duration: {duration:?}"))?;
                }
            }
            UnpackOutcome::AlreadyUnpacked => {
                self.write_status_line(
                    "•",
                    &format!("Already unpacked: {}", directory.display()),
                )?;
            }
        }

        Ok(())
    }

    fn format_status(&self, directory: &Path, status: DirectoryStatus) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let description = match status {
            DirectoryStatus::Missing => "does not exist",
            DirectoryStatus::NotADirectory => "is not a directory",
            DirectoryStatus::Pending => "is not unpacked",
            DirectoryStatus::Unpacked => "is unpacked",
        };
        self.term
            .write_line(&format!("{} {description}", directory.display()))?;
        Ok(())
    }

    fn format_types(&self, types: &[TypeEntry<'_>]) -> Result<()> {
        let width = types.iter().map(|t| t.key.len()).max().unwrap_or(0);
        for entry in types {
            self.term
                .write_line(&format!("{:<width$}  {}", entry.key, entry.strategy))?;
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if console::colors_enabled_stderr() {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
