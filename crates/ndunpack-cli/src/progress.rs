//! Spinner shown while an artifact is being unpacked.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use ndunpack_core::UnpackObserver;
use std::path::Path;
use std::time::Duration;

/// CLI spinner wrapper implementing `UnpackObserver`.
///
/// The spinner starts when the strategy is about to run and is cleared on
/// drop, whatever the outcome.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a hidden-until-started spinner.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl UnpackObserver for CliProgress {
    fn on_unpacking(&self, artifact: &Path, _directory: &Path) {
        let name = artifact
            .file_name()
            .map_or_else(|| artifact.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.bar.set_message(format!("Unpacking {name}"));
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }
}
