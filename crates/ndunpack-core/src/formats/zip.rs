//! ZIP archive strategy.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::trace;

use super::common;
use super::common::QuotaTracker;
use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionStrategy;
use crate::error::ExtractResult;

/// Extracts ZIP archives (also used for `jar`).
#[derive(Debug, Clone, Default)]
pub struct ZipStrategy {
    config: ExtractConfig,
}

impl ZipStrategy {
    /// Creates a ZIP strategy with the given limits.
    #[must_use]
    pub const fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

impl ExtractionStrategy for ZipStrategy {
    fn extract(&self, source: &Path, destination: &Path) -> ExtractResult<()> {
        let file = BufReader::new(File::open(source)?);
        let mut archive = zip::ZipArchive::new(file)?;
        let mut quota = QuotaTracker::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let raw = PathBuf::from(entry.name());
            let Some(relative) = common::sanitize_entry_path(&raw)? else {
                continue;
            };
            let output_path = destination.join(&relative);
            trace!(path = %relative.display(), "zip entry");

            if entry.is_dir() {
                common::ensure_no_symlink_ancestors(destination, &relative)?;
                fs::create_dir_all(&output_path)?;
            } else if entry.is_symlink() {
                if !self.config.allow_symlinks {
                    return Err(ExtractionError::UnsupportedEntry {
                        path: raw,
                        reason: "symlinks are not allowed".to_string(),
                    });
                }
                let mut target = String::new();
                entry.read_to_string(&mut target)?;
                let target = PathBuf::from(target);
                common::validate_symlink_target(&relative, &target)?;
                common::ensure_no_symlink_ancestors(destination, &relative)?;
                quota.record(0, &self.config)?;
                common::create_symlink(&target, &output_path)?;
            } else {
                quota.record(entry.size(), &self.config)?;
                common::ensure_no_symlink_ancestors(destination, &relative)?;
                let mode = entry.unix_mode();
                common::write_file(&mut entry, &output_path, mode, &self.config)?;
            }
        }

        debug!(
            files = quota.files(),
            bytes = quota.bytes(),
            "zip extraction finished"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "zip"
    }
}
