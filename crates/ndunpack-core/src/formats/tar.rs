//! Tar archive strategy, optionally compressed.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use tracing::trace;

use super::common;
use super::common::QuotaTracker;
use super::compression::CompressionCodec;
use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionStrategy;
use crate::error::ExtractResult;

/// Extracts tar archives, decompressing them with `codec` first.
#[derive(Debug, Clone)]
pub struct TarStrategy {
    codec: Option<CompressionCodec>,
    config: ExtractConfig,
}

impl TarStrategy {
    /// Creates a tar strategy. `None` reads a plain, uncompressed tar.
    #[must_use]
    pub const fn new(codec: Option<CompressionCodec>, config: ExtractConfig) -> Self {
        Self { codec, config }
    }

    /// Returns the compression codec.
    #[must_use]
    pub const fn codec(&self) -> Option<CompressionCodec> {
        self.codec
    }
}

impl Default for TarStrategy {
    fn default() -> Self {
        Self::new(None, ExtractConfig::default())
    }
}

impl ExtractionStrategy for TarStrategy {
    fn extract(&self, source: &Path, destination: &Path) -> ExtractResult<()> {
        let file = BufReader::new(File::open(source)?);
        let reader: Box<dyn Read> = match self.codec {
            Some(codec) => codec.decoder(file)?,
            None => Box::new(file),
        };
        let mut archive = tar::Archive::new(reader);
        let mut quota = QuotaTracker::new();

        for entry in archive.entries()? {
            let mut entry = entry?;
            let raw = entry.path()?.into_owned();
            let Some(relative) = common::sanitize_entry_path(&raw)? else {
                continue;
            };
            let output_path = destination.join(&relative);
            let entry_type = entry.header().entry_type();
            trace!(path = %relative.display(), ?entry_type, "tar entry");

            match entry_type {
                tar::EntryType::Directory => {
                    common::ensure_no_symlink_ancestors(destination, &relative)?;
                    fs::create_dir_all(&output_path)?;
                }
                tar::EntryType::Regular | tar::EntryType::Continuous => {
                    quota.record(entry.size(), &self.config)?;
                    common::ensure_no_symlink_ancestors(destination, &relative)?;
                    let mode = entry.header().mode().ok();
                    common::write_file(&mut entry, &output_path, mode, &self.config)?;
                }
                tar::EntryType::Symlink => {
                    if !self.config.allow_symlinks {
                        return Err(ExtractionError::UnsupportedEntry {
                            path: raw,
                            reason: "symlinks are not allowed".to_string(),
                        });
                    }
                    let target = entry.link_name()?.ok_or_else(|| {
                        ExtractionError::InvalidArchive(format!(
                            "symlink {} has no target",
                            raw.display()
                        ))
                    })?;
                    common::validate_symlink_target(&relative, &target)?;
                    common::ensure_no_symlink_ancestors(destination, &relative)?;
                    quota.record(0, &self.config)?;
                    common::create_symlink(&target, &output_path)?;
                }
                tar::EntryType::Link => {
                    let target = entry.link_name()?.ok_or_else(|| {
                        ExtractionError::InvalidArchive(format!(
                            "hardlink {} has no target",
                            raw.display()
                        ))
                    })?;
                    let Some(target) = common::sanitize_entry_path(&target)? else {
                        return Err(ExtractionError::UnsupportedEntry {
                            path: raw,
                            reason: "hardlink to the destination root".to_string(),
                        });
                    };
                    common::ensure_no_symlink_ancestors(destination, &relative)?;
                    common::ensure_no_symlink_ancestors(destination, &target)?;
                    common::ensure_hardlink_target(&destination.join(&target), &relative)?;
                    quota.record(0, &self.config)?;
                    if let Some(parent) = output_path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::hard_link(destination.join(&target), &output_path)?;
                }
                other => {
                    debug!(path = %raw.display(), entry_type = ?other, "skipping tar entry");
                }
            }
        }

        debug!(
            files = quota.files(),
            bytes = quota.bytes(),
            "tar extraction finished"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        self.codec.map_or("tar", CompressionCodec::extension)
    }
}
