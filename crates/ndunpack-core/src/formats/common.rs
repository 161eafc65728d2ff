//! Extraction helpers shared by the tar and zip strategies.
//!
//! Entry paths are sanitized lexically before anything is written: absolute
//! paths and `..` components are rejected outright instead of being
//! rewritten, because a native dependency archive containing them is broken
//! or hostile either way.

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::error::ExtractResult;
use crate::error::QuotaResource;
use crate::marker::COMPLETION_MARKER;

/// Validates an archive entry path and returns it relative to the
/// destination.
///
/// Returns `Ok(None)` for entries that name the destination itself (`.` or
/// `./`).
///
/// # Errors
///
/// - `PathTraversal` for absolute paths or `..` components
/// - `UnsupportedEntry` for an entry named like the completion marker
pub fn sanitize_entry_path(raw: &Path) -> ExtractResult<Option<PathBuf>> {
    let mut clean = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ExtractionError::PathTraversal {
                    path: raw.to_path_buf(),
                });
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Ok(None);
    }

    if clean == Path::new(COMPLETION_MARKER) {
        return Err(ExtractionError::UnsupportedEntry {
            path: raw.to_path_buf(),
            reason: "entry would forge the completion marker".to_string(),
        });
    }

    Ok(Some(clean))
}

/// Refuses to write below a symlink created by an earlier entry.
///
/// Without this check, an archive could plant `lib -> /usr/lib` and then
/// write `lib/libc.so` through it.
pub fn ensure_no_symlink_ancestors(destination: &Path, relative: &Path) -> ExtractResult<()> {
    let mut current = destination.to_path_buf();
    let Some(parent) = relative.parent() else {
        return Ok(());
    };
    for component in parent.components() {
        current.push(component);
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(ExtractionError::UnsupportedEntry {
                    path: relative.to_path_buf(),
                    reason: format!("parent {} is a symlink", current.display()),
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Checks that a symlink target stays inside the destination.
///
/// `link` is the sanitized link path relative to the destination; `target`
/// is the raw link target stored in the archive.
///
/// `..` is only accepted as a leading component. Once the target descends
/// into a name, that name may be (or later become) another link, and a
/// following `..` would then climb relative to wherever that link points.
/// With leading `..` only, every hop stays below the destination no matter
/// which entries are links.
pub fn validate_symlink_target(link: &Path, target: &Path) -> ExtractResult<()> {
    let escape = || ExtractionError::PathTraversal {
        path: link.join(target),
    };

    // Depth of the directory holding the link, relative to the destination.
    let mut depth = link.parent().map_or(0, |p| p.components().count());
    let mut descended = false;
    for component in target.components() {
        match component {
            Component::Normal(_) => {
                depth += 1;
                descended = true;
            }
            Component::CurDir => {}
            Component::ParentDir if descended => return Err(escape()),
            Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(escape)?,
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }
    Ok(())
}

/// Refuses a hard link whose target is a symlink.
///
/// A hard link to a symlink copies its relative target verbatim, which then
/// resolves from the new link's directory instead of the original one.
pub fn ensure_hardlink_target(target_path: &Path, relative: &Path) -> ExtractResult<()> {
    match fs::symlink_metadata(target_path) {
        Ok(meta) if meta.file_type().is_symlink() => Err(ExtractionError::UnsupportedEntry {
            path: relative.to_path_buf(),
            reason: format!("hard link target {} is a symlink", target_path.display()),
        }),
        Ok(_) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Tracks resource usage across the entries of one archive.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    files: usize,
    bytes: u64,
}

impl QuotaTracker {
    /// Creates a new quota tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one entry announced with `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if any limit of `config` is crossed.
    pub fn record(&mut self, size: u64, config: &ExtractConfig) -> ExtractResult<()> {
        self.files += 1;
        if self.files > config.max_file_count {
            return Err(ExtractionError::QuotaExceeded {
                resource: QuotaResource::FileCount {
                    current: self.files,
                    max: config.max_file_count,
                },
            });
        }

        if size > config.max_file_size {
            return Err(ExtractionError::QuotaExceeded {
                resource: QuotaResource::FileSize {
                    size,
                    max: config.max_file_size,
                },
            });
        }

        self.bytes = self.bytes.saturating_add(size);
        if self.bytes > config.max_total_size {
            return Err(ExtractionError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: self.bytes,
                    max: config.max_total_size,
                },
            });
        }

        Ok(())
    }

    /// Returns the number of entries recorded.
    #[must_use]
    pub const fn files(&self) -> usize {
        self.files
    }

    /// Returns the total bytes recorded.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Writes one regular file, creating parent directories as needed.
///
/// At most `config.max_file_size` bytes are accepted regardless of what the
/// archive header announced. An existing regular file at `output_path` is
/// replaced; an existing symlink or directory is refused, never followed.
pub fn write_file<R: Read>(
    reader: &mut R,
    output_path: &Path,
    mode: Option<u32>,
    config: &ExtractConfig,
) -> ExtractResult<u64> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::symlink_metadata(output_path) {
        Ok(meta) if meta.file_type().is_symlink() || meta.is_dir() => {
            return Err(ExtractionError::UnsupportedEntry {
                path: output_path.to_path_buf(),
                reason: "output path is already a symlink or directory".to_string(),
            });
        }
        Ok(_) => fs::remove_file(output_path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let output_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output_path)?;
    let mut writer = BufWriter::with_capacity(64 * 1024, output_file);
    let limit = config.max_file_size;
    let written = io::copy(&mut reader.take(limit.saturating_add(1)), &mut writer)?;
    writer.flush()?;

    if written > limit {
        return Err(ExtractionError::QuotaExceeded {
            resource: QuotaResource::FileSize {
                size: written,
                max: limit,
            },
        });
    }

    #[cfg(unix)]
    if config.preserve_permissions
        && let Some(mode) = mode
    {
        use std::os::unix::fs::PermissionsExt;
        // Strip setuid/setgid/sticky; a dependency never needs them.
        fs::set_permissions(output_path, fs::Permissions::from_mode(mode & 0o777))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(written)
}

/// Creates a symbolic link at `link` pointing to `target`.
#[cfg(unix)]
pub fn create_symlink(target: &Path, link: &Path) -> ExtractResult<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

/// Creates a symbolic link at `link` pointing to `target`.
#[cfg(not(unix))]
pub fn create_symlink(_target: &Path, link: &Path) -> ExtractResult<()> {
    Err(ExtractionError::UnsupportedEntry {
        path: link.to_path_buf(),
        reason: "symlinks are only supported on Unix".to_string(),
    })
}
