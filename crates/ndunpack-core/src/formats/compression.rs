//! Compression codecs wrapping tar streams.
//!
//! # Supported Codecs
//!
//! - **Gzip** (.tar.gz, .tgz)
//! - **Bzip2** (.tar.bz2, .tbz2)
//! - **Xz** (.tar.xz, .txz)
//! - **Zstd** (.tar.zst, .tzst)

use std::io;
use std::io::Read;

/// Compression codec applied on top of a tar stream.
///
/// # Examples
///
/// ```
/// use ndunpack_core::formats::CompressionCodec;
///
/// assert_eq!(CompressionCodec::Gzip.extension(), "tar.gz");
/// assert_eq!(CompressionCodec::Gzip.short_extension(), "tgz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,
    /// Xz compression (LZMA2 algorithm).
    Xz,
    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// Returns the long type key for this codec, e.g. `tar.gz`.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "tar.gz",
            Self::Bzip2 => "tar.bz2",
            Self::Xz => "tar.xz",
            Self::Zstd => "tar.zst",
        }
    }

    /// Returns the short type key for this codec, e.g. `tgz`.
    #[must_use]
    pub const fn short_extension(self) -> &'static str {
        match self {
            Self::Gzip => "tgz",
            Self::Bzip2 => "tbz2",
            Self::Xz => "txz",
            Self::Zstd => "tzst",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wraps `reader` in the matching decompressor.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot be initialized (zstd only).
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Self::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Self::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }
}
