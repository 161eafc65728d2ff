//! Idempotent unpacking of native dependency artifacts.
//!
//! `ndunpack-core` extracts an artifact (a zip, jar or tar archive holding
//! native libraries or headers) into a target directory exactly once. After
//! a successful extraction a completion marker, `unpack-completed.flag`, is
//! written into the directory; any later request for the same directory
//! finds the marker and does nothing. A failed extraction writes no marker,
//! so the next request retries from scratch.
//!
//! Extraction itself is delegated to an [`ExtractionStrategy`] looked up by
//! type key in a [`StrategyRegistry`]. The built-in strategies reject path
//! traversal, escaping symlinks and archives that exceed the limits of an
//! [`ExtractConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use ndunpack_core::ExtractConfig;
//! use ndunpack_core::StrategyRegistry;
//! use ndunpack_core::UnpackOutcome;
//! use ndunpack_core::Unpacker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = StrategyRegistry::builtin(&ExtractConfig::default());
//! match Unpacker::new(&registry).unpack("target/natives", "libfoo-1.0.zip", "zip")? {
//!     UnpackOutcome::Unpacked { duration } => println!("unpacked in {duration:?}"),
//!     UnpackOutcome::AlreadyUnpacked => println!("nothing to do"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod artifact;
pub mod config;
pub mod error;
pub mod formats;
pub mod marker;
pub mod observer;
pub mod registry;
pub mod strategy;
pub mod target;
pub mod unpacker;

#[cfg(test)]
mod test_utils;

pub use api::unpack;
pub use api::unpack_with_observer;
pub use artifact::ArtifactDownload;
pub use artifact::ArtifactRef;
pub use artifact::Coordinates;
pub use artifact::ResolvedArtifact;
pub use config::ExtractConfig;
pub use error::ErrorKind;
pub use error::ExtractResult;
pub use error::ExtractionError;
pub use error::Result;
pub use error::UnpackError;
pub use marker::COMPLETION_MARKER;
pub use marker::is_unpacked;
pub use marker::marker_path;
pub use observer::NoopObserver;
pub use observer::UnpackObserver;
pub use registry::StrategyRegistry;
pub use strategy::ExtractionStrategy;
pub use target::TargetDir;
pub use unpacker::UnpackOutcome;
pub use unpacker::Unpacker;
