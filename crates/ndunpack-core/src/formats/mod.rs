//! Built-in extraction strategies.

pub mod common;
pub mod compression;
pub mod detect;
pub mod tar;
pub mod zip;

pub use compression::CompressionCodec;
pub use detect::detect_type_key;
pub use tar::TarStrategy;
pub use zip::ZipStrategy;
