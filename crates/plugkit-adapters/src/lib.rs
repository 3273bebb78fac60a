//! Infrastructure adapters for plugkit.
//!
//! This crate implements the ports defined in `plugkit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod filesystem;

// Re-export commonly used adapters
pub use archive::{FileArchiveSource, HttpArchiveSource, ZipMaterializer};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
