//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `plugkit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PlugkitResult, Stage};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `plugkit_adapters::filesystem::LocalFilesystem` (production)
/// - `plugkit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file. Content is not required to be UTF-8.
    fn read_file(&self, path: &Path) -> PlugkitResult<Vec<u8>>;

    /// Replace a file's content. Existing permissions are kept.
    fn write_file(&self, path: &Path, content: &[u8]) -> PlugkitResult<()>;

    fn rename(&self, from: &Path, to: &Path) -> PlugkitResult<()>;

    fn remove_file(&self, path: &Path) -> PlugkitResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlugkitResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PlugkitResult<()>;

    /// Every regular file under `dir`, at any depth, in a stable sorted order.
    ///
    /// Entries that cannot be visited are reported in place so the caller can
    /// keep walking.
    fn walk_files(&self, dir: &Path) -> Vec<PlugkitResult<PathBuf>>;
}

/// Port for retrieving the boilerplate archive.
///
/// Implemented by:
/// - `plugkit_adapters::archive::HttpArchiveSource` (download)
/// - `plugkit_adapters::archive::FileArchiveSource` (local zip)
pub trait ArchiveSource: Send + Sync {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    /// Retrieve the whole archive. Must not touch the project directory.
    fn fetch(&self, observer: &dyn ProgressObserver) -> PlugkitResult<Vec<u8>>;
}

/// Port for unpacking archive bytes into a directory.
pub trait TreeMaterializer: Send + Sync {
    /// Unpack `archive` under `dest`, dropping `strip_prefix` from every
    /// entry name and keeping each entry's mode. Returns the number of
    /// entries written.
    fn materialize(
        &self,
        archive: &[u8],
        dest: &Path,
        strip_prefix: &str,
        observer: &dyn ProgressObserver,
    ) -> PlugkitResult<usize>;
}

/// One progress notification. `current` never decreases within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub current: u64,
    /// Unknown for downloads without a length header.
    pub total: Option<u64>,
}

impl ProgressEvent {
    pub fn new(stage: Stage, current: u64, total: Option<u64>) -> Self {
        Self {
            stage,
            current,
            total,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|t| self.current >= t)
    }
}

/// Optional progress reporting. The pipeline never depends on it.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);

    /// Called once when a stage has finished, successfully or not.
    fn on_stage_end(&self, _stage: Stage) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}
