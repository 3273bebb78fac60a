//! Boilerplate archive read from a local file.

use std::path::PathBuf;

use tracing::instrument;

use plugkit_core::{
    application::{
        ApplicationError,
        ports::{ArchiveSource, ProgressEvent, ProgressObserver},
    },
    error::{PlugkitResult, Stage},
};

/// Reads an archive that is already on disk (offline use, tests).
#[derive(Debug, Clone)]
pub struct FileArchiveSource {
    path: PathBuf,
}

impl FileArchiveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArchiveSource for FileArchiveSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn fetch(&self, observer: &dyn ProgressObserver) -> PlugkitResult<Vec<u8>> {
        let bytes = std::fs::read(&self.path).map_err(|e| ApplicationError::Fetch {
            source_desc: self.describe(),
            reason: e.to_string(),
        })?;
        let len = bytes.len() as u64;
        observer.on_progress(ProgressEvent::new(Stage::Fetch, len, Some(len)));
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugkit_core::application::ports::NoProgress;
    use plugkit_core::error::{ErrorKind, ErrorCategory};
    use tempfile::TempDir;

    #[test]
    fn reads_whole_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("b.zip");
        std::fs::write(&path, b"PK\x03\x04rest").unwrap();

        let bytes = FileArchiveSource::new(&path).fetch(&NoProgress).unwrap();
        assert_eq!(bytes, b"PK\x03\x04rest");
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let tmp = TempDir::new().unwrap();
        let err = FileArchiveSource::new(tmp.path().join("none.zip"))
            .fetch(&NoProgress)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
