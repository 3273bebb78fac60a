//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use plugkit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PlugkitError, PlugkitResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_file(&self, path: &Path) -> PlugkitResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    // `fs::write` truncates in place, so the file keeps its mode.
    fn write_file(&self, path: &Path, content: &[u8]) -> PlugkitResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> PlugkitResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename file"))
    }

    fn remove_file(&self, path: &Path) -> PlugkitResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn create_dir_all(&self, path: &Path) -> PlugkitResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> PlugkitResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn walk_files(&self, dir: &Path) -> Vec<PlugkitResult<PathBuf>> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    Some(Err(ApplicationError::FilesystemError {
                        path,
                        reason: format!("Failed to walk directory: {e}"),
                    }
                    .into()))
                }
            })
            .collect()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PlugkitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walk_is_sorted_and_recursive() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/nested/z.php"), "").unwrap();
        fs::write(root.join("b/y.php"), "").unwrap();
        fs::write(root.join("a/x.php"), "").unwrap();

        let files: Vec<PathBuf> = LocalFilesystem
            .walk_files(root)
            .into_iter()
            .map(|r| r.unwrap().strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            files,
            vec![
                PathBuf::from("a/x.php"),
                PathBuf::from("b/nested/z.php"),
                PathBuf::from("b/y.php"),
            ]
        );
    }

    #[test]
    fn walk_of_missing_dir_reports_error() {
        let tmp = TempDir::new().unwrap();
        let results = LocalFilesystem.walk_files(&tmp.path().join("missing"));
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("bin.php");
        fs::write(&script, "old").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        LocalFilesystem.write_file(&script, b"new").unwrap();

        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(fs::read_to_string(&script).unwrap(), "new");
    }

    #[test]
    fn latin1_content_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("legacy.php");
        fs::write(&path, b"// caf\xe9\n").unwrap();

        let content = LocalFilesystem.read_file(&path).unwrap();
        assert_eq!(content, b"// caf\xe9\n");

        LocalFilesystem.write_file(&path, b"// th\xe9\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"// th\xe9\n");
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_file(&tmp.path().join("nope.php"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
