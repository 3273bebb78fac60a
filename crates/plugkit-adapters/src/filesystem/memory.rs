//! In-memory filesystem adapter for testing.
//!
//! Clones share state, so a test can hand one clone to a service and inspect
//! the tree through another. Individual paths can be made unreadable or
//! unwritable to exercise per-file failure handling.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use plugkit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::PlugkitResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    deny_read: BTreeSet<PathBuf>,
    deny_write: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                current.push(component);
                self.directories.insert(current.clone());
            }
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Create a file and its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            inner.add_parents(path);
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Read a file's content as text, if it exists and is UTF-8 (testing helper).
    pub fn read_text(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// Make reads of `path` fail.
    pub fn deny_read(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.deny_read.insert(path.as_ref().to_path_buf());
        }
    }

    /// Make writes to `path` fail.
    pub fn deny_write(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.deny_write.insert(path.as_ref().to_path_buf());
        }
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_guard(&self) -> PlugkitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write_guard(&self) -> PlugkitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn fs_error(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_file(&self, path: &Path) -> PlugkitResult<Vec<u8>> {
        let inner = self.read_guard()?;
        if inner.deny_read.contains(path) {
            return Err(fs_error(path, "Permission denied").into());
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file").into())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> PlugkitResult<()> {
        let mut inner = self.write_guard()?;

        if inner.deny_write.contains(path) {
            return Err(fs_error(path, "Permission denied").into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PlugkitResult<()> {
        let mut inner = self.write_guard()?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| fs_error(from, "No such file"))?;
        inner.add_parents(to);
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PlugkitResult<()> {
        let mut inner = self.write_guard()?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| fs_error(path, "No such file").into())
    }

    fn create_dir_all(&self, path: &Path) -> PlugkitResult<()> {
        let mut inner = self.write_guard()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> PlugkitResult<()> {
        let mut inner = self.write_guard()?;

        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory").into());
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn walk_files(&self, dir: &Path) -> Vec<PlugkitResult<PathBuf>> {
        match self.read_guard() {
            Ok(inner) if inner.directories.contains(dir) => inner
                .files
                .keys()
                .filter(|p| p.starts_with(dir))
                .map(|p| Ok(p.clone()))
                .collect(),
            Ok(_) => vec![Err(fs_error(dir, "No such directory").into())],
            Err(e) => vec![Err(e)],
        }
    }
}
