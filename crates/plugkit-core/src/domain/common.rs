use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// A path inside the generated tree, guaranteed to be **relative** and free
/// of `..` components.
///
/// Rule scopes and cleanup paths are expressed with this type, so nothing the
/// rule table names can reach outside the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the provided path is absolute or escapes its root. Intended
    /// for literals in the built-in profile; use [`RelativePath::try_new`]
    /// for anything user supplied.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(is_contained(&path), "RelativePath must stay inside its root: {path:?}");
        Self(path)
    }

    /// Non-panicking variant of [`RelativePath::new`].
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, PathBuf> {
        let path = path.into();
        if is_contained(&path) {
            Ok(Self(path))
        } else {
            Err(path)
        }
    }

    /// Join a segment onto this path.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, PathBuf> {
        Self::try_new(self.0.join(segment))
    }

    /// Resolve against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        RelativePath::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
