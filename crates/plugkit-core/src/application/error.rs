//! Application layer errors.
//!
//! These errors represent failures while driving the pipeline (network,
//! archive, filesystem), not rule-table problems. Those are `DomainError`
//! from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running a generation.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The boilerplate archive could not be retrieved.
    #[error("Failed to fetch boilerplate from {source_desc}: {reason}")]
    Fetch { source_desc: String, reason: String },

    /// The archive is corrupt or could not be unpacked.
    #[error("Failed to extract archive: {reason}")]
    Extraction { reason: String },

    /// A rule names a file or directory that is not in the tree.
    #[error("Rule '{rule}' requires {} which does not exist", path.display())]
    ScopeResolution { rule: String, path: PathBuf },

    /// One or more files inside a recursive scope could not be read or written.
    #[error("{} file(s) could not be processed", failures.len())]
    FileAccess { failures: Vec<FileFailure> },

    /// The entry file could not be renamed.
    #[error("Failed to rename {} to {}: {reason}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Filesystem operation failed outside of a rule scope.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// An auxiliary path could not be removed after generation.
    #[error("Cleanup failed for {path}: {reason}")]
    Cleanup { path: PathBuf, reason: String },

    /// In-memory adapter state is unusable (lock poisoned).
    #[error("Adapter state is poisoned")]
    LockPoisoned,
}

/// A single file that a rule could not read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub rule: String,
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.path.display(), self.reason)
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Fetch { source_desc, .. } => vec![
                format!("Could not download {}", source_desc),
                "Check your network connection".into(),
                "Or pass a local copy with --archive <ZIP>".into(),
            ],
            Self::Extraction { .. } => vec![
                "The downloaded archive looks corrupt".into(),
                "Try again, or pass a known-good archive with --archive".into(),
            ],
            Self::ScopeResolution { rule, path } => vec![
                format!("Rule '{}' expected {}", rule, path.display()),
                "The upstream boilerplate layout may have changed".into(),
                "The generated directory is incomplete; delete it before retrying".into(),
            ],
            Self::FileAccess { failures } => {
                let mut out: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
                out.push("Check file permissions in the generated directory".into());
                out.push("The generated project is incomplete; regenerate it".into());
                out
            }
            Self::Rename { to, .. } => vec![
                format!("Could not create {}", to.display()),
                "Choose a different --file-name".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different plugin name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],
            Self::Cleanup { path, .. } => vec![
                format!("Remove {} manually", path.display()),
                "The generated plugin is otherwise complete".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch { .. } => ErrorCategory::Network,
            Self::ScopeResolution { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::Extraction { .. }
            | Self::FileAccess { .. }
            | Self::Rename { .. }
            | Self::FilesystemError { .. }
            | Self::Cleanup { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
