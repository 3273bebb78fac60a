//! Unified error handling for plugkit core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, tags failures with the pipeline stage they happened in, and exposes
//! user-actionable suggestions.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Materialize,
    Substitute,
    Cleanup,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Materialize => "materialize",
            Self::Substitute => "substitute",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for plugkit core operations.
#[derive(Debug, Error, Clone)]
pub enum PlugkitError {
    /// Errors from the domain layer (rule table and config values).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O while driving the pipeline).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A failure attributed to one pipeline stage.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<PlugkitError>,
    },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

/// Discriminant of the underlying failure, independent of stage wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Fetch,
    Extraction,
    InvalidPattern,
    ScopeResolution,
    FileAccess,
    Rename,
    InvalidConfig,
    ProjectExists,
    Filesystem,
    Cleanup,
    Configuration,
    Internal,
}

impl PlugkitError {
    /// Attribute this error to a pipeline stage. Already-staged errors keep
    /// their original stage.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage the failure happened in, if it was raised inside the pipeline.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The error with any stage wrapping removed.
    pub fn root(&self) -> &PlugkitError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// What went wrong, independent of where.
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Domain(e) => match e {
                DomainError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
                DomainError::InvalidConfig { .. }
                | DomainError::MissingRequiredField { .. }
                | DomainError::InvalidProjectName { .. } => ErrorKind::InvalidConfig,
            },
            Self::Application(e) => match e {
                ApplicationError::Fetch { .. } => ErrorKind::Fetch,
                ApplicationError::Extraction { .. } => ErrorKind::Extraction,
                ApplicationError::ScopeResolution { .. } => ErrorKind::ScopeResolution,
                ApplicationError::FileAccess { .. } => ErrorKind::FileAccess,
                ApplicationError::Rename { .. } => ErrorKind::Rename,
                ApplicationError::ProjectExists { .. } => ErrorKind::ProjectExists,
                ApplicationError::Cleanup { .. } => ErrorKind::Cleanup,
                ApplicationError::FilesystemError { .. } | ApplicationError::LockPoisoned => {
                    ErrorKind::Filesystem
                }
            },
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } | Self::Stage { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the run left a partially transformed tree behind.
    ///
    /// Rule-table errors are attributed to the substitute stage but are
    /// raised before anything is fetched.
    pub fn leaves_partial_tree(&self) -> bool {
        self.stage() == Some(Stage::Substitute)
            && !matches!(self.kind(), ErrorKind::InvalidPattern | ErrorKind::InvalidConfig)
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Stage { source, .. } => source.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in plugkit".into(),
                "Please report this issue at: https://github.com/prappo/plugkit/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Stage { source, .. } => source.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Network,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlugkitResult<T> = Result<T, PlugkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn in_stage_wraps_once() {
        let err: PlugkitError = ApplicationError::Extraction {
            reason: "bad crc".into(),
        }
        .into();
        let staged = err.in_stage(Stage::Materialize).in_stage(Stage::Cleanup);

        assert_eq!(staged.stage(), Some(Stage::Materialize));
        assert_eq!(staged.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn display_names_stage_and_cause() {
        let err = PlugkitError::from(ApplicationError::ScopeResolution {
            rule: "namespace-declaration".into(),
            path: PathBuf::from("includes"),
        })
        .in_stage(Stage::Substitute);

        let msg = err.to_string();
        assert!(msg.starts_with("substitute stage failed"));
        assert!(msg.contains("namespace-declaration"));
        assert!(msg.contains("includes"));
    }

    #[test]
    fn kind_of_unstaged_domain_error() {
        let err = PlugkitError::from(DomainError::InvalidPattern {
            rule: "version".into(),
            pattern: "(".into(),
            reason: "unclosed group".into(),
        });
        assert_eq!(err.kind(), ErrorKind::InvalidPattern);
        assert_eq!(err.stage(), None);
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn fetch_is_network_category() {
        let err = PlugkitError::from(ApplicationError::Fetch {
            source_desc: "https://example.invalid".into(),
            reason: "dns".into(),
        })
        .in_stage(Stage::Fetch);
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(!err.leaves_partial_tree());
    }

    #[test]
    fn substitute_failure_leaves_partial_tree() {
        let err = PlugkitError::from(ApplicationError::FileAccess { failures: vec![] })
            .in_stage(Stage::Substitute);
        assert!(err.leaves_partial_tree());
    }

    #[test]
    fn stage_display_is_lowercase() {
        assert_eq!(Stage::Fetch.to_string(), "fetch");
        assert_eq!(Stage::Materialize.to_string(), "materialize");
        assert_eq!(Stage::Substitute.to_string(), "substitute");
        assert_eq!(Stage::Cleanup.to_string(), "cleanup");
    }
}
