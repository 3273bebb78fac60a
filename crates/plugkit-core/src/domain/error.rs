// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside stage failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Rule construction
    // ========================================================================
    #[error("invalid pattern '{pattern}' in rule '{rule}': {reason}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        reason: String,
    },

    // ========================================================================
    // Configuration values
    // ========================================================================
    #[error("invalid value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPattern { rule, .. } => vec![
                format!("The substitution rule '{}' could not be compiled", rule),
                "No files were modified".into(),
                "This is a bug in the rule table, please report it".into(),
            ],
            Self::InvalidConfig { field, reason } => vec![
                format!("Fix the value of '{}': {}", field, reason),
                "Identifiers may contain letters, digits and underscores only".into(),
                "Versions must look like MAJOR.MINOR.PATCH, e.g. 1.0.0".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{}'", field),
                "Run without --yes to be prompted for every field".into(),
            ],
            Self::InvalidProjectName { name, .. } => vec![
                format!("'{}' cannot be used as a plugin name", name),
                "Use lowercase letters, digits and hyphens".into(),
                "Example: plugkit create my-plugin".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. }
            | Self::MissingRequiredField { .. }
            | Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::InvalidPattern { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
