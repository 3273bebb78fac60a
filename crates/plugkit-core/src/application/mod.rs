//! Application layer for plugkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, RuleApplicator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All substitution rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationReport, GenerationService, RuleApplicator, RuleOutcome, RuleSummary};

pub use ports::{
    ArchiveSource, Filesystem, NoProgress, ProgressEvent, ProgressObserver, TreeMaterializer,
};

pub use error::{ApplicationError, FileFailure};
