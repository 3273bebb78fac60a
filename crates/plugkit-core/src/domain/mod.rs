//! Core domain layer for plugkit.
//!
//! Pure logic: naming, the resolved project config, the boilerplate profile
//! and the ordered rule table. No I/O and no `tracing`; filesystem and
//! network access go through ports defined in the application layer.
//!
//! - **No I/O**: rules transform strings, the applicator moves bytes
//! - **Immutable values**: configs and rules are built once per run
//! - **Fail early**: pattern errors surface when the rule set is built

pub mod common;
pub mod error;
pub mod naming;
pub mod profile;
pub mod project_config;
pub mod rule;
pub mod rule_set;

pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use profile::{BoilerplateProfile, BoilerplateTokens};
pub use project_config::{ConfigWarning, ProjectConfig};
pub use rule::{FileFilter, Pattern, ScopeTarget, SubstitutionRule};
pub use rule_set::{EntryRename, RuleSet};
