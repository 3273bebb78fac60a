//! Application services - orchestrate use cases.
//!
//! `GenerationService` drives one run end to end; `RuleApplicator` is the
//! stateless engine that applies a single rule to the tree.

pub mod generation_service;
pub mod rule_applicator;

pub use generation_service::{GenerationReport, GenerationService, RuleSummary};
pub use rule_applicator::{RuleApplicator, RuleOutcome};
