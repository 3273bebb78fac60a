//! plugkit core - hexagonal architecture implementation.
//!
//! This crate provides the domain and application layers for the plugkit
//! WordPress plugin generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           plugkit-cli (CLI)             │
//! │     (resolves config, shows progress)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, RuleApplicator)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ArchiveSource, TreeMaterializer, Fs)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    plugkit-adapters (Infrastructure)    │
//! │  (HttpArchiveSource, ZipMaterializer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │   (ProjectConfig, RuleSet, Profile)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use plugkit_core::prelude::*;
//! # fn adapters() -> (Box<dyn ArchiveSource>, Box<dyn TreeMaterializer>, Box<dyn Filesystem>) { unimplemented!() }
//!
//! let profile = BoilerplateProfile::wordpress();
//! let config = ProjectConfig::derive("sample-plugin", &profile)?;
//!
//! let (source, materializer, filesystem) = adapters();
//! let service = GenerationService::new(source, materializer, filesystem);
//! let report = service.generate(&config, &profile)?;
//! println!("created {}", report.root.display());
//! # Ok::<(), PlugkitError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, FileFailure, GenerationReport, GenerationService, RuleApplicator,
        RuleOutcome,
        ports::{
            ArchiveSource, Filesystem, NoProgress, ProgressEvent, ProgressObserver,
            TreeMaterializer,
        },
    };
    pub use crate::domain::{
        BoilerplateProfile, ConfigWarning, DomainError, FileFilter, Pattern, ProjectConfig,
        RelativePath, RuleSet, ScopeTarget, SubstitutionRule,
    };
    pub use crate::error::{ErrorCategory, ErrorKind, PlugkitError, PlugkitResult, Stage};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
