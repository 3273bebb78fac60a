//! Generation Service - main application orchestrator.
//!
//! This service runs one generation from start to finish:
//! 1. Fetch the boilerplate archive
//! 2. Materialize it into the project directory
//! 3. Rename the entry file and apply the rule set, in order
//! 4. Remove auxiliary paths
//!
//! Stages are strictly sequential. A failure before substitution leaves no
//! project directory behind; a fatal failure during substitution leaves the
//! tree as it was at that moment and skips cleanup.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        error::FileFailure,
        ports::{ArchiveSource, Filesystem, NoProgress, ProgressEvent, ProgressObserver, TreeMaterializer},
        services::rule_applicator::RuleApplicator,
    },
    domain::{BoilerplateProfile, ConfigWarning, ProjectConfig, RuleSet},
    error::{PlugkitError, PlugkitResult, Stage},
};

/// Per-rule summary for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub files_changed: usize,
}

/// What a successful generation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub entry_file: PathBuf,
    pub files_extracted: usize,
    pub rules_applied: usize,
    /// Distinct files rewritten by at least one rule.
    pub files_changed: usize,
    pub rules: Vec<RuleSummary>,
    pub removed_paths: Vec<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
    pub next_steps: Vec<String>,
}

/// Main generation service.
pub struct GenerationService {
    source: Box<dyn ArchiveSource>,
    materializer: Box<dyn TreeMaterializer>,
    filesystem: Box<dyn Filesystem>,
    observer: Box<dyn ProgressObserver>,
    output_dir: PathBuf,
    cleanup: bool,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// Projects are created under the current directory with cleanup on and
    /// no progress reporting.
    pub fn new(
        source: Box<dyn ArchiveSource>,
        materializer: Box<dyn TreeMaterializer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            materializer,
            filesystem,
            observer: Box::new(NoProgress),
            output_dir: PathBuf::from("."),
            cleanup: true,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Directory the project directory is created in.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Keep the profile's auxiliary paths instead of removing them.
    pub fn skip_cleanup(mut self) -> Self {
        self.cleanup = false;
        self
    }

    /// Where the project for `config` will be created.
    pub fn target_dir(&self, config: &ProjectConfig) -> PathBuf {
        self.output_dir.join(&config.source_name)
    }

    /// Build the rule set for a run without touching anything.
    pub fn plan(&self, config: &ProjectConfig, profile: &BoilerplateProfile) -> PlugkitResult<RuleSet> {
        RuleSet::build(config, profile).map_err(|e| PlugkitError::from(e).in_stage(Stage::Substitute))
    }

    /// Generate a project.
    #[instrument(
        skip_all,
        fields(
            project = %config.source_name,
            source = %self.source.describe(),
        )
    )]
    pub fn generate(
        &self,
        config: &ProjectConfig,
        profile: &BoilerplateProfile,
    ) -> PlugkitResult<GenerationReport> {
        // Patterns are compiled before anything is fetched or written.
        let rules = self.plan(config, profile)?;
        let warnings = config.warnings(profile);
        for w in &warnings {
            warn!(warning = %w, "Configuration warning");
        }

        let root = self.target_dir(config);
        if self.filesystem.exists(&root) {
            return Err(PlugkitError::from(ApplicationError::ProjectExists { path: root })
                .in_stage(Stage::Materialize));
        }

        let archive = self.fetch()?;
        let files_extracted = self.materialize(&archive, &root, profile)?;

        let (summaries, changed, failures) = self.substitute(&root, &rules)?;

        let removed_paths = if self.cleanup {
            match self.clean(&root, profile) {
                Ok(removed) => removed,
                // File failures take precedence; the tree is incomplete anyway.
                Err(e) if !failures.is_empty() => {
                    warn!(error = %e, "Cleanup failed");
                    Vec::new()
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!("Cleanup skipped");
            Vec::new()
        };

        if !failures.is_empty() {
            warn!(count = failures.len(), "Some files could not be processed");
            return Err(PlugkitError::from(ApplicationError::FileAccess { failures })
                .in_stage(Stage::Substitute));
        }

        let mut next_steps = vec![format!("cd {}", config.source_name)];
        next_steps.extend(profile.next_steps.iter().cloned());

        info!(
            files = files_extracted,
            changed = changed,
            "Plugin generated"
        );

        Ok(GenerationReport {
            entry_file: rules.entry_rename().to.under(&root),
            root,
            files_extracted,
            rules_applied: summaries.len(),
            files_changed: changed,
            rules: summaries,
            removed_paths,
            warnings,
            next_steps,
        })
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn fetch(&self) -> PlugkitResult<Vec<u8>> {
        info!(source = %self.source.describe(), "Fetching boilerplate");
        let result = self.source.fetch(self.observer.as_ref());
        self.observer.on_stage_end(Stage::Fetch);
        let bytes = result.map_err(|e| e.in_stage(Stage::Fetch))?;
        debug!(bytes = bytes.len(), "Archive fetched");
        Ok(bytes)
    }

    fn materialize(
        &self,
        archive: &[u8],
        root: &Path,
        profile: &BoilerplateProfile,
    ) -> PlugkitResult<usize> {
        info!(dest = %root.display(), "Extracting boilerplate");
        let result = self
            .filesystem
            .create_dir_all(root)
            .and_then(|()| {
                self.materializer
                    .materialize(archive, root, &profile.archive_root, self.observer.as_ref())
            });
        self.observer.on_stage_end(Stage::Materialize);

        match result {
            Ok(count) => {
                debug!(entries = count, "Archive extracted");
                Ok(count)
            }
            Err(e) => {
                warn!("Extraction failed, removing partial directory");
                self.discard(root);
                Err(e.in_stage(Stage::Materialize))
            }
        }
    }

    /// Rename, then every rule in order. Fatal errors abort; per-file
    /// failures are collected for the caller.
    fn substitute(
        &self,
        root: &Path,
        rules: &RuleSet,
    ) -> PlugkitResult<(Vec<RuleSummary>, usize, Vec<FileFailure>)> {
        let result = self.apply_rules(root, rules);
        self.observer.on_stage_end(Stage::Substitute);
        result.map_err(|e| e.in_stage(Stage::Substitute))
    }

    fn apply_rules(
        &self,
        root: &Path,
        rules: &RuleSet,
    ) -> PlugkitResult<(Vec<RuleSummary>, usize, Vec<FileFailure>)> {
        let applicator = RuleApplicator::new(self.filesystem.as_ref());
        applicator.rename_entry(root, rules.entry_rename())?;

        let total = rules.len() as u64;
        let mut summaries = Vec::with_capacity(rules.len());
        let mut changed = BTreeSet::new();
        let mut failures = Vec::new();

        for (i, rule) in rules.iter().enumerate() {
            let outcome = applicator.apply_rule(root, rule).inspect_err(|_| {
                warn!(rule = rule.name(), "Aborting: rule could not be applied");
            })?;

            summaries.push(RuleSummary {
                name: rule.name().to_string(),
                files_changed: outcome.files_changed.len(),
            });
            changed.extend(outcome.files_changed);
            failures.extend(outcome.failures);

            self.observer.on_progress(ProgressEvent::new(
                Stage::Substitute,
                i as u64 + 1,
                Some(total),
            ));
        }

        Ok((summaries, changed.len(), failures))
    }

    /// Remove the profile's auxiliary paths that exist.
    fn clean(&self, root: &Path, profile: &BoilerplateProfile) -> PlugkitResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        let total = profile.cleanup_paths.len() as u64;

        for (i, rel) in profile.cleanup_paths.iter().enumerate() {
            let path = rel.under(root);
            if self.filesystem.exists(&path) {
                let result = if self.filesystem.is_dir(&path) {
                    self.filesystem.remove_dir_all(&path)
                } else {
                    self.filesystem.remove_file(&path)
                };
                if let Err(e) = result {
                    self.observer.on_stage_end(Stage::Cleanup);
                    return Err(PlugkitError::from(ApplicationError::Cleanup {
                        path,
                        reason: e.to_string(),
                    })
                    .in_stage(Stage::Cleanup));
                }
                debug!(path = %rel, "Removed");
                removed.push(rel.as_path().to_path_buf());
            }
            self.observer
                .on_progress(ProgressEvent::new(Stage::Cleanup, i as u64 + 1, Some(total)));
        }

        self.observer.on_stage_end(Stage::Cleanup);
        Ok(removed)
    }

    /// Best-effort removal of a partially materialized directory.
    fn discard(&self, root: &Path) {
        if !self.filesystem.exists(root) {
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Could not remove partial directory"
            );
        } else {
            info!("Partial directory removed");
        }
    }
}
