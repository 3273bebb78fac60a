//! Applies substitution rules to a materialized tree.
//!
//! The applicator holds no state between calls: each `apply_rule` walks the
//! rule's scope, rewrites matching files, and reports what changed and what
//! could not be read or written.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::{
    application::{
        ApplicationError,
        error::FileFailure,
        ports::Filesystem,
    },
    domain::{EntryRename, ScopeTarget, SubstitutionRule},
    error::{PlugkitError, PlugkitResult},
};

/// Result of one rule over its whole scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    /// Files whose content changed, relative to the project root.
    pub files_changed: Vec<PathBuf>,
    /// Files that could not be read or written. Non-fatal.
    #[serde(skip)]
    pub failures: Vec<FileFailure>,
}

pub struct RuleApplicator<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> RuleApplicator<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Rename the boilerplate entry file. Runs once, before any rule.
    #[instrument(skip_all, fields(from = %rename.from, to = %rename.to))]
    pub fn rename_entry(&self, root: &Path, rename: &EntryRename) -> PlugkitResult<()> {
        if rename.is_noop() {
            debug!("Entry file keeps its name");
            return Ok(());
        }

        let from = rename.from.under(root);
        let to = rename.to.under(root);
        let fail = |reason: String| -> PlugkitResult<()> {
            Err(ApplicationError::Rename {
                from: from.clone(),
                to: to.clone(),
                reason,
            }
            .into())
        };

        if !self.fs.is_file(&from) {
            return fail("entry file not found in the boilerplate".into());
        }
        if self.fs.exists(&to) {
            return fail("destination already exists".into());
        }
        if let Err(e) = self.fs.rename(&from, &to) {
            return fail(e.to_string());
        }

        debug!("Entry file renamed");
        Ok(())
    }

    /// Apply one rule to every file in its scope.
    ///
    /// A scope path that does not exist aborts with `ScopeResolution`.
    /// Unreadable or unwritable files are collected in the outcome and the
    /// walk continues.
    #[instrument(skip_all, fields(rule = rule.name()))]
    pub fn apply_rule(&self, root: &Path, rule: &SubstitutionRule) -> PlugkitResult<RuleOutcome> {
        let mut outcome = RuleOutcome::default();
        let mut seen = BTreeSet::new();

        for target in rule.scope() {
            let scoped = target.path().under(root);
            match target {
                ScopeTarget::File(_) => {
                    if !self.fs.is_file(&scoped) {
                        return Err(self.unresolved(rule, target));
                    }
                    if seen.insert(scoped.clone()) {
                        self.rewrite(root, &scoped, rule, &mut outcome);
                    }
                }
                ScopeTarget::Tree(_) => {
                    if !self.fs.is_dir(&scoped) {
                        return Err(self.unresolved(rule, target));
                    }
                    for entry in self.fs.walk_files(&scoped) {
                        match entry {
                            Ok(path) => {
                                let relative = relative_to(root, &path);
                                if !rule.filter().accepts(&relative) {
                                    trace!(path = %relative.display(), "Filtered out");
                                    continue;
                                }
                                if seen.insert(path.clone()) {
                                    self.rewrite(root, &path, rule, &mut outcome);
                                }
                            }
                            Err(e) => {
                                warn!(error = %e, "Could not visit entry");
                                let failed = failed_path(&e).unwrap_or(&scoped);
                                outcome.failures.push(FileFailure {
                                    rule: rule.name().to_string(),
                                    path: relative_to(root, failed),
                                    reason: e.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        debug!(
            changed = outcome.files_changed.len(),
            failed = outcome.failures.len(),
            "Rule applied"
        );
        Ok(outcome)
    }

    fn rewrite(&self, root: &Path, path: &Path, rule: &SubstitutionRule, outcome: &mut RuleOutcome) {
        let relative = relative_to(root, path);
        let failure = |reason: String| FileFailure {
            rule: rule.name().to_string(),
            path: relative.clone(),
            reason,
        };

        let content = match self.fs.read_file(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %relative.display(), error = %e, "Read failed");
                outcome.failures.push(failure(e.to_string()));
                return;
            }
        };

        let updated = rule.apply_to(&content);
        if updated.as_ref() == content.as_slice() {
            return;
        }

        match self.fs.write_file(path, &updated) {
            Ok(()) => {
                trace!(path = %relative.display(), "Rewritten");
                outcome.files_changed.push(relative);
            }
            Err(e) => {
                warn!(path = %relative.display(), error = %e, "Write failed");
                outcome.failures.push(failure(e.to_string()));
            }
        }
    }

    fn unresolved(&self, rule: &SubstitutionRule, target: &ScopeTarget) -> PlugkitError {
        ApplicationError::ScopeResolution {
            rule: rule.name().to_string(),
            path: target.path().as_path().to_path_buf(),
        }
        .into()
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// The entry a filesystem error is about, when the adapter reported one.
fn failed_path(err: &PlugkitError) -> Option<&Path> {
    match err.root() {
        PlugkitError::Application(ApplicationError::FilesystemError { path, .. }) => Some(path),
        _ => None,
    }
}
