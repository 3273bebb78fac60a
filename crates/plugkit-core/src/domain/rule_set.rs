//! The ordered rule table built from a `ProjectConfig`.
//!
//! Order is part of the contract. Each rule runs against the output of the
//! rules before it, so longer tokens that contain shorter ones (the entry
//! function contains the function prefix, `namespace X` contains `X`) are
//! always listed first.

use std::path::Path;

use serde::Serialize;

use super::common::RelativePath;
use super::error::DomainError;
use super::profile::BoilerplateProfile;
use super::project_config::{ConfigWarning, ProjectConfig};
use super::rule::{FileFilter, Pattern, ScopeTarget, SubstitutionRule};

/// The one-time rename of the boilerplate entry file. Not a rule: it runs
/// once, before any content is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRename {
    pub from: RelativePath,
    pub to: RelativePath,
}

impl EntryRename {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    entry_rename: EntryRename,
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// Instantiate the rule table for one run.
    ///
    /// Fails with `InvalidPattern` before anything is touched if a pattern
    /// does not compile.
    pub fn build(config: &ProjectConfig, profile: &BoilerplateProfile) -> Result<Self, DomainError> {
        let t = &profile.tokens;
        let entry = RelativePath::try_new(&config.entry_file_name).map_err(|_| {
            DomainError::InvalidConfig {
                field: "entry_file_name",
                reason: format!("'{}' must stay inside the project", config.entry_file_name),
            }
        })?;

        let entry_only = || vec![ScopeTarget::File(entry.clone())];
        let entry_and_glue = || {
            vec![
                ScopeTarget::File(entry.clone()),
                ScopeTarget::File(profile.glue_file.clone()),
            ]
        };
        let filter = FileFilter::Extension(profile.source_extension.clone());
        let rule = |name: &str, pattern: Pattern, replacement: String, scope| {
            SubstitutionRule::new(name, pattern, replacement, scope, filter.clone())
        };

        let mut rules = Vec::new();

        // Plugin header, entry file only.
        rules.push(rule(
            "display-name",
            Pattern::literal(&t.display_name),
            config.display_name.clone(),
            entry_only(),
        ));
        for (name, token, value) in [
            ("description", &t.description, &config.description),
            ("author-name", &t.author_name, &config.author_name),
            ("author-uri", &t.author_uri, &config.author_uri),
        ] {
            if !value.trim().is_empty() {
                rules.push(rule(name, Pattern::literal(token), value.clone(), entry_only()));
            }
        }
        rules.push(rule(
            "version",
            Pattern::regex("version", &t.version_header)?,
            format!("{}: {}", t.version_key, config.semantic_version),
            entry_only(),
        ));
        rules.push(rule(
            "text-domain",
            Pattern::literal(format!("Text Domain: {}", t.text_domain)),
            format!("Text Domain: {}", config.text_domain),
            entry_only(),
        ));
        rules.push(rule(
            "domain-path",
            Pattern::literal(format!("Domain Path: {}", t.domain_path)),
            format!("Domain Path: {}", config.locale_path),
            entry_only(),
        ));

        // Namespace declarations and imports: root files, then source trees.
        let declaration = format!("namespace {}", t.namespace);
        let import = format!("use {}", t.namespace);
        let new_declaration = format!("namespace {}", config.namespace_token);
        let new_import = format!("use {}", config.namespace_token);
        rules.push(rule(
            "namespace-declaration-root",
            Pattern::literal(&declaration),
            new_declaration.clone(),
            entry_and_glue(),
        ));
        rules.push(rule(
            "namespace-import-root",
            Pattern::literal(&import),
            new_import.clone(),
            entry_and_glue(),
        ));
        rules.push(rule(
            "namespace-declaration",
            Pattern::literal(&declaration),
            new_declaration,
            trees(&profile.namespaced_dirs),
        ));
        rules.push(rule(
            "namespace-import",
            Pattern::literal(&import),
            new_import,
            trees(&profile.namespaced_dirs),
        ));
        rules.push(rule(
            "namespace-token",
            Pattern::literal(&t.namespace),
            config.namespace_token.clone(),
            trees(&profile.bare_namespace_dirs),
        ));

        // Symbols, longest token first.
        let mut prefixed = entry_and_glue();
        prefixed.extend(trees(&profile.prefixed_dirs));
        rules.push(rule(
            "entry-function",
            Pattern::literal(&t.entry_function),
            config.main_entry_function_name.clone(),
            entry_and_glue(),
        ));
        rules.push(rule(
            "function-prefix",
            Pattern::literal(&t.function_prefix),
            format!("{}_", config.identifier_prefix),
            prefixed.clone(),
        ));
        rules.push(rule(
            "main-type",
            Pattern::literal(&t.main_type),
            config.main_type_name.clone(),
            entry_and_glue(),
        ));

        rules.push(rule(
            "constant-prefix",
            Pattern::literal(&t.constant_prefix),
            format!("{}_", config.constant_prefix),
            prefixed,
        ));

        Ok(Self {
            entry_rename: EntryRename {
                from: profile.entry_file.clone(),
                to: entry,
            },
            rules,
        })
    }

    /// Wrap an explicit rule list. The rename is a no-op on `entry`.
    pub fn from_rules(entry: RelativePath, rules: Vec<SubstitutionRule>) -> Self {
        Self {
            entry_rename: EntryRename {
                from: entry.clone(),
                to: entry,
            },
            rules,
        }
    }

    pub fn entry_rename(&self) -> &EntryRename {
        &self.entry_rename
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubstitutionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose scope covers `path` (relative to the project root).
    pub fn rules_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a SubstitutionRule> {
        self.rules.iter().filter(move |r| {
            r.scope().iter().any(|s| match s {
                ScopeTarget::File(p) => p.as_path() == path,
                ScopeTarget::Tree(p) => path.starts_with(p.as_path()) && r.filter().accepts(path),
            })
        })
    }

    /// Run every applicable rule, in order, over one file's content.
    pub fn apply_to_file(&self, path: &Path, content: &[u8]) -> Vec<u8> {
        self.rules_for(path)
            .fold(content.to_vec(), |acc, rule| rule.apply_to(&acc).into_owned())
    }

    /// Replacement values that a second run would rewrite: values containing
    /// the rule's own pattern, or a literal token a later rule with an
    /// overlapping scope will rewrite.
    pub fn reintroduced_tokens(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        for (i, earlier) in self.rules.iter().enumerate() {
            if earlier.reapplies_to_own_output() {
                warnings.push(ConfigWarning::RewritesOwnOutput {
                    rule: earlier.name().to_string(),
                    token: earlier.pattern().as_str().to_string(),
                });
            }
            for later in &self.rules[i + 1..] {
                let Pattern::Literal(token) = later.pattern() else {
                    continue;
                };
                if earlier.replacement().contains(token.as_str())
                    && earlier.shares_scope_with(later)
                {
                    warnings.push(ConfigWarning::ReintroducedToken {
                        rule: earlier.name().to_string(),
                        token: token.clone(),
                        later_rule: later.name().to_string(),
                    });
                }
            }
        }
        warnings
    }
}

fn trees(dirs: &[RelativePath]) -> Vec<ScopeTarget> {
    dirs.iter().cloned().map(ScopeTarget::Tree).collect()
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a SubstitutionRule;
    type IntoIter = std::slice::Iter<'a, SubstitutionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
