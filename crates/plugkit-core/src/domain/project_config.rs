//! The resolved configuration for one generated plugin.
//!
//! A `ProjectConfig` is derived from the project name alone: every field the
//! rule table needs gets a deterministic default, so a config built with
//! [`ProjectConfig::derive`] is always complete. The resolver (interactive or
//! flag driven) then overrides individual fields and calls
//! [`ProjectConfig::validate`] before handing the config to the orchestrator.
//!
//! This module must not import `tracing`.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;
use super::naming::{to_pascal_case, to_screaming_snake_case, to_snake_case, to_title_case};
use super::profile::BoilerplateProfile;
use super::rule_set::RuleSet;

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_LOCALE_PATH: &str = "/languages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub display_name: String,
    pub description: String,
    pub semantic_version: String,
    pub entry_file_name: String,
    pub author_name: String,
    pub author_uri: String,
    pub text_domain: String,
    pub locale_path: String,
    pub main_type_name: String,
    pub main_entry_function_name: String,
    pub namespace_token: String,
    pub identifier_prefix: String,
    pub constant_prefix: String,
    /// Raw project name. Names the output directory; never substituted into
    /// file contents.
    pub source_name: String,
}

/// A non-fatal problem with a config that still produces a usable rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// Prefix and namespace tokens contain one another; rule order decides.
    OverlappingTokens { prefix: String, namespace: String },
    /// A replacement value contains a token a later rule will rewrite again.
    ReintroducedToken {
        rule: String,
        token: String,
        later_rule: String,
    },
    /// A replacement value contains the rule's own pattern, so every run
    /// rewrites it again.
    RewritesOwnOutput { rule: String, token: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingTokens { prefix, namespace } => write!(
                f,
                "prefix '{prefix}' and namespace '{namespace}' overlap; replacements follow rule order"
            ),
            Self::ReintroducedToken {
                rule,
                token,
                later_rule,
            } => write!(
                f,
                "the value written by '{rule}' contains '{token}', which '{later_rule}' will replace again"
            ),
            Self::RewritesOwnOutput { rule, token } => write!(
                f,
                "the value written by '{rule}' contains '{token}', so running it again changes the output"
            ),
        }
    }
}

impl ProjectConfig {
    /// Derive a complete config from a project name.
    pub fn derive(source_name: &str, profile: &BoilerplateProfile) -> Result<Self, DomainError> {
        validate_source_name(source_name)?;

        let snake = to_snake_case(source_name);
        let pascal = to_pascal_case(source_name);
        if snake.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: source_name.to_string(),
                reason: "must contain at least one ASCII letter or digit".into(),
            });
        }

        Ok(Self {
            display_name: to_title_case(source_name),
            description: String::new(),
            semantic_version: DEFAULT_VERSION.into(),
            entry_file_name: format!("{}.{}", source_name, profile.source_extension),
            author_name: String::new(),
            author_uri: String::new(),
            text_domain: source_name.to_string(),
            locale_path: DEFAULT_LOCALE_PATH.into(),
            main_type_name: pascal.clone(),
            main_entry_function_name: format!("{snake}_init"),
            namespace_token: pascal,
            identifier_prefix: snake,
            constant_prefix: to_screaming_snake_case(source_name),
            source_name: source_name.to_string(),
        })
    }

    pub fn with_display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = value.into();
        self
    }

    pub fn with_version(mut self, value: impl Into<String>) -> Self {
        self.semantic_version = value.into();
        self
    }

    pub fn with_entry_file_name(mut self, value: impl Into<String>) -> Self {
        self.entry_file_name = value.into();
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.author_name = name.into();
        self.author_uri = uri.into();
        self
    }

    pub fn with_text_domain(mut self, value: impl Into<String>) -> Self {
        self.text_domain = value.into();
        self
    }

    pub fn with_locale_path(mut self, value: impl Into<String>) -> Self {
        self.locale_path = value.into();
        self
    }

    pub fn with_main_type_name(mut self, value: impl Into<String>) -> Self {
        self.main_type_name = value.into();
        self
    }

    pub fn with_main_entry_function_name(mut self, value: impl Into<String>) -> Self {
        self.main_entry_function_name = value.into();
        self
    }

    pub fn with_namespace(mut self, value: impl Into<String>) -> Self {
        self.namespace_token = value.into();
        self
    }

    pub fn with_identifier_prefix(mut self, value: impl Into<String>) -> Self {
        self.identifier_prefix = value.into();
        self
    }

    pub fn with_constant_prefix(mut self, value: impl Into<String>) -> Self {
        self.constant_prefix = value.into();
        self
    }

    /// Check that every value is safe to substitute.
    ///
    /// The orchestrator does not call this; resolvers do, before a run.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_source_name(&self.source_name)?;

        let required: [(&'static str, &str); 10] = [
            ("display_name", &self.display_name),
            ("semantic_version", &self.semantic_version),
            ("entry_file_name", &self.entry_file_name),
            ("text_domain", &self.text_domain),
            ("locale_path", &self.locale_path),
            ("main_type_name", &self.main_type_name),
            ("main_entry_function_name", &self.main_entry_function_name),
            ("namespace_token", &self.namespace_token),
            ("identifier_prefix", &self.identifier_prefix),
            ("constant_prefix", &self.constant_prefix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::MissingRequiredField { field });
            }
        }

        if !is_semver(&self.semantic_version) {
            return Err(invalid(
                "semantic_version",
                format!("'{}' is not MAJOR.MINOR.PATCH", self.semantic_version),
            ));
        }

        if self.entry_file_name.contains(['/', '\\']) || self.entry_file_name == ".." {
            return Err(invalid(
                "entry_file_name",
                "must be a file name, not a path".into(),
            ));
        }

        for (field, value) in [
            ("main_type_name", &self.main_type_name),
            ("main_entry_function_name", &self.main_entry_function_name),
            ("identifier_prefix", &self.identifier_prefix),
            ("constant_prefix", &self.constant_prefix),
        ] {
            if !is_identifier(value) {
                return Err(invalid(field, format!("'{value}' is not a valid identifier")));
            }
        }

        if !self.namespace_token.split('\\').all(is_identifier) {
            return Err(invalid(
                "namespace_token",
                format!("'{}' is not a valid namespace", self.namespace_token),
            ));
        }

        if self.identifier_prefix != self.identifier_prefix.to_lowercase() {
            return Err(invalid("identifier_prefix", "must be lowercase".into()));
        }

        if self.constant_prefix != self.constant_prefix.to_uppercase() {
            return Err(invalid("constant_prefix", "must be uppercase".into()));
        }

        Ok(())
    }

    /// Non-fatal hazards: overlapping tokens and values a later rule would
    /// rewrite again.
    pub fn warnings(&self, profile: &BoilerplateProfile) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let prefix = self.identifier_prefix.to_lowercase();
        let namespace = self.namespace_token.to_lowercase();
        if !prefix.is_empty()
            && !namespace.is_empty()
            && (prefix.contains(&namespace) || namespace.contains(&prefix))
        {
            warnings.push(ConfigWarning::OverlappingTokens {
                prefix: self.identifier_prefix.clone(),
                namespace: self.namespace_token.clone(),
            });
        }

        if let Ok(rules) = RuleSet::build(self, profile) {
            warnings.extend(rules.reintroduced_tokens());
        }

        warnings
    }
}

fn invalid(field: &'static str, reason: String) -> DomainError {
    DomainError::InvalidConfig { field, reason }
}

fn validate_source_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.trim().is_empty() {
        Some("cannot be empty")
    } else if name.contains(['/', '\\']) {
        Some("cannot contain path separators")
    } else if name == "." || name == ".." {
        Some("cannot be a relative directory reference")
    } else if name.starts_with('-') {
        Some("cannot start with '-'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_semver(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
