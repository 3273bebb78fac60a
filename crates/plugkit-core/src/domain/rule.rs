//! A single substitution rule.
//!
//! Rules are immutable values: a compiled pattern, the text that replaces it,
//! the paths it may touch and a filter for files found under directory
//! scopes. Applying a rule to content is pure; walking the tree is the
//! applicator's job.
//!
//! Content is matched as bytes. Source files are usually UTF-8, but vendored
//! code may carry Latin-1 comments and must still be rewritten.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use regex::bytes::{NoExpand, Regex};
use serde::{Serialize, Serializer};

use super::common::RelativePath;
use super::error::DomainError;

/// What a rule looks for.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact text.
    Literal(String),
    /// A compiled regular expression.
    Regex(Regex),
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regex pattern; `rule` names the owner for error reporting.
    pub fn regex(rule: &str, source: &str) -> Result<Self, DomainError> {
        Regex::new(source)
            .map(Self::Regex)
            .map_err(|e| DomainError::InvalidPattern {
                rule: rule.to_string(),
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) => s,
            Self::Regex(re) => re.as_str(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.is_literal() == other.is_literal() && self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One path a rule is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ScopeTarget {
    /// Exactly one file, which must exist.
    File(RelativePath),
    /// A directory, walked recursively; files pass through the rule's filter.
    Tree(RelativePath),
}

impl ScopeTarget {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(p) | Self::Tree(p) => p,
        }
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    /// Whether any file could fall under both scopes.
    pub fn overlaps(&self, other: &ScopeTarget) -> bool {
        let (a, b) = (self.path().as_path(), other.path().as_path());
        match (self, other) {
            (Self::File(_), Self::File(_)) => a == b,
            (Self::Tree(_), Self::File(_)) => b.starts_with(a),
            (Self::File(_), Self::Tree(_)) => a.starts_with(b),
            (Self::Tree(_), Self::Tree(_)) => a.starts_with(b) || b.starts_with(a),
        }
    }
}

impl fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{p}"),
            Self::Tree(p) => write!(f, "{p}/**"),
        }
    }
}

/// Which files under a [`ScopeTarget::Tree`] a rule touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFilter {
    /// Files with this extension (no leading dot), compared case-sensitively.
    Extension(String),
    Any,
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            Self::Any => true,
            Self::Extension(ext) => path.extension().is_some_and(|e| e == ext.as_str()),
        }
    }
}

/// An immutable substitution rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionRule {
    name: String,
    pattern: Pattern,
    replacement: String,
    scope: Vec<ScopeTarget>,
    filter: FileFilter,
}

impl SubstitutionRule {
    pub fn new(
        name: impl Into<String>,
        pattern: Pattern,
        replacement: impl Into<String>,
        scope: Vec<ScopeTarget>,
        filter: FileFilter,
    ) -> Self {
        Self {
            name: name.into(),
            pattern,
            replacement: replacement.into(),
            scope,
            filter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn scope(&self) -> &[ScopeTarget] {
        &self.scope
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Replace every occurrence of the pattern. The replacement is inserted
    /// verbatim; `$1` in a value is not a group reference.
    pub fn apply_to<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        let replacement = self.replacement.as_bytes();
        match &self.pattern {
            Pattern::Literal(needle) => replace_literal(content, needle.as_bytes(), replacement),
            Pattern::Regex(re) => re.replace_all(content, NoExpand(replacement)),
        }
    }

    /// Whether the replacement still contains what the rule looks for, so a
    /// second run would rewrite its own output.
    pub fn reapplies_to_own_output(&self) -> bool {
        let replacement = self.replacement.as_bytes();
        self.apply_to(replacement).as_ref() != replacement
    }

    /// Whether this rule and `other` can touch the same file.
    pub fn shares_scope_with(&self, other: &SubstitutionRule) -> bool {
        self.scope
            .iter()
            .any(|a| other.scope.iter().any(|b| a.overlaps(b)))
    }
}

fn replace_literal<'a>(haystack: &'a [u8], needle: &[u8], replacement: &[u8]) -> Cow<'a, [u8]> {
    if needle.is_empty() {
        return Cow::Borrowed(haystack);
    }
    let Some(first) = find(haystack, needle) else {
        return Cow::Borrowed(haystack);
    };

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut at = Some(first);
    while let Some(i) = at {
        out.extend_from_slice(&rest[..i]);
        out.extend_from_slice(replacement);
        rest = &rest[i + needle.len()..];
        at = find(rest, needle);
    }
    out.extend_from_slice(rest);
    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope: Vec<String> = self.scope.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}: '{}' -> '{}' in [{}]",
            self.name,
            self.pattern.as_str(),
            self.replacement,
            scope.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: Pattern, replacement: &str) -> SubstitutionRule {
        SubstitutionRule::new(
            "test",
            pattern,
            replacement,
            vec![ScopeTarget::File(RelativePath::new("a.php"))],
            FileFilter::Any,
        )
    }

    fn apply(r: &SubstitutionRule, content: &str) -> String {
        String::from_utf8(r.apply_to(content.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn literal_replaces_globally() {
        let r = rule(Pattern::literal("Foo"), "Bar");
        assert_eq!(apply(&r, "Foo and Foo"), "Bar and Bar");
    }

    #[test]
    fn unchanged_content_is_borrowed() {
        let r = rule(Pattern::literal("Foo"), "Bar");
        assert!(matches!(r.apply_to(b"nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn regex_replacement_is_verbatim() {
        let r = rule(
            Pattern::regex("version", r"Version: [0-9]+\.[0-9]+\.[0-9]+").unwrap(),
            "Version: $1.0",
        );
        assert_eq!(apply(&r, " * Version: 2.3.4\n"), " * Version: $1.0\n");
    }

    #[test]
    fn literal_pattern_is_not_a_regex() {
        let r = rule(Pattern::literal("a.b"), "x");
        assert_eq!(apply(&r, "a.b axb"), "x axb");
    }

    #[test]
    fn latin1_content_is_rewritten_in_place() {
        let r = rule(Pattern::literal("WordPressPluginBoilerplate"), "SamplePlugin");
        let content = b"namespace WordPressPluginBoilerplate; // caf\xe9 WordPressPluginBoilerplate";
        assert_eq!(
            r.apply_to(content).as_ref(),
            b"namespace SamplePlugin; // caf\xe9 SamplePlugin"
        );

        let version = rule(
            Pattern::regex("version", r"Version: [0-9]+\.[0-9]+\.[0-9]+").unwrap(),
            "Version: 1.0.0",
        );
        assert_eq!(
            version.apply_to(b"\xe9 Version: 0.1.2 \xff").as_ref(),
            b"\xe9 Version: 1.0.0 \xff"
        );
    }

    #[test]
    fn adjacent_literal_matches() {
        let r = rule(Pattern::literal("ab"), "c");
        assert_eq!(apply(&r, "ababxab"), "ccxc");
        assert_eq!(apply(&r, "a"), "a");
    }

    #[test]
    fn replacement_containing_pattern_reapplies() {
        let pro = rule(
            Pattern::literal("WordPress Plugin Boilerplate"),
            "WordPress Plugin Boilerplate Pro",
        );
        assert!(pro.reapplies_to_own_output());
        assert_eq!(
            apply(&pro, &apply(&pro, "WordPress Plugin Boilerplate")),
            "WordPress Plugin Boilerplate Pro Pro"
        );

        assert!(!rule(Pattern::literal("Foo"), "Bar").reapplies_to_own_output());
        assert!(!rule(Pattern::literal("Foo"), "Foo").reapplies_to_own_output());

        // Matches its own output but rewrites it to the same text.
        let version = rule(Pattern::regex("version", r"Version: [0-9]+").unwrap(), "Version: 2");
        assert!(!version.reapplies_to_own_output());
    }

    #[test]
    fn invalid_regex_is_rejected_with_rule_name() {
        let err = Pattern::regex("broken", "(unclosed").unwrap_err();
        match err {
            DomainError::InvalidPattern { rule, pattern, .. } => {
                assert_eq!(rule, "broken");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extension_filter() {
        let f = FileFilter::Extension("php".into());
        assert!(f.accepts(Path::new("includes/Core/Api.php")));
        assert!(!f.accepts(Path::new("includes/app.js")));
        assert!(!f.accepts(Path::new("includes/php")));
        assert!(FileFilter::Any.accepts(Path::new("README")));
    }

    #[test]
    fn scope_overlap() {
        let includes = ScopeTarget::Tree(RelativePath::new("includes"));
        let nested = ScopeTarget::File(RelativePath::new("includes/Core/Api.php"));
        let entry = ScopeTarget::File(RelativePath::new("plugin.php"));
        let libs = ScopeTarget::Tree(RelativePath::new("libs"));

        assert!(includes.overlaps(&nested));
        assert!(nested.overlaps(&includes));
        assert!(!includes.overlaps(&entry));
        assert!(!includes.overlaps(&libs));
        assert!(entry.overlaps(&entry.clone()));
    }

    #[test]
    fn display_marks_recursive_scopes() {
        let r = SubstitutionRule::new(
            "ns",
            Pattern::literal("A"),
            "B",
            vec![
                ScopeTarget::File(RelativePath::new("plugin.php")),
                ScopeTarget::Tree(RelativePath::new("includes")),
            ],
            FileFilter::Any,
        );
        assert_eq!(r.to_string(), "ns: 'A' -> 'B' in [plugin.php, includes/**]");
    }
}
