//! Description of the boilerplate archive being customized.
//!
//! A profile names everything about the upstream tree that the rule table
//! needs: where to get it, how its archive is wrapped, which files carry the
//! plugin header, where namespaced sources live, and the literal tokens that
//! get replaced.

use serde::Serialize;

use super::common::RelativePath;

/// Placeholder tokens as they appear in the upstream boilerplate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoilerplateTokens {
    pub display_name: String,
    pub description: String,
    pub author_name: String,
    pub author_uri: String,
    /// Regex matching the version header line, e.g. `Version: 1.2.3`.
    pub version_header: String,
    /// Header key preceding the version in the replacement (`Version`).
    pub version_key: String,
    pub text_domain: String,
    pub domain_path: String,
    pub namespace: String,
    pub main_type: String,
    pub function_prefix: String,
    pub entry_function: String,
    pub constant_prefix: String,
}

/// A boilerplate archive and the layout of the tree inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoilerplateProfile {
    pub name: String,
    pub download_url: String,
    /// Root segment wrapping every archive entry (`repo-main/`).
    pub archive_root: String,
    /// Entry file as shipped; renamed to `ProjectConfig::entry_file_name`.
    pub entry_file: RelativePath,
    /// Top-level module glue file that shares the entry file's namespace rules.
    pub glue_file: RelativePath,
    pub source_extension: String,
    /// Directories whose sources declare or import the namespace.
    pub namespaced_dirs: Vec<RelativePath>,
    /// Subset of `namespaced_dirs` where the bare namespace token is replaced.
    pub bare_namespace_dirs: Vec<RelativePath>,
    /// Directories using the lowercase function prefix and constant prefix.
    pub prefixed_dirs: Vec<RelativePath>,
    pub tokens: BoilerplateTokens,
    /// Auxiliary paths removed after generation.
    pub cleanup_paths: Vec<RelativePath>,
    /// Commands suggested once the project exists, run from its root.
    pub next_steps: Vec<String>,
}

pub const WORDPRESS_DOWNLOAD_URL: &str =
    "https://github.com/prappo/wordpress-plugin-boilerplate/archive/refs/heads/main.zip";
pub const WORDPRESS_ARCHIVE_ROOT: &str = "wordpress-plugin-boilerplate-main/";

impl BoilerplateProfile {
    /// The WordPress plugin boilerplate.
    pub fn wordpress() -> Self {
        Self {
            name: "wordpress-plugin-boilerplate".into(),
            download_url: WORDPRESS_DOWNLOAD_URL.into(),
            archive_root: WORDPRESS_ARCHIVE_ROOT.into(),
            entry_file: RelativePath::new("wordpress-plugin-boilerplate.php"),
            glue_file: RelativePath::new("plugin.php"),
            source_extension: "php".into(),
            namespaced_dirs: vec![
                RelativePath::new("includes"),
                RelativePath::new("database"),
                RelativePath::new("libs"),
            ],
            bare_namespace_dirs: vec![RelativePath::new("includes"), RelativePath::new("database")],
            prefixed_dirs: vec![RelativePath::new("includes")],
            tokens: BoilerplateTokens {
                display_name: "WordPress Plugin Boilerplate".into(),
                description: "A boilerplate for WordPress plugins.".into(),
                author_name: "Prappo".into(),
                author_uri: "https://prappo.github.io".into(),
                version_header: r"Version: [0-9]+\.[0-9]+\.[0-9]+".into(),
                version_key: "Version".into(),
                text_domain: "wordpress-plugin-boilerplate".into(),
                domain_path: "/languages".into(),
                namespace: "WordPressPluginBoilerplate".into(),
                main_type: "WordPressPluginBoilerplate".into(),
                function_prefix: "wordpress_plugin_boilerplate_".into(),
                entry_function: "wordpress_plugin_boilerplate_init".into(),
                constant_prefix: "WORDPRESS_PLUGIN_BOILERPLATE_".into(),
            },
            cleanup_paths: vec![
                RelativePath::new("npm"),
                RelativePath::new(".storybook"),
                RelativePath::new("documentation"),
                RelativePath::new(".github"),
            ],
            next_steps: vec![
                "npm install".into(),
                "composer install".into(),
                "npm run dev".into(),
            ],
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    /// Override the archive root segment. A trailing `/` is added if missing;
    /// an empty value means entries are not wrapped.
    pub fn with_archive_root(mut self, root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.is_empty() && !root.ends_with('/') {
            root.push('/');
        }
        self.archive_root = root;
        self
    }
}

impl Default for BoilerplateProfile {
    fn default() -> Self {
        Self::wordpress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wordpress_profile_layout() {
        let p = BoilerplateProfile::wordpress();
        assert_eq!(p.entry_file.to_string(), "wordpress-plugin-boilerplate.php");
        assert_eq!(p.archive_root, "wordpress-plugin-boilerplate-main/");
        assert!(
            p.bare_namespace_dirs
                .iter()
                .all(|d| p.namespaced_dirs.contains(d))
        );
        assert_eq!(p.cleanup_paths.len(), 4);
    }

    #[test]
    fn archive_root_gets_trailing_slash() {
        let p = BoilerplateProfile::wordpress().with_archive_root("fork-main");
        assert_eq!(p.archive_root, "fork-main/");

        let p = BoilerplateProfile::wordpress().with_archive_root("");
        assert_eq!(p.archive_root, "");
    }
}
