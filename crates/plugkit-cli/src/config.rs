//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `PLUGKIT__SECTION__KEY` environment variables (`.env` is loaded first)
//! 3. Config file (`--config`, else the platform config path)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use plugkit_core::domain::BoilerplateProfile;
use plugkit_core::domain::profile::{WORDPRESS_ARCHIVE_ROOT, WORDPRESS_DOWNLOAD_URL};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the boilerplate comes from.
    pub boilerplate: BoilerplateConfig,
    /// Values pre-filled for every new plugin.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerplateConfig {
    pub download_url: String,
    /// Root folder wrapping every entry of the archive.
    pub archive_root: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author_name: String,
    pub author_uri: String,
    /// Initial plugin version; empty means `1.0.0`.
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            boilerplate: BoilerplateConfig::default(),
            defaults: Defaults::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for BoilerplateConfig {
    fn default() -> Self {
        Self {
            download_url: WORDPRESS_DOWNLOAD_URL.into(),
            archive_root: WORDPRESS_ARCHIVE_ROOT.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// A file passed with `--config` must exist unless `must_exist` is
    /// false; the platform default is always optional.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), must_exist),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("PLUGKIT").separator("__"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to encode built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.plugkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "prappo", "plugkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".plugkit.toml"))
    }

    /// The WordPress profile with the configured download location.
    pub fn profile(&self) -> BoilerplateProfile {
        BoilerplateProfile::wordpress()
            .with_download_url(&self.boilerplate.download_url)
            .with_archive_root(&self.boilerplate.archive_root)
    }
}
