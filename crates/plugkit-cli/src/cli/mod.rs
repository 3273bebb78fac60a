//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plugkit",
    bin_name = "plugkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a WordPress plugin from the plugin boilerplate",
    long_about = "plugkit downloads the WordPress plugin boilerplate and renames \
                  every name, namespace, prefix and header in it to match your plugin.",
    after_help = "EXAMPLES:\n\
        \x20 plugkit create my-plugin\n\
        \x20 plugkit create my-plugin --yes --author \"Jane Doe\"\n\
        \x20 plugkit create my-plugin --archive ./boilerplate.zip --yes\n\
        \x20 plugkit completions bash > /usr/share/bash-completion/completions/plugkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new plugin from the boilerplate.
    #[command(
        visible_alias = "new",
        about = "Create a new plugin",
        after_help = "EXAMPLES:\n\
            \x20 plugkit create my-plugin\n\
            \x20 plugkit create my-plugin --yes --namespace Acme\\\\MyPlugin --prefix acme\n\
            \x20 plugkit create my-plugin --dry-run --yes"
    )]
    Create(CreateArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plugkit init\n\
            \x20 plugkit --config ./plugkit.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plugkit completions bash > ~/.local/share/bash-completion/completions/plugkit\n\
            \x20 plugkit completions zsh  > ~/.zfunc/_plugkit\n\
            \x20 plugkit completions fish > ~/.config/fish/completions/plugkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 plugkit config get boilerplate.download_url\n\
            \x20 plugkit config list\n\
            \x20 plugkit config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `plugkit create`.
#[derive(Debug, Default, Args)]
pub struct CreateArgs {
    /// Plugin slug. Used as the directory name and to derive every default.
    #[arg(value_name = "NAME", help = "Plugin slug, e.g. my-plugin")]
    pub name: String,

    /// Accept derived defaults without prompting.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,

    /// Print the resolved configuration and rule plan, then stop.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,

    /// Use a local boilerplate archive instead of downloading it.
    #[arg(
        long = "archive",
        value_name = "ZIP",
        conflicts_with = "url",
        help = "Local boilerplate zip to use instead of downloading"
    )]
    pub archive: Option<PathBuf>,

    /// Override the boilerplate download URL.
    #[arg(long = "url", value_name = "URL", help = "Boilerplate download URL")]
    pub url: Option<String>,

    /// Keep npm/, .github/ and the other auxiliary paths.
    #[arg(long = "no-cleanup", help = "Keep auxiliary boilerplate directories")]
    pub no_cleanup: bool,

    /// Directory the plugin directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub fields: FieldOverrides,
}

/// Per-field overrides; anything left unset is derived from the name.
#[derive(Debug, Default, Clone, Args)]
#[command(next_help_heading = "Plugin fields")]
pub struct FieldOverrides {
    #[arg(long = "display-name", value_name = "TEXT")]
    pub display_name: Option<String>,

    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    #[arg(long = "plugin-version", value_name = "X.Y.Z")]
    pub version: Option<String>,

    /// Entry file name, e.g. `my-plugin.php`.
    #[arg(long = "file-name", value_name = "FILE")]
    pub file_name: Option<String>,

    #[arg(long = "author", value_name = "NAME")]
    pub author: Option<String>,

    #[arg(long = "author-uri", value_name = "URI")]
    pub author_uri: Option<String>,

    #[arg(long = "text-domain", value_name = "DOMAIN")]
    pub text_domain: Option<String>,

    #[arg(long = "domain-path", value_name = "PATH")]
    pub domain_path: Option<String>,

    /// Main class name.
    #[arg(long = "class-name", value_name = "NAME")]
    pub class_name: Option<String>,

    /// Main entry function name.
    #[arg(long = "function-name", value_name = "NAME")]
    pub function_name: Option<String>,

    #[arg(long = "namespace", value_name = "NS")]
    pub namespace: Option<String>,

    /// Lowercase function prefix, without the trailing `_`.
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Uppercase constant prefix, without the trailing `_`.
    #[arg(long = "constant-prefix", value_name = "PREFIX")]
    pub constant_prefix: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `plugkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plugkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `plugkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author_name`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from(["plugkit", "create", "my-plugin", "--yes"]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, "my-plugin");
                assert!(args.yes);
                assert!(!args.dry_run);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn new_is_an_alias_for_create() {
        let cli = Cli::parse_from(["plugkit", "new", "my-plugin"]);
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn field_overrides_are_parsed() {
        let cli = Cli::parse_from([
            "plugkit",
            "create",
            "my-plugin",
            "--plugin-version",
            "2.0.0",
            "--namespace",
            "Acme\\Tools",
            "--prefix",
            "acme",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.fields.version.as_deref(), Some("2.0.0"));
        assert_eq!(args.fields.namespace.as_deref(), Some("Acme\\Tools"));
        assert_eq!(args.fields.prefix.as_deref(), Some("acme"));
        assert_eq!(args.fields.class_name, None);
    }

    #[test]
    fn create_takes_exactly_one_name() {
        assert!(Cli::try_parse_from(["plugkit", "create"]).is_err());
        assert!(Cli::try_parse_from(["plugkit", "create", "a", "b"]).is_err());
    }

    #[test]
    fn archive_and_url_conflict() {
        let result = Cli::try_parse_from([
            "plugkit",
            "create",
            "p",
            "--archive",
            "a.zip",
            "--url",
            "https://example.com/a.zip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["plugkit", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
