//! Resolving a complete [`ProjectConfig`] from the plugin name, config file
//! defaults, command-line overrides and, on a terminal, interactive prompts.

use std::io::IsTerminal;

use plugkit_core::domain::{BoilerplateProfile, ProjectConfig};
use plugkit_core::error::PlugkitError;

use crate::cli::FieldOverrides;
use crate::config::Defaults;
use crate::error::{CliError, CliResult};

/// Build and validate the config for `name`.
///
/// Precedence, lowest first: values derived from the name, `[defaults]` from
/// the config file, command-line flags, answers typed at the prompt.
pub fn resolve(
    name: &str,
    fields: &FieldOverrides,
    defaults: &Defaults,
    profile: &BoilerplateProfile,
    interactive: bool,
) -> CliResult<ProjectConfig> {
    let derived = ProjectConfig::derive(name, profile).map_err(PlugkitError::from)?;
    let mut config = apply_overrides(apply_defaults(derived, defaults), fields);

    if interactive {
        config = prompt_fields(config)?;
    }

    config.validate().map_err(PlugkitError::from)?;
    Ok(config)
}

/// Whether prompts can be shown at all.
pub fn can_prompt() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal()
}

fn apply_defaults(mut config: ProjectConfig, defaults: &Defaults) -> ProjectConfig {
    if !defaults.author_name.is_empty() {
        config.author_name = defaults.author_name.clone();
    }
    if !defaults.author_uri.is_empty() {
        config.author_uri = defaults.author_uri.clone();
    }
    if !defaults.version.is_empty() {
        config.semantic_version = defaults.version.clone();
    }
    config
}

fn apply_overrides(mut config: ProjectConfig, fields: &FieldOverrides) -> ProjectConfig {
    let slots = [
        (&fields.display_name, &mut config.display_name),
        (&fields.description, &mut config.description),
        (&fields.version, &mut config.semantic_version),
        (&fields.file_name, &mut config.entry_file_name),
        (&fields.author, &mut config.author_name),
        (&fields.author_uri, &mut config.author_uri),
        (&fields.text_domain, &mut config.text_domain),
        (&fields.domain_path, &mut config.locale_path),
        (&fields.class_name, &mut config.main_type_name),
        (&fields.function_name, &mut config.main_entry_function_name),
        (&fields.namespace, &mut config.namespace_token),
        (&fields.prefix, &mut config.identifier_prefix),
        (&fields.constant_prefix, &mut config.constant_prefix),
    ];
    for (value, slot) in slots {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }
    config
}

#[cfg(feature = "interactive")]
fn prompt_error(e: dialoguer::Error) -> CliError {
    CliError::InvalidInput {
        message: format!("prompt failed: {e}"),
        source: None,
    }
}

/// Ask for every field, offering the current value as the default.
#[cfg(feature = "interactive")]
fn prompt_fields(mut config: ProjectConfig) -> CliResult<ProjectConfig> {
    use dialoguer::Input;

    let slots = [
        ("Plugin name", &mut config.display_name),
        ("Description", &mut config.description),
        ("Version", &mut config.semantic_version),
        ("Main file name", &mut config.entry_file_name),
        ("Author", &mut config.author_name),
        ("Author URI", &mut config.author_uri),
        ("Text domain", &mut config.text_domain),
        ("Domain path", &mut config.locale_path),
        ("Main class name", &mut config.main_type_name),
        ("Main function name", &mut config.main_entry_function_name),
        ("Namespace", &mut config.namespace_token),
        ("Function prefix", &mut config.identifier_prefix),
        ("Constant prefix", &mut config.constant_prefix),
    ];
    for (label, slot) in slots {
        *slot = Input::<String>::new()
            .with_prompt(label)
            .default(slot.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
    }
    Ok(config)
}

#[cfg(not(feature = "interactive"))]
fn prompt_fields(config: ProjectConfig) -> CliResult<ProjectConfig> {
    Ok(config)
}

/// Final yes/no before anything is downloaded.
#[cfg(feature = "interactive")]
pub fn confirm(question: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
        .map_err(prompt_error)
}

#[cfg(not(feature = "interactive"))]
pub fn confirm(_question: &str) -> CliResult<bool> {
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugkit_core::error::ErrorKind;

    fn profile() -> BoilerplateProfile {
        BoilerplateProfile::wordpress()
    }

    #[test]
    fn defaults_only() {
        let config = resolve(
            "sample-plugin",
            &FieldOverrides::default(),
            &Defaults::default(),
            &profile(),
            false,
        )
        .unwrap();
        assert_eq!(config.display_name, "Sample Plugin");
        assert_eq!(config.identifier_prefix, "sample_plugin");
        assert_eq!(config.semantic_version, "1.0.0");
    }

    #[test]
    fn flags_beat_config_defaults() {
        let defaults = Defaults {
            author_name: "Config Author".into(),
            author_uri: "https://config.example".into(),
            version: "0.1.0".into(),
        };
        let fields = FieldOverrides {
            author: Some("Flag Author".into()),
            namespace: Some("Acme\\Sample".into()),
            prefix: Some("acme".into()),
            ..FieldOverrides::default()
        };

        let config = resolve("sample-plugin", &fields, &defaults, &profile(), false).unwrap();

        assert_eq!(config.author_name, "Flag Author");
        assert_eq!(config.author_uri, "https://config.example");
        assert_eq!(config.semantic_version, "0.1.0");
        assert_eq!(config.namespace_token, "Acme\\Sample");
        assert_eq!(config.identifier_prefix, "acme");
        assert_eq!(config.constant_prefix, "SAMPLE_PLUGIN");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let fields = FieldOverrides {
            version: Some("1.0".into()),
            ..FieldOverrides::default()
        };
        let err = resolve("sample-plugin", &fields, &Defaults::default(), &profile(), false)
            .unwrap_err();
        match err {
            CliError::Core(core) => assert_eq!(core.kind(), ErrorKind::InvalidConfig),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_name_is_rejected() {
        let err = resolve("../escape", &FieldOverrides::default(), &Defaults::default(), &profile(), false)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
