//! Integration tests for plugkit-core: the full rule table over a
//! representative boilerplate tree, without touching the filesystem.

use std::collections::BTreeMap;
use std::path::Path;

use plugkit_core::prelude::*;

fn boilerplate() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (
            "sample-plugin.php",
            "<?php\n/**\n * Plugin Name: WordPress Plugin Boilerplate\n * Version: 0.1.0\n * Text Domain: wordpress-plugin-boilerplate\n */\nnamespace WordPressPluginBoilerplate;\n\ndefine( 'WORDPRESS_PLUGIN_BOILERPLATE_VERSION', '0.1.0' );\n\nfunction wordpress_plugin_boilerplate_init() {\n\treturn WordPressPluginBoilerplate::instance();\n}\n",
        ),
        (
            "plugin.php",
            "<?php\nnamespace WordPressPluginBoilerplate;\n\nuse WordPressPluginBoilerplate\\Core\\Install;\n\nfinal class WordPressPluginBoilerplate {\n\tconst DIR = WORDPRESS_PLUGIN_BOILERPLATE_DIR;\n}\n",
        ),
        (
            "includes/Core/Api.php",
            "<?php\nnamespace WordPressPluginBoilerplate\\Core;\n\nuse WordPressPluginBoilerplate\\Traits\\Base;\n\nfunction wordpress_plugin_boilerplate_route() {\n\treturn \\WordPressPluginBoilerplate\\Routes::all( WORDPRESS_PLUGIN_BOILERPLATE_URL );\n}\n",
        ),
        (
            "includes/Assets/app.js",
            "// WordPressPluginBoilerplate wordpress_plugin_boilerplate_ stays\n",
        ),
        (
            "database/Migrations/Users.php",
            "<?php\nnamespace WordPressPluginBoilerplate\\Database\\Migrations;\n\nclass Users extends \\WordPressPluginBoilerplate\\Database\\Migration {}\n",
        ),
        (
            "libs/Router.php",
            "<?php\nnamespace WordPressPluginBoilerplate\\Libs;\n\nuse WordPressPluginBoilerplate\\Core\\Api;\n\n$class = 'WordPressPluginBoilerplate\\\\Routes';\n",
        ),
        (
            "src/admin/main.jsx",
            "export const NS = 'WordPressPluginBoilerplate';\n",
        ),
    ])
}

fn apply(rules: &RuleSet, path: &str, content: &str) -> String {
    String::from_utf8(rules.apply_to_file(Path::new(path), content.as_bytes())).unwrap()
}

fn run(rules: &RuleSet) -> BTreeMap<&'static str, String> {
    boilerplate()
        .into_iter()
        .map(|(path, content)| (path, apply(rules, path, content)))
        .collect()
}

fn sample_rules() -> RuleSet {
    let profile = BoilerplateProfile::wordpress();
    let config = ProjectConfig::derive("sample-plugin", &profile).unwrap();
    RuleSet::build(&config, &profile).unwrap()
}

#[test]
fn sample_plugin_tree_is_fully_rewritten() {
    let out = run(&sample_rules());

    let entry = &out["sample-plugin.php"];
    assert!(entry.contains("Plugin Name: Sample Plugin"));
    assert!(entry.contains("Version: 1.0.0"));
    assert!(entry.contains("namespace SamplePlugin;"));
    assert!(entry.contains("SAMPLE_PLUGIN_VERSION"));
    assert!(entry.contains("function sample_plugin_init()"));

    let glue = &out["plugin.php"];
    assert!(glue.contains("namespace SamplePlugin;"));
    assert!(glue.contains("use SamplePlugin\\Core\\Install;"));
    assert!(glue.contains("final class SamplePlugin {"));
    assert!(glue.contains("SAMPLE_PLUGIN_DIR"));

    let api = &out["includes/Core/Api.php"];
    assert!(api.contains("namespace SamplePlugin\\Core;"));
    assert!(api.contains("use SamplePlugin\\Traits\\Base;"));
    assert!(api.contains("function sample_plugin_route()"));
    assert!(api.contains("\\SamplePlugin\\Routes::all( SAMPLE_PLUGIN_URL )"));

    let migration = &out["database/Migrations/Users.php"];
    assert!(migration.contains("namespace SamplePlugin\\Database\\Migrations;"));
    assert!(migration.contains("extends \\SamplePlugin\\Database\\Migration"));

    for path in [
        "sample-plugin.php",
        "plugin.php",
        "includes/Core/Api.php",
        "database/Migrations/Users.php",
    ] {
        for token in [
            "WordPressPluginBoilerplate",
            "wordpress_plugin_boilerplate_",
            "WORDPRESS_PLUGIN_BOILERPLATE_",
        ] {
            assert!(!out[path].contains(token), "{token} left in {path}");
        }
    }
}

#[test]
fn files_outside_scope_are_untouched() {
    let original = boilerplate();
    let out = run(&sample_rules());

    assert_eq!(out["includes/Assets/app.js"], original["includes/Assets/app.js"]);
    assert_eq!(out["src/admin/main.jsx"], original["src/admin/main.jsx"]);
}

#[test]
fn libs_only_get_declarations_and_imports() {
    let out = run(&sample_rules());
    let router = &out["libs/Router.php"];

    assert!(router.contains("namespace SamplePlugin\\Libs;"));
    assert!(router.contains("use SamplePlugin\\Core\\Api;"));
    assert!(router.contains("'WordPressPluginBoilerplate\\\\Routes'"));
}

#[test]
fn second_pass_changes_nothing() {
    let rules = sample_rules();
    let once = run(&rules);
    for (path, content) in &once {
        assert_eq!(
            &apply(&rules, path, content),
            content,
            "second pass changed {path}"
        );
    }
}

#[test]
fn latin1_bytes_survive_substitution() {
    let rules = sample_rules();
    let legacy = b"<?php\nnamespace WordPressPluginBoilerplate\\Core;\n// Fran\xe7ais\n";
    let out = rules.apply_to_file(Path::new("includes/Core/Legacy.php"), legacy);
    assert_eq!(out, b"<?php\nnamespace SamplePlugin\\Core;\n// Fran\xe7ais\n");
}

#[test]
fn custom_values_flow_into_every_scope() {
    let profile = BoilerplateProfile::wordpress();
    let config = ProjectConfig::derive("sample-plugin", &profile)
        .unwrap()
        .with_namespace("Acme\\Sample")
        .with_identifier_prefix("acme")
        .with_constant_prefix("ACME");
    config.validate().unwrap();
    let rules = RuleSet::build(&config, &profile).unwrap();
    let out = run(&rules);

    assert!(out["includes/Core/Api.php"].contains("namespace Acme\\Sample\\Core;"));
    assert!(out["includes/Core/Api.php"].contains("function acme_route()"));
    assert!(out["includes/Core/Api.php"].contains("ACME_URL"));
    assert!(out["sample-plugin.php"].contains("function sample_plugin_init()"));
}
