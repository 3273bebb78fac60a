//! Binary-level tests for the `plugkit` command.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const ROOT: &str = "wordpress-plugin-boilerplate-main/";

fn fixture_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "wordpress-plugin-boilerplate.php",
            "<?php\n/**\n * Plugin Name: WordPress Plugin Boilerplate\n * Version: 0.0.1\n * Text Domain: wordpress-plugin-boilerplate\n */\nnamespace WordPressPluginBoilerplate;\n\nfunction wordpress_plugin_boilerplate_init() {}\n",
        ),
        (
            "plugin.php",
            "<?php\nnamespace WordPressPluginBoilerplate;\n\nfinal class WordPressPluginBoilerplate {}\n",
        ),
        (
            "includes/Core/Api.php",
            "<?php\nnamespace WordPressPluginBoilerplate\\Core;\n",
        ),
        ("database/Users.php", "<?php\nnamespace WordPressPluginBoilerplate\\Database;\n"),
        ("libs/Router.php", "<?php\nnamespace WordPressPluginBoilerplate\\Libs;\n"),
        ("npm/build.js", "module.exports = {};\n"),
    ]
}

/// A temp dir holding `boilerplate.zip` and an empty `out/`.
fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default().unix_permissions(0o644);
    for (name, body) in fixture_files() {
        writer.start_file(format!("{ROOT}{name}"), opts).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    let archive = tmp.path().join("boilerplate.zip");
    fs::write(&archive, writer.finish().unwrap().into_inner()).unwrap();

    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    (tmp, archive, out)
}

/// `plugkit` pinned to a config file inside `tmp`, so a developer's own
/// config never leaks into the run.
fn plugkit(tmp: &Path) -> Command {
    let config = tmp.join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("plugkit").unwrap();
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_is_usage_error() {
    Command::cargo_bin("plugkit")
        .unwrap()
        .assert()
        .failure()
        .code(2);
}

#[test]
fn create_takes_a_single_name() {
    let tmp = TempDir::new().unwrap();
    plugkit(tmp.path())
        .args(["create", "one", "two", "--yes"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn help_succeeds() {
    Command::cargo_bin("plugkit")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}

#[test]
fn create_from_local_archive() {
    let (tmp, archive, out) = workspace();

    plugkit(tmp.path())
        .arg("create")
        .arg("sample-plugin")
        .arg("--yes")
        .arg("--archive")
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("cd sample-plugin"))
        .stdout(predicate::str::contains("composer install"));

    let root = out.join("sample-plugin");
    let entry = fs::read_to_string(root.join("sample-plugin.php")).unwrap();
    assert!(entry.contains("Plugin Name: Sample Plugin"));
    assert!(entry.contains("Version: 1.0.0"));
    assert!(entry.contains("function sample_plugin_init()"));
    assert!(!root.join("wordpress-plugin-boilerplate.php").exists());
    assert!(!root.join("npm").exists());
    assert!(
        fs::read_to_string(root.join("plugin.php"))
            .unwrap()
            .contains("final class SamplePlugin {}")
    );
}

#[test]
fn json_report_is_machine_readable() {
    let (tmp, archive, out) = workspace();

    let assert = plugkit(tmp.path())
        .args(["--output-format", "json", "create", "sample-plugin", "--yes", "--no-cleanup"])
        .arg("--archive")
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["files_extracted"], 6);
    assert_eq!(report["rules_applied"], 13);
    assert_eq!(report["removed_paths"], serde_json::json!([]));
    assert!(out.join("sample-plugin/npm/build.js").exists());
}

#[test]
fn dry_run_touches_nothing() {
    let (tmp, archive, out) = workspace();

    plugkit(tmp.path())
        .args(["create", "sample-plugin", "--yes", "--dry-run"])
        .arg("--archive")
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("namespace-declaration"));

    assert!(!out.join("sample-plugin").exists());
}

#[test]
fn existing_directory_is_refused() {
    let (tmp, archive, out) = workspace();
    fs::create_dir_all(out.join("sample-plugin")).unwrap();

    plugkit(tmp.path())
        .args(["create", "sample-plugin", "--yes"])
        .arg("--archive")
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_version_is_user_error() {
    let (tmp, archive, out) = workspace();

    plugkit(tmp.path())
        .args(["create", "sample-plugin", "--yes", "--plugin-version", "1.0"])
        .arg("--archive")
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("semantic_version"));

    assert!(!out.join("sample-plugin").exists());
}

#[test]
fn missing_archive_exits_three() {
    let (tmp, _archive, out) = workspace();

    plugkit(tmp.path())
        .args(["create", "sample-plugin", "--yes"])
        .arg("--archive")
        .arg(tmp.path().join("missing.zip"))
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(3);

    assert!(!out.join("sample-plugin").exists());
}

#[test]
fn init_writes_default_config() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested/plugkit.toml");
    let init = || {
        let mut cmd = Command::cargo_bin("plugkit").unwrap();
        cmd.arg("--config").arg(&path).arg("init");
        cmd
    };

    init().assert().success();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[boilerplate]"));
    assert!(written.contains("download_url"));

    init()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    init().arg("--force").assert().success();
}

#[test]
fn config_values_come_from_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[defaults]\nauthor_name = \"Jane Doe\"\n",
    )
    .unwrap();

    plugkit(tmp.path())
        .args(["config", "get", "defaults.author_name"])
        .assert()
        .success()
        .stdout("Jane Doe\n");
}

#[test]
fn unknown_config_key_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    plugkit(tmp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn completions_mention_binary() {
    Command::cargo_bin("plugkit")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugkit"));
}
