//! End-to-end tests for the `cwb` binary.
//!
//! These run the real binary against temporary projects. Nothing here needs
//! Node installed: every scenario fails or stops before webpack would run.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn cwb_bin() -> Command {
    Command::cargo_bin("cwb").unwrap()
}

fn cwb(project: &Path) -> Command {
    let mut cmd = cwb_bin();
    cmd.current_dir(project)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("CWB_OUTDIR")
        .env_remove("CWB_PACKAGENAME")
        .env_remove("CWB_TEMPDIR");
    cmd
}

/// A project with `package.json`, `src/` and the given settings file.
fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), r#"{ "name": "demo" }"#).unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/app.jsx"), "console.log('app');\n").unwrap();
    fs::write(temp.path().join("cwb.config.json"), config).unwrap();
    temp
}

#[test]
fn test_help_lists_modes() {
    cwb_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wds").and(predicate::str::contains("distserver")));
}

#[test]
fn test_empty_directory_fails_path_check() {
    let temp = TempDir::new().unwrap();

    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[check-paths]"))
        .stderr(predicate::str::contains("package.json"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_missing_entries_fail_validation() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), "{}").unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();

    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[validate-config]"))
        .stderr(predicate::str::contains("webpackConfigs"));
}

#[test]
fn test_explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();

    cwb(temp.path())
        .args(["--config", "elsewhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[config]"))
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_cwd_flag_must_be_directory() {
    let temp = TempDir::new().unwrap();

    cwb(temp.path())
        .args(["--cwd", "missing-project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[cfg(unix)]
#[test]
fn test_compile_check_failure_stops_before_lint() {
    let temp = project(
        r#"{
            "compileCheck": { "program": "sh", "args": ["-c", "echo 'SyntaxError: src/app.jsx' >&2; exit 2"] },
            "lint": { "program": "sh", "args": ["-c", "touch linted"] },
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );

    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[compile-check]"))
        .stderr(predicate::str::contains("SyntaxError"));

    assert!(!temp.path().join("linted").exists());
    assert!(!temp.path().join("dist").exists());
}

#[cfg(unix)]
#[test]
fn test_dev_server_requires_start_entry() {
    let temp = project(
        r#"{
            "compileCheck": { "program": "true" },
            "lint": { "program": "true" },
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );

    cwb(temp.path())
        .arg("wds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cwbStart"));
}

#[cfg(unix)]
#[test]
fn test_static_build_recreates_output_and_cleans_temp_entries() {
    let temp = project(
        r#"{
            "tempDir": "tmp",
            "compileCheck": { "program": "true" },
            "lint": { "program": "true" },
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );
    fs::create_dir_all(temp.path().join("dist/stale")).unwrap();
    fs::write(temp.path().join("dist/stale/old.js"), "old").unwrap();

    // No webpack installed, so bundling the first entry fails.
    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[bundle]"))
        .stderr(predicate::str::contains("'app'"));

    assert!(!temp.path().join("dist/stale").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("dist/.gitignore")).unwrap(),
        "*\n!.gitignore\n"
    );
    assert_eq!(fs::read_dir(temp.path().join("tmp")).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_precommit_hook_installed_in_git_checkout() {
    let temp = project(
        r#"{
            "compileCheck": { "program": "sh", "args": ["-c", "exit 1"] },
            "lint": { "program": "true" },
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );
    fs::create_dir(temp.path().join(".git")).unwrap();

    // Hook installation runs before the compile check fails.
    cwb(temp.path()).assert().failure();

    let hook = fs::read_to_string(temp.path().join(".git/hooks/pre-commit")).unwrap();
    assert!(hook.contains("exec true"));
}

#[test]
fn test_out_dir_at_project_root_is_rejected() {
    let temp = project(
        r#"{
            "outDir": ".",
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );

    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[validate-config]"))
        .stderr(predicate::str::contains("outDir"));

    assert!(temp.path().join("package.json").is_file());
    assert!(temp.path().join("src/app.jsx").is_file());
    assert!(temp.path().join("cwb.config.json").is_file());
}

#[cfg(unix)]
#[test]
fn test_temp_entries_default_beside_entry_file() {
    let temp = project(
        r#"{
            "compileCheck": { "program": "true" },
            "lint": { "program": "true" },
            "webpackConfigs": { "app": { "entry": "./src/app.jsx" } }
        }"#,
    );

    cwb(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[bundle]"));

    let names: Vec<_> = fs::read_dir(temp.path().join("src"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["app.jsx"]);
}
