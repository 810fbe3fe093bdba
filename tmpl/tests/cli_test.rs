//! Integration tests for the tmpl binary

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

/// Command isolated from any user or working-directory config
fn tmpl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tmpl").expect("Binary should be built");
    cmd.current_dir(dir).env("XDG_CONFIG_HOME", dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_stdin_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["--var", "who=world"])
        .write_stdin("Hello {{var \"who\"}}!")
        .assert()
        .success()
        .stdout("Hello world!");
}

#[test]
fn test_dash_reads_stdin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["-f", "-"])
        .write_stdin("{{upper \"x\"}}")
        .assert()
        .success()
        .stdout("X");
}

#[test]
fn test_vars_file_and_template_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .arg("-f")
        .arg(testdata("deployment.template"))
        .arg("-v")
        .arg(testdata("vars.yml"))
        .env("DEPLOY_USER", "pipeline")
        .assert()
        .success()
        .stdout(predicate::str::contains("image: nginx:1.25"))
        .stdout(predicate::str::contains("containerPort: 8080"))
        .stdout(predicate::str::contains("value: pipeline"));
}

#[test]
fn test_flag_overrides_vars_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .arg("-v")
        .arg(testdata("vars.yml"))
        .args(["--var", "replicas=2"])
        .write_stdin("{{var \"replicas\"}}")
        .assert()
        .success()
        .stdout("2");
}

#[test]
fn test_num_applied_after_var() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["--var", "n=text", "--num", "n=4", "--num", "f=1.5"])
        .write_stdin("{{var \"n\"}} {{var \"f\"}}")
        .assert()
        .success()
        .stdout("4 1.5");
}

#[test]
fn test_invalid_num_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["--num", "n=many"])
        .write_stdin("{{var \"n\"}}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number"));
}

#[test]
fn test_var_without_equals_is_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["--var", "broken", "--var", "ok=yes"])
        .write_stdin("{{var \"ok\"}}{{var \"broken\" \"-\"}}")
        .assert()
        .success()
        .stdout("yes-");
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out = temp_dir.path().join("out.txt");
    tmpl(temp_dir.path())
        .arg("-o")
        .arg(&out)
        .write_stdin("written")
        .assert()
        .success()
        .stdout("");
    assert_eq!(std::fs::read_to_string(&out).expect("Output should exist"), "written");
}

#[test]
fn test_failed_render_leaves_no_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out = temp_dir.path().join("out.txt");
    tmpl(temp_dir.path())
        .arg("-o")
        .arg(&out)
        .write_stdin("partial {{var \"missing\"}}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
    assert!(!out.exists());
}

#[test]
fn test_unknown_helper_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .write_stdin("{{explode \"now\"}}")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("explode"));
}

#[test]
fn test_include_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .arg("--include")
        .arg(testdata("partials.template"))
        .write_stdin("{{> banner}}")
        .assert()
        .success()
        .stdout(predicate::str::contains("# generated by tmpl"));
}

#[test]
fn test_config_in_working_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("tmpl.yml"), "strict: false\n").expect("Failed to write config");
    tmpl(temp_dir.path())
        .write_stdin("[{{missing}}]")
        .assert()
        .success()
        .stdout("[]");
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .args(["-c", "nope.yml"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    tmpl(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
