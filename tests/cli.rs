//! End-to-end tests for the cfgload binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("cfgload.json");
    fs::write(&path, content).unwrap();
    path
}

fn cfgload() -> Command {
    Command::cargo_bin("cfgload").unwrap()
}

#[test]
fn test_show_prints_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout("/var/data\n");
}

#[test]
fn test_show_json_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data", "unused": true}"#);

    let output = cfgload()
        .arg("--config")
        .arg(&path)
        .args(["show", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let encoded: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(encoded, serde_json::json!({"root": "/var/data"}));
}

#[test]
fn test_show_uses_default_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "{}");

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(".\n");

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["--default-root", "/opt/app", "show"])
        .assert()
        .success()
        .stdout("/opt/app\n");
}

#[test]
fn test_missing_field_without_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "{}");

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["--no-defaults", "show"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("missing required field `root`"));
}

#[test]
fn test_type_mismatch_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": 12}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("validate")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("field `root` has type number"));
}

#[test]
fn test_missing_file_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    cfgload()
        .arg("--config")
        .arg(temp_dir.path().join("nope.json"))
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration error"));
}

#[cfg(unix)]
#[test]
fn test_permission_denied_exit_code() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data"}"#);
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to root.
    if fs::File::open(&path).is_ok() {
        return;
    }

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Permission denied"));
}

#[test]
fn test_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();

    cfgload()
        .arg("--config")
        .arg(temp_dir.path())
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["--verbose", "show"])
        .assert()
        .success()
        .stdout("/var/data\n")
        .stderr(predicate::str::contains("Read 21 bytes"));
}

#[test]
fn test_too_large_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["--max-size", "8", "show"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("exceeding the 8 byte limit"));
}

#[test]
fn test_parse_error_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/var/data""#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid JSON at line 1"));
}

#[test]
fn test_validate_reports_origin() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/srv"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid!"))
        .stdout(predicate::str::contains("Root: /srv (file)"));
}

#[test]
fn test_init_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.json");

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["init", "--root", "/data"])
        .assert()
        .success();

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout("/data\n");
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, r#"{"root": "/keep"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"root": "/keep"}"#);

    cfgload()
        .arg("--config")
        .arg(&path)
        .args(["init", "--force"])
        .assert()
        .success();

    cfgload()
        .arg("--config")
        .arg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(".\n");
}
