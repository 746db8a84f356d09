//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use gaze_keys_test_support::{write_constant_gaze_model, SyntheticFrameBuilder};
use predicates::prelude::*;

fn gaze_keys(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gaze-keys").unwrap();
    cmd.current_dir(home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_xdg_config(home: &Path, content: &str) {
    let dir = home.join("config").join("gaze-keys");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

fn write_project_config(dir: &Path, content: &str) {
    fs::write(dir.join(".gaze-keys.toml"), content).unwrap();
}

#[test]
fn test_xdg_config_sets_models_dir() {
    let home = tempfile::tempdir().unwrap();
    write_xdg_config(home.path(), "[models]\ndir = '/from/xdg'\n");

    gaze_keys(home.path())
        .args(["models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/from/xdg"));
}

#[test]
fn test_project_config_overrides_xdg() {
    let home = tempfile::tempdir().unwrap();
    write_xdg_config(home.path(), "[models]\ndir = '/from/xdg'\n");
    write_project_config(home.path(), "[models]\ndir = '/from/project'\n");

    gaze_keys(home.path())
        .args(["models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/from/project"));
}

#[test]
fn test_project_config_found_in_parent() {
    let home = tempfile::tempdir().unwrap();
    write_project_config(home.path(), "[models]\ndir = '/from/parent'\n");
    let nested = home.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    gaze_keys(home.path())
        .current_dir(&nested)
        .args(["models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/from/parent"));
}

#[test]
fn test_cli_overrides_project_config() {
    let home = tempfile::tempdir().unwrap();
    write_project_config(home.path(), "[models]\ndir = '/from/project'\n");

    gaze_keys(home.path())
        .args(["models", "path", "--models-dir", "/from/cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/from/cli"));
}

#[test]
fn test_project_config_gaze_model_used_by_predict() {
    let home = tempfile::tempdir().unwrap();
    let weights = home.path().join("custom.safetensors");
    write_constant_gaze_model(&weights, 0.0, 0.0).unwrap();
    write_project_config(
        home.path(),
        &format!("[models]\ngaze_model = '{}'\n", weights.display()),
    );

    let frame = home.path().join("frame.png");
    let image = SyntheticFrameBuilder::uniform_gray(64, 64, 128);
    fs::write(&frame, SyntheticFrameBuilder::png(&image)).unwrap();

    gaze_keys(home.path())
        .arg("predict")
        .arg(&frame)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"x\":0.5"));
}

#[test]
fn test_invalid_config_is_skipped_with_warning() {
    let home = tempfile::tempdir().unwrap();
    write_project_config(home.path(), "[models\ndir = 'oops'\n");

    gaze_keys(home.path())
        .args(["models", "path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to parse config file"))
        .stdout(predicate::str::contains("gaze-keys"));
}

#[test]
fn test_out_of_range_values_warn() {
    let home = tempfile::tempdir().unwrap();
    write_project_config(home.path(), "[server]\nport = 0\nmax_upload_bytes = 0\n");

    gaze_keys(home.path())
        .args(["models", "path"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("server.port")
                .and(predicate::str::contains("server.max_upload_bytes")),
        );
}
