//! End-to-end CLI tests.
//!
//! Invokes the scriptpack binary against the fixture application in
//! `tests/fixtures/demo_app` and verifies the artifact contract: exit code 0
//! means the artifact exists in the output directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_descriptor() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/demo_app/bundle.toml")
}

fn scriptpack() -> Command {
    Command::cargo_bin("scriptpack").expect("binary builds")
}

#[test]
fn bundles_fixture_app_into_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let bin_dir = tmp.path().join("bin");

    scriptpack()
        .arg("-d")
        .arg(fixture_descriptor())
        .arg("-o")
        .arg(&bin_dir)
        .arg("--work-dir")
        .arg(tmp.path().join("work"))
        .arg("--target")
        .arg("x86_64-unknown-linux-gnu")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"))
        .stdout(predicate::str::contains("sha256:"));

    let artifact = bin_dir.join("demo_0.1.0_x86_64.tar.gz");
    assert!(artifact.is_file(), "artifact missing: {}", artifact.display());
}

#[test]
fn windows_target_yields_zip_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let bin_dir = tmp.path().join("bin");

    scriptpack()
        .arg("-d")
        .arg(fixture_descriptor())
        .arg("-o")
        .arg(&bin_dir)
        .arg("--work-dir")
        .arg(tmp.path().join("work"))
        .arg("--target")
        .arg("x86_64-pc-windows-msvc")
        .assert()
        .success();

    assert!(bin_dir.join("demo_0.1.0_x86_64.zip").is_file());
}

#[test]
fn check_accepts_valid_descriptor() {
    scriptpack()
        .arg("-d")
        .arg(fixture_descriptor())
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn check_reports_every_problem_in_broken_descriptor() {
    let tmp = tempfile::tempdir().unwrap();
    let descriptor = tmp.path().join("bundle.toml");
    std::fs::write(
        &descriptor,
        r#"
            [package]
            name = "broken"
            version = "not-semver"

            [entry]
            script = "missing/main.py"

            [modules]
            include = ["not a module"]

            [output]
            name = "broken"
        "#,
    )
    .unwrap();

    scriptpack()
        .arg("-d")
        .arg(&descriptor)
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed"))
        .stderr(predicate::str::contains("semver"))
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("importable module name"));
}

#[test]
fn init_writes_default_descriptor_once() {
    let tmp = tempfile::tempdir().unwrap();
    let descriptor = tmp.path().join("bundle.toml");

    scriptpack()
        .arg("-d")
        .arg(&descriptor)
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let raw = std::fs::read_to_string(&descriptor).unwrap();
    assert!(raw.contains("[package]"));
    assert!(raw.contains("[output]"));

    // A second --init must not overwrite the existing descriptor
    scriptpack()
        .arg("-d")
        .arg(&descriptor)
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn check_and_init_conflict() {
    scriptpack()
        .arg("--check")
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflicting arguments"));
}

#[test]
fn missing_descriptor_is_a_readable_error() {
    scriptpack()
        .arg("-d")
        .arg("/nonexistent/bundle.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading descriptor"));
}
