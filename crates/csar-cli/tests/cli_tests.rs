//! Integration tests for csar-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const META: &str = "TOSCA-Meta-File-Version: 1.0\n\
                    CSAR-Version: 1.1\n\
                    Created-By: vendor-x\n\
                    Entry-Definitions: Definitions/main.yaml\n\
                    ETSI-Entry-Manifest: main.mf\n";

const DEFINITIONS: &str = "tosca_definitions_version: tosca_simple_yaml_1_3\n";

fn csar_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("csar");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_package(dir: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    let bytes = zip.finish().unwrap().into_inner();

    let path = dir.join("pkg.csar");
    std::fs::write(&path, bytes).expect("failed to write package");
    path
}

fn sample_package(dir: &Path) -> PathBuf {
    write_package(
        dir,
        &[
            ("TOSCA-Metadata/TOSCA.meta", META),
            ("Definitions/main.yaml", DEFINITIONS),
        ],
    )
}

#[test]
fn test_version_flag() {
    csar_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("csar"));
}

#[test]
fn test_help_flag() {
    csar_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_validate_help() {
    csar_cmd()
        .args(["validate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-verify-cert"))
        .stdout(predicate::str::contains("--destination"));
}

#[test]
fn test_validate_requires_destination() {
    csar_cmd()
        .args(["validate", "pkg.csar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--destination"));
}

#[test]
fn test_validate_prints_summary_and_removes_destination() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());
    let out = temp.path().join("out");

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("is a valid CSAR"))
        .stdout(predicate::str::contains("vendor-x"))
        .stdout(predicate::str::contains("tosca_simple_yaml_1_3"));

    assert!(!out.exists());
}

#[test]
fn test_legacy_subcommand_name() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());

    csar_cmd()
        .arg("csar-validate")
        .arg(&package)
        .arg("--destination")
        .arg(temp.path().join("out"))
        .arg("--no-verify-cert")
        .assert()
        .success();
}

#[test]
fn test_validate_keep_leaves_extracted_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());
    let out = temp.path().join("out");

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .arg("--keep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted to"));

    assert!(out.join("TOSCA-Metadata/TOSCA.meta").is_file());
    assert!(out.join("Definitions/main.yaml").is_file());
}

#[test]
fn test_validate_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());

    let output = csar_cmd()
        .arg("--json")
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(temp.path().join("out"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "validate");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["metadata"]["created_by"], "vendor-x");
    assert_eq!(value["data"]["metadata"]["entry_manifest_file"], "main.mf");
    assert_eq!(value["data"]["destination_kept"], false);
}

#[test]
fn test_quiet_suppresses_summary() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());

    csar_cmd()
        .arg("-q")
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_populated_destination_is_rejected_and_preserved() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());
    let out = temp.path().join("out");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("unrelated.txt"), "keep me").unwrap();

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not empty"))
        .stderr(predicate::str::contains("HINT"));

    assert_eq!(
        std::fs::read_to_string(out.join("unrelated.txt")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_empty_existing_destination_is_removed() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());
    let out = temp.path().join("out");
    std::fs::create_dir(&out).unwrap();

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .assert()
        .success();

    assert!(!out.exists());
}

#[test]
fn test_file_destination_is_rejected_and_preserved() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = sample_package(temp.path());
    let out = temp.path().join("out.txt");
    std::fs::write(&out, "keep me").unwrap();

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not empty"));

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "keep me");
}

#[test]
fn test_missing_source_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let out = temp.path().join("out");

    csar_cmd()
        .arg("validate")
        .arg(temp.path().join("missing.csar"))
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(!out.exists());
}

#[test]
fn test_invalid_package_removes_destination() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let package = write_package(temp.path(), &[("readme.txt", "not a csar")]);
    let out = temp.path().join("out");

    csar_cmd()
        .arg("validate")
        .arg(&package)
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOSCA.meta"));

    assert!(!out.exists());
}

#[test]
fn test_completion_bash() {
    csar_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("csar"));
}
