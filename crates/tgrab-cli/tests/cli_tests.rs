//! Integration tests for tgrab-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use tgrab_core::test_utils::{gz_bytes, tar_gz_bytes, zip_bytes};

fn tgrab_cmd() -> Command {
    cargo_bin_cmd!("tgrab")
}

#[test]
fn test_version_flag() {
    tgrab_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tgrab"));
}

#[test]
fn test_help_flag() {
    tgrab_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_explode_help() {
    tgrab_cmd()
        .arg("explode")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("explode local archive files"));
}

/// Exploding a multi-entry zip rolls everything into a base-named
/// directory beside the archive.
#[test]
fn test_explode_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bar.zip");
    fs::write(&archive, zip_bytes(&[("a.txt", b"a"), ("b.txt", b"b")])).unwrap();

    tgrab_cmd().arg("explode").arg(&archive).assert().success();

    assert!(temp.path().join("bar/a.txt").exists());
    assert!(temp.path().join("bar/b.txt").exists());
    assert!(archive.exists());
}

/// Nested archives resolve across formats from the CLI entry point too.
#[test]
fn test_explode_resolves_nesting() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let inner = zip_bytes(&[("inner/leaf.txt", b"leaf")]);
    let archive = temp.path().join("outer.tar.gz");
    fs::write(&archive, tar_gz_bytes(&[("inner.zip", &inner)])).unwrap();

    tgrab_cmd()
        .arg("explode")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Explode complete"));

    assert!(temp.path().join("outer/inner/leaf.txt").exists());
    assert!(!temp.path().join("outer/inner.zip").exists());
}

#[test]
fn test_explode_multiple_files_accumulate() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let zip = temp.path().join("first.zip");
    fs::write(&zip, zip_bytes(&[("first/x.txt", b"x")])).unwrap();
    let gz = temp.path().join("second.log.gz");
    fs::write(&gz, gz_bytes(b"log line\n")).unwrap();

    tgrab_cmd()
        .arg("--json")
        .arg("explode")
        .arg(&zip)
        .arg(&gz)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"archives_exploded\": 2"));

    assert!(temp.path().join("first/x.txt").exists());
    assert!(temp.path().join("second.log").exists());
}

/// A corrupt archive is contained: the run still succeeds, the file stays.
#[test]
fn test_explode_corrupt_archive_is_contained() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("broken.zip");
    fs::write(&archive, b"not a zip").unwrap();

    tgrab_cmd()
        .arg("--verbose")
        .arg("explode")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("corrupt archive"));

    assert!(archive.exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

/// A file that is not an archive is a quiet no-op.
#[test]
fn test_explode_non_archive_is_noop() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let pdf = temp.path().join("report.pdf");
    fs::write(&pdf, b"%PDF-1.4").unwrap();

    tgrab_cmd()
        .arg("--json")
        .arg("explode")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"archives_exploded\": 0"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

/// Without connection settings, grab refuses to start and explains how to
/// configure itself.
#[test]
fn test_grab_without_connection_settings_fails_with_hint() {
    let home = TempDir::new().expect("failed to create temp dir");

    tgrab_cmd()
        .env("HOME", home.path())
        .env_remove("USERPROFILE")
        .arg("grab")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_grab_rejects_malformed_config_file() {
    let home = TempDir::new().expect("failed to create temp dir");
    let config = home.path().join("bad.toml");
    fs::write(&config, "url = ").unwrap();

    tgrab_cmd()
        .env("HOME", home.path())
        .arg("grab")
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}
