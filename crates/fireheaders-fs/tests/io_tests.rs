//! Tests for file reading and atomic writing

use std::fs;

use fireheaders_fs::{Error, read_text, write_atomic, write_text};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn write_atomic_creates_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("firebase.json");

    write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn write_atomic_overwrites_existing_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("firebase.json");
    fs::write(&path, "original").unwrap();

    write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn write_atomic_leaves_no_temp_files_behind() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("firebase.json");

    write_atomic(&path, b"{}").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("firebase.json")]);
}

#[test]
fn read_text_returns_the_contents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("_headers");
    fs::write(&path, "/*\n  X-Test: 1\n").unwrap();

    assert_eq!(read_text(&path).unwrap(), "/*\n  X-Test: 1\n");
}

#[test]
fn missing_file_reads_as_the_friendly_hint() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing_headers");

    let err = read_text(&path).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    let message = err.to_string();
    assert!(message.contains("missing_headers"));
    assert!(message.contains("please confirm the file exists."));
}

#[test]
fn write_text_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("firebase.json");

    write_text(&path, "{\n}\n").unwrap();

    assert_eq!(read_text(&path).unwrap(), "{\n}\n");
}
