//! Integration tests for check command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::readjour_cmd;

fn init() -> TempDir {
    let temp = TempDir::new().unwrap();
    readjour_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

fn edit_config(temp: &TempDir, from: &str, to: &str) {
    let path = temp.path().join(".readjour/config.toml");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(from));
    fs::write(path, content.replace(from, to)).unwrap();
}

#[test]
fn test_check_default_templates() {
    let temp = init();

    readjour_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 10 templates compiled"));
}

#[test]
fn test_check_reports_each_failure() {
    let temp = init();
    edit_config(
        &temp,
        "progress = \"Read {book}: {endPage}\"",
        "progress = \"Read {book}: {startPage}\"",
    );
    edit_config(
        &temp,
        "abandoned = \"{date}: Abandoned\"",
        "abandoned = \"{date}: Abandoned {date}\"",
    );

    readjour_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "daily log progress: Template 'Read {book}: {startPage}' is missing required placeholder {endPage}",
        ))
        .stdout(predicate::str::contains("book log abandoned"))
        .stderr(predicate::str::contains("2 template(s) failed to compile"));
}

#[test]
fn test_check_invalid_date_format() {
    let temp = init();
    edit_config(
        &temp,
        "[books]\ndate_format = \"YYYY-MM-DD\"",
        "[books]\ndate_format = \"YYYY-MM\"",
    );

    readjour_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("a year, a month and a day"));
}
