//! Integration tests for journeys command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{readjour_cmd, write_note};

fn vault() -> TempDir {
    let temp = TempDir::new().unwrap();
    readjour_cmd().arg("init").arg(temp.path()).assert().success();

    write_note(
        temp.path(),
        "Daily Notes/2024-10-12.md",
        "# Saturday\n\n## Reading\n\n- Started [[Book A]]\n- Read [[Book B]]: 42\n\n## Work\n\n- Started [[Project]]\n",
    );
    write_note(
        temp.path(),
        "Daily Notes/2024-10-13.md",
        "## Reading\n\n- Read [[Book B]]: 60%\n- Finished [[Book A|the first book]]\n",
    );
    write_note(
        temp.path(),
        "Books/Book A.md",
        "# Book A\n\n## Reading Log\n\n- 2024-10-01: Started\n- 2024-10-05: 30\n",
    );
    write_note(temp.path(), "Books/Book B.md", "# Book B\n");
    write_note(temp.path(), "Project.md", "# Project\n");
    temp
}

fn stdout_lines(temp: &TempDir, args: &[&str]) -> Vec<String> {
    let output = readjour_cmd()
        .current_dir(temp.path())
        .arg("journeys")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_journeys_chronological() {
    let temp = vault();

    let lines = stdout_lines(&temp, &[]);
    assert_eq!(
        lines,
        vec![
            "01-10-2024  started  Books/Book A.md",
            "05-10-2024  progress 30  Books/Book A.md",
            "12-10-2024  started  Books/Book A.md",
            "12-10-2024  progress 42  Books/Book B.md",
            "13-10-2024  progress 60%  Books/Book B.md",
            "13-10-2024  finished  Books/Book A.md",
        ]
    );
}

#[test]
fn test_journeys_from_subdirectory() {
    let temp = vault();

    readjour_cmd()
        .current_dir(temp.path().join("Books"))
        .arg("journeys")
        .assert()
        .success()
        .stdout(predicate::str::contains("12-10-2024  started  Books/Book A.md"));
}

#[test]
fn test_journeys_book_filter() {
    let temp = vault();

    let lines = stdout_lines(&temp, &["--book", "Book B"]);
    assert_eq!(
        lines,
        vec![
            "12-10-2024  progress 42  Books/Book B.md",
            "13-10-2024  progress 60%  Books/Book B.md",
        ]
    );
}

#[test]
fn test_journeys_date_range() {
    let temp = vault();

    let lines = stdout_lines(&temp, &["--from", "02-10-2024", "--to", "12-10-2024"]);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("05-10-2024"));
    assert!(lines[2].starts_with("12-10-2024"));
}

#[test]
fn test_journeys_invalid_date() {
    let temp = vault();

    readjour_cmd()
        .current_dir(temp.path())
        .args(["journeys", "--from", "2024-10-01"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("DD-MM-YYYY"));
}

#[test]
fn test_journeys_unknown_book() {
    let temp = vault();

    readjour_cmd()
        .current_dir(temp.path())
        .args(["journeys", "--book", "Missing Book"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no note matches book 'Missing Book'"));
}

#[test]
fn test_journeys_empty_vault_fails() {
    let temp = TempDir::new().unwrap();
    readjour_cmd().arg("init").arg(temp.path()).assert().success();

    readjour_cmd()
        .current_dir(temp.path())
        .arg("journeys")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reading journeys found"));
}

#[test]
fn test_journeys_warns_about_invalid_templates() {
    let temp = vault();
    let config_path = temp.path().join(".readjour/config.toml");
    let config = fs::read_to_string(&config_path).unwrap();
    fs::write(
        &config_path,
        config.replace("finished = \"Finished {book}\"", "finished = \"Finished\""),
    )
    .unwrap();

    readjour_cmd()
        .current_dir(temp.path())
        .arg("journeys")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 template(s) failed to compile"))
        .stdout(predicate::str::contains("started  Books/Book A.md"))
        .stdout(predicate::str::contains("finished").not());
}

#[test]
fn test_journeys_daily_folder_setting() {
    let temp = vault();
    let config_path = temp.path().join(".readjour/config.toml");
    let config = fs::read_to_string(&config_path).unwrap();
    fs::write(
        &config_path,
        config.replace("[daily]\n", "[daily]\nfolder = \"Journal\"\n"),
    )
    .unwrap();

    let lines = stdout_lines(&temp, &[]);
    assert_eq!(
        lines,
        vec![
            "01-10-2024  started  Books/Book A.md",
            "05-10-2024  progress 30  Books/Book A.md",
        ]
    );
}
