#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn readjour_cmd() -> Command {
    let mut cmd = Command::cargo_bin("readjour").unwrap();
    cmd.env_remove("READJOUR_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn write_note(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
