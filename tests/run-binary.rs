use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn run_corridor() {
    Command::main_binary()
        .unwrap()
        .arg("levels/custom/two-pulls.txt")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn run_custom_depth() {
    Command::main_binary()
        .unwrap()
        .arg("--initial-depth")
        .arg("100")
        .arg("levels/custom/two-boxes.txt")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn run_bad_level() {
    // parse errors go to stderr only
    Command::main_binary()
        .unwrap()
        .arg("levels/custom/bad-two-players.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_missing_file() {
    Command::main_binary()
        .unwrap()
        .arg("levels/custom/does-not-exist.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_bad_depth() {
    Command::main_binary()
        .unwrap()
        .arg("--initial-depth")
        .arg("lots")
        .arg("levels/custom/two-pulls.txt")
        .assert()
        .failure()
        .stdout("");
}
