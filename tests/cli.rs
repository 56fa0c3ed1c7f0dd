use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{read, write};
use std::path::Path;
use tempfile::tempdir;

/// Writes `base.001`, `base.002`, ... with the given contents.
fn write_parts(dir: &Path, base: &str, contents: &[&str]) {
    for (i, text) in contents.iter().enumerate() {
        write(dir.join(format!("{base}.{:03}", i + 1)), text).expect("Writing part failed");
    }
}

#[test]
fn join_cli_joins_and_removes_parts() {
    let tmp = tempdir().unwrap();
    write_parts(tmp.path(), "video.mkv", &["aaa", "bbb", "ccc"]);

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Joined").and(predicate::str::contains("video.mkv")));

    assert_eq!(read(tmp.path().join("video.mkv")).unwrap(), b"aaabbbccc");
    assert!(!tmp.path().join("video.mkv.001").exists());
    assert!(!tmp.path().join("video.mkv.002").exists());
    assert!(!tmp.path().join("video.mkv.003").exists());
}

#[test]
fn join_cli_keep_flag_retains_parts() {
    let tmp = tempdir().unwrap();
    write_parts(tmp.path(), "data.bin", &["12", "34"]);

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg("--keep").arg(tmp.path());

    cmd.assert().success();

    assert_eq!(read(tmp.path().join("data.bin")).unwrap(), b"1234");
    assert!(tmp.path().join("data.bin.001").exists());
    assert!(tmp.path().join("data.bin.002").exists());
}

#[test]
fn join_cli_reports_directories_without_split_files() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join("notes.txt"), "hello").unwrap();

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No split files found"));
}

#[test]
fn join_cli_warns_about_existing_destination_without_overwrite() {
    let tmp = tempdir().unwrap();
    write_parts(tmp.path(), "f", &["new", "er"]);
    write(tmp.path().join("f"), "old").unwrap();

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg(tmp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--overwrite"));
    assert_eq!(read(tmp.path().join("f")).unwrap(), b"old");

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg("-o").arg(tmp.path());
    cmd.assert().success();
    assert_eq!(read(tmp.path().join("f")).unwrap(), b"newer");
}

#[test]
fn join_cli_continues_past_unreadable_path() {
    let tmp = tempdir().unwrap();
    let good = tmp.path().join("good");
    std::fs::create_dir(&good).unwrap();
    write_parts(&good, "f", &["x", "y"]);

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg(tmp.path().join("missing")).arg(&good);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("Joined"));
    assert_eq!(read(good.join("f")).unwrap(), b"xy");
}

#[test]
fn join_cli_skips_lonely_initial_part() {
    let tmp = tempdir().unwrap();
    write_parts(tmp.path(), "solo", &["only"]);

    let mut cmd = Command::cargo_bin("autojoin").expect("Binary exists");
    cmd.arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("but no others"));
    assert!(tmp.path().join("solo.001").exists());
    assert!(!tmp.path().join("solo").exists());
}
