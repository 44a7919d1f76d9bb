//! End-to-end runs of the `hashwalk` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn hashwalk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hashwalk"))
        .args(args)
        .output()
        .expect("failed to spawn hashwalk")
}

fn seed(root: &Path) {
    fs::write(root.join("a.txt"), b"alpha contents").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.txt"), b"alpha contents").unwrap();
    fs::write(root.join("sub/c.txt"), b"different").unwrap();
}

#[test]
fn help_flag_prints_help_and_exits_zero() {
    let output = hashwalk(&["-h"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("NAME\n    hashwalk\n"));
    assert!(stdout.contains("SYNOPSIS"));
    assert!(stdout.contains("-i,--input=Path,..."));
}

#[test]
fn help_wins_even_when_other_options_are_broken() {
    let output = hashwalk(&["-h", "-a=nonsense"]);
    assert!(output.status.success());
}

#[test]
fn missing_required_input_exits_one_with_help() {
    let output = hashwalk(&["-a=sha512"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: required option -i/--input was not supplied"));
    assert!(stderr.contains("NAME"));
}

#[test]
fn unknown_tag_is_reported_with_a_caret() {
    let output = hashwalk(&["-i=x", "-q"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: unknown tag `q`"));
    assert!(stderr.contains('^'));
}

#[test]
fn scan_writes_a_csv_report_to_stdout() {
    let root = TempDir::new().unwrap();
    seed(root.path());
    let input = format!("-i={}", root.path().display());

    let output = hashwalk(&[&input]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("path,size,modified,sha256"));
    assert_eq!(lines.count(), 3);
}

#[test]
fn duplicates_report_lands_in_the_requested_file() {
    let root = TempDir::new().unwrap();
    seed(root.path());
    let out_dir = TempDir::new().unwrap();
    let dups = out_dir.path().join("dups.csv");
    let input = format!("-i={}", root.path().display());
    let duplicates = format!("-d={}", dups.display());

    let output = hashwalk(&[&input, &duplicates]);
    assert!(output.status.success(), "{:?}", output);

    let written = fs::read_to_string(&dups).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("group,path,size,modified,sha256"));
    // a.txt and sub/b.txt share contents; c.txt does not appear.
    assert_eq!(lines.clone().count(), 2);
    assert!(lines.all(|line| line.starts_with("1,")));
}

#[test]
fn scan_failure_exits_two() {
    let output = hashwalk(&["-i=/no/such/folder/anywhere"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}
