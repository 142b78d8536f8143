//! Runs the built binary end to end.

use std::fs;
use std::process::{Command, Output};

fn statfind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_statfind"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run statfind")
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.txt"), vec![b'a'; 10]).unwrap();
    fs::write(root.join("b.txt"), vec![b'b'; 200]).unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.txt"), vec![b'c'; 10]).unwrap();
    dir
}

#[test]
fn no_arguments_prints_usage() {
    let out = statfind(&[]);
    assert!(out.status.success());

    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Usage"));
}

#[test]
fn size_filter_prints_single_path() {
    let dir = setup_test_dir();
    let root = dir.path().to_str().unwrap();

    let out = statfind(&[root, "-size", "+50"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), vec![format!("{root}/b.txt")]);
}

#[test]
fn name_filter_descends_into_subdirectories() {
    let dir = setup_test_dir();
    let root = dir.path().to_str().unwrap();

    let out = statfind(&[root, "-name", "c.txt"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), vec![format!("{root}/sub/c.txt")]);
}

#[test]
fn non_numeric_inode_fails_before_walking() {
    let dir = setup_test_dir();
    let root = dir.path().to_str().unwrap();

    let out = statfind(&[root, "-inum", "abc"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.lines().count(), 1, "one diagnostic line: {stderr:?}");
    assert!(stderr.starts_with("statfind: "));
    assert!(stderr.contains("-inum"));
}

#[test]
fn unknown_flag_fails() {
    let dir = setup_test_dir();
    let out = statfind(&[dir.path().to_str().unwrap(), "-type", "f"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_exec_value_fails() {
    let dir = setup_test_dir();
    let out = statfind(&[dir.path().to_str().unwrap(), "-exec"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn exec_output_follows_each_path() {
    let dir = setup_test_dir();
    let root = dir.path().to_str().unwrap();
    let echo = ["/bin/echo", "/usr/bin/echo"]
        .into_iter()
        .find(|p| std::path::Path::new(p).exists())
        .expect("echo not found");

    let out = statfind(&[root, "-size", "=10", "-exec", echo]);
    assert!(out.status.success());

    // Each match is printed, then echoed back by the child.
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 4);
    for pair in lines.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}

#[test]
fn name_filter_compares_raw_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(OsStr::from_bytes(b"a\xff")), b"x").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_statfind"))
        .arg(dir.path())
        .arg("-name")
        .arg(OsStr::from_bytes(b"a\xfe"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn unreadable_root_still_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let out = statfind(&[missing.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
}
