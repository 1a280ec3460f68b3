use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn word_freq(args: &[&str], log: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_word-freq"))
        .arg("-l")
        .arg(log)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn missing_root_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("absent");
    let out = word_freq(&[root.to_str().unwrap()], &dir.path().join("run.log"));

    assert_eq!(out.status.code(), Some(2));
    let log = fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("invalid document root"), "{}", log);
}

#[test]
fn counted_directory_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "cat dog").unwrap();
    fs::write(dir.path().join("b.txt"), "dog dog").unwrap();
    let log = tempfile::tempdir().unwrap();

    let out = word_freq(&[dir.path().to_str().unwrap()], &log.path().join("run.log"));

    assert!(out.status.success(), "{:?}", out);
    assert_eq!(
        fs::read_to_string(dir.path().join("totals.out")).unwrap(),
        "3   dog\n1   cat\n"
    );
}

#[test]
fn uncreatable_output_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "words").unwrap();
    let output = dir.path().join("no").join("such");

    let out = word_freq(
        &["-o", output.to_str().unwrap(), dir.path().to_str().unwrap()],
        &dir.path().join("run.log"),
    );

    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn missing_argument_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_word-freq"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
}
