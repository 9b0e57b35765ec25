//! Integration tests for the generate command.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

fn run_generate(output: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mxdft"))
        .arg("generate")
        .arg("-o")
        .arg(output)
        .args(args)
        .output()
        .expect("Failed to run generate command")
}

#[rstest]
#[case("identity", 8)]
#[case("ones", 64)]
#[case("zeros", 0)]
fn test_generate_patterns(#[case] pattern: &str, #[case] sum: i64) {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("m.bin");

    let result = run_generate(&output, &["-n", "3", "--pattern", pattern]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let bytes = fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 64);
    assert_eq!(bytes.iter().map(|&b| i64::from(b as i8)).sum::<i64>(), sum);
}

#[test]
fn test_generate_random_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.bin");
    let second = dir.path().join("second.bin");
    let other = dir.path().join("other.bin");

    assert!(run_generate(&first, &["-n", "5", "--seed", "7"]).status.success());
    assert!(run_generate(&second, &["-n", "5", "--seed", "7"]).status.success());
    assert!(run_generate(&other, &["-n", "5", "--seed", "8"]).status.success());

    let first = fs::read(&first).unwrap();
    assert_eq!(first.len(), 32 * 32);
    assert_eq!(first, fs::read(&second).unwrap());
    assert_ne!(first, fs::read(&other).unwrap());
}

#[test]
fn test_generate_rejects_small_exponent() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("m.bin");
    let result = run_generate(&output, &["-n", "2"]);
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_generated_inputs_feed_transform() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let output = dir.path().join("f.txt");

    assert!(run_generate(&a, &["-n", "3", "--pattern", "identity"]).status.success());
    assert!(run_generate(&b, &["-n", "3", "--seed", "1"]).status.success());

    let result = Command::new(env!("CARGO_BIN_EXE_mxdft"))
        .args(["transform", "-i"])
        .arg(&a)
        .arg("-j")
        .arg(&b)
        .arg("-o")
        .arg(&output)
        .args(["-n", "3", "-m", "4"])
        .output()
        .expect("Failed to run transform command");
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 8);
    assert!(text.lines().all(|line| line.split(", ").count() == 8));
}
