//! Integration tests for the transform command.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use mxdft_lib::dft::dft2_reference;
use mxdft_matrix::Matrix;
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::{assert_transform_close, read_product_output, read_transform_output, write_matrix_file};

/// Output values are rounded to three decimals.
const OUTPUT_TOLERANCE: f64 = 1e-3;

/// Ones on the diagonal and twos just right of it (wrapping), so every row sums to 3.
fn banded(side: usize) -> impl Fn(usize, usize) -> i8 {
    move |r, c| {
        if r == c {
            1
        } else if c == (r + 1) % side {
            2
        } else {
            0
        }
    }
}

struct Inputs {
    dir: TempDir,
    a: PathBuf,
    b: PathBuf,
}

impl Inputs {
    fn new(side: usize, a: impl Fn(usize, usize) -> i8, b: impl Fn(usize, usize) -> i8) -> Self {
        let dir = TempDir::new().unwrap();
        let a_path = dir.path().join("a.bin");
        let b_path = dir.path().join("b.bin");
        write_matrix_file(&a_path, side, a);
        write_matrix_file(&b_path, side, b);
        Self { dir, a: a_path, b: b_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run_transform(a: &Path, b: &Path, output: &Path, exponent: &str, threads: &str, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mxdft"))
        .args(["transform", "-i"])
        .arg(a)
        .arg("-j")
        .arg(b)
        .arg("-o")
        .arg(output)
        .args(["-n", exponent, "-m", threads])
        .args(extra)
        .output()
        .expect("Failed to run transform command")
}

#[test]
fn test_transform_banded_times_ones() {
    let side = 8;
    let inputs = Inputs::new(side, banded(side), |_, _| 1);
    let output = inputs.path("f.txt");
    let product = inputs.path("c.txt");

    let result = run_transform(
        &inputs.a,
        &inputs.b,
        &output,
        "3",
        "2",
        &["--product", product.to_str().unwrap()],
    );
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let c = read_product_output(&product);
    assert_eq!(c.len(), side);
    for row in &c {
        assert_eq!(row, &vec![3.0; side]);
    }

    let expected_c = Matrix::from_fn(side, |_, _| 3.0).unwrap();
    let expected_f = dft2_reference(&expected_c).unwrap();
    let expected: Vec<Vec<_>> = expected_f.rows().map(<[_]>::to_vec).collect();
    assert_transform_close(&read_transform_output(&output), &expected, OUTPUT_TOLERANCE);
}

#[test]
fn test_transform_matches_reference_for_general_inputs() {
    let side = 16;
    let a = |r: usize, c: usize| ((r * 31 + c * 17) % 256) as u8 as i8;
    let b = |r: usize, c: usize| ((r * 7 + c * 13 + 5) % 256) as u8 as i8;
    let inputs = Inputs::new(side, a, b);
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &inputs.b, &output, "4", "3", &[]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let a = Matrix::from_fn(side, a).unwrap();
    let b = Matrix::from_fn(side, b).unwrap();
    let c = mxdft_lib::multiply::multiply_naive(&a, &b).unwrap();
    let expected: Vec<Vec<_>> = dft2_reference(&c).unwrap().rows().map(<[_]>::to_vec).collect();
    assert_transform_close(&read_transform_output(&output), &expected, OUTPUT_TOLERANCE);
}

#[rstest]
#[case("2")]
#[case("4")]
#[case("7")]
#[case("20")]
fn test_output_independent_of_thread_count(#[case] threads: &str) {
    let side = 16;
    let inputs = Inputs::new(side, |r, c| (r as i8) - (c as i8), |r, c| ((r + c) % 5) as i8);
    let baseline = inputs.path("baseline.txt");
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &inputs.b, &baseline, "4", "2", &[]);
    assert!(result.status.success());
    let result = run_transform(&inputs.a, &inputs.b, &output, "4", threads, &[]);
    assert!(result.status.success());

    assert_eq!(fs::read_to_string(&baseline).unwrap(), fs::read_to_string(&output).unwrap());
}

#[test]
fn test_transform_ignores_trailing_bytes() {
    let side = 8;
    let inputs = Inputs::new(side, |r, c| i8::from(r == c), |_, _| 2);
    let mut bytes = fs::read(&inputs.b).unwrap();
    bytes.extend_from_slice(&[0x7F; 10]);
    fs::write(&inputs.b, bytes).unwrap();
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &inputs.b, &output, "3", "2", &[]);
    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ignoring"), "stderr: {stderr}");

    let f = read_transform_output(&output);
    assert_eq!(f.len(), side);
    assert!((f[0][0].re - 128.0).abs() < OUTPUT_TOLERANCE);
}

#[rstest]
#[case("2", "2", "Must be greater than 2")]
#[case("13", "2", "Must be at most 12")]
#[case("3", "1", "Must be at least 2")]
#[case("3", "0", "Must be at least 2")]
fn test_transform_rejects_invalid_parameters(
    #[case] exponent: &str,
    #[case] threads: &str,
    #[case] message: &str,
) {
    let inputs = Inputs::new(8, |_, _| 1, |_, _| 1);
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &inputs.b, &output, exponent, threads, &[]);
    assert!(!result.status.success());
    assert_ne!(result.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains(message), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn test_transform_short_input_fails_without_output() {
    let inputs = Inputs::new(8, |_, _| 1, |_, _| 1);
    fs::write(&inputs.b, [1u8; 63]).unwrap();
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &inputs.b, &output, "3", "2", &[]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("expected 64 bytes, read only 63"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn test_transform_missing_input_fails() {
    let inputs = Inputs::new(8, |_, _| 1, |_, _| 1);
    let missing = inputs.path("missing.bin");
    let output = inputs.path("f.txt");

    let result = run_transform(&inputs.a, &missing, &output, "3", "2", &[]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Matrix B"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn test_transform_requires_all_arguments() {
    let result = Command::new(env!("CARGO_BIN_EXE_mxdft"))
        .args(["transform", "-n", "3", "-m", "2"])
        .output()
        .expect("Failed to run transform command");
    assert!(!result.status.success());
    assert_eq!(result.status.code(), Some(2));
}

#[cfg(unix)]
#[test]
fn test_transform_interrupted_exits_130_without_output() {
    use std::process::Stdio;
    use std::thread;
    use std::time::Duration;

    // Large enough that the transform phase runs for minutes.
    let side = 512;
    let inputs = Inputs::new(side, |r, c| ((r ^ c) % 7) as i8, |r, c| ((r + 3 * c) % 5) as i8);
    let output = inputs.path("f.txt");

    let mut child = Command::new(env!("CARGO_BIN_EXE_mxdft"))
        .args(["transform", "-i"])
        .arg(&inputs.a)
        .arg("-j")
        .arg(&inputs.b)
        .arg("-o")
        .arg(&output)
        .args(["-n", "9", "-m", "2"])
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn transform command");

    thread::sleep(Duration::from_millis(500));
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("Failed to send SIGINT");
    assert!(status.success());

    let result = child.wait_with_output().expect("Failed to wait for transform command");
    assert_eq!(result.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("no output was written"), "stderr: {stderr}");
    assert!(!output.exists());
}
