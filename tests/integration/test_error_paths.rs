//! Error path integration tests.
//!
//! These tests verify that error conditions are reported as the right error kind and
//! that failed runs leave no output behind.

use std::fs;

use mxdft_lib::barrier::{BarrierWait, PhaseBarrier};
use mxdft_lib::cancel::CancellationFlag;
use mxdft_lib::errors::MxdftError;
use mxdft_lib::pipeline::{PipelineConfig, run_pipeline};
use mxdft_lib::pool::WorkerPool;
use mxdft_lib::store::MatrixStore;
use mxdft_matrix::{Matrix, MatrixError, Stripe};
use tempfile::TempDir;

use crate::helpers::write_matrix_file;

fn config(dir: &TempDir) -> PipelineConfig {
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    write_matrix_file(&a, 8, |_, _| 1);
    write_matrix_file(&b, 8, |_, _| 1);
    PipelineConfig {
        matrix_a: a,
        matrix_b: b,
        output: dir.path().join("f.txt"),
        product_output: None,
        exponent: 3,
        threads: 2,
    }
}

#[test]
fn test_barrier_rejects_extra_arrival() {
    let barrier = PhaseBarrier::new(1).unwrap();
    let cancel = CancellationFlag::new();
    assert_eq!(barrier.wait(&cancel).unwrap(), BarrierWait::Leader);
    let err = barrier.wait(&cancel).unwrap_err();
    assert!(matches!(err, MxdftError::BarrierOverrun { parties: 1 }));
}

#[test]
fn test_pool_rejects_zero_threads() {
    let err = WorkerPool::new(0).err().unwrap();
    assert!(matches!(err, MxdftError::InvalidParameter { .. }));
}

#[test]
fn test_store_rejects_mismatched_sides() {
    let err = MatrixStore::new(Matrix::zeros(8).unwrap(), Matrix::zeros(16).unwrap()).unwrap_err();
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn test_invalid_stripe() {
    assert_eq!(Stripe::new(3, 3).unwrap_err(), MatrixError::InvalidStripe { worker: 3, workers: 3 });
    assert!(Stripe::new(0, 0).is_err());
}

#[test]
fn test_pipeline_short_read_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    fs::write(&config.matrix_a, [0u8; 10]).unwrap();

    let err = run_pipeline(&config, &CancellationFlag::new()).unwrap_err();
    match err {
        MxdftError::ShortRead { expected, actual, .. } => {
            assert_eq!(expected, 64);
            assert_eq!(actual, 10);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_pipeline_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.output = dir.path().join("no-such-dir").join("f.txt");

    let err = run_pipeline(&config, &CancellationFlag::new()).unwrap_err();
    assert!(matches!(err, MxdftError::Io { .. }));
    assert!(!config.output.exists());
}

#[test]
fn test_pipeline_rejects_input_directory() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.matrix_a = dir.path().to_path_buf();

    let err = run_pipeline(&config, &CancellationFlag::new()).unwrap_err();
    assert!(matches!(err, MxdftError::InvalidFileFormat { .. }));
}
