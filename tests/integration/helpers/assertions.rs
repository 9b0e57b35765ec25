//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use num_complex::Complex64;

/// Asserts that two complex values agree within `tolerance` (absolute, on the norm of
/// the difference).
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`.
pub fn assert_complex_close(actual: Complex64, expected: Complex64, tolerance: f64, context: &str) {
    assert!(
        (actual - expected).norm() <= tolerance,
        "{context}: expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Asserts that two parsed transform outputs agree cell by cell.
///
/// # Panics
///
/// Panics if the shapes differ or any cell differs by more than `tolerance`.
pub fn assert_transform_close(actual: &[Vec<Complex64>], expected: &[Vec<Complex64>], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "row count mismatch");
    for (k, (a_row, e_row)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a_row.len(), e_row.len(), "column count mismatch in row {k}");
        for (l, (&a, &e)) in a_row.iter().zip(e_row).enumerate() {
            assert_complex_close(a, e, tolerance, &format!("cell ({k}, {l})"));
        }
    }
}
