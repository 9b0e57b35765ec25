//! Multiply phase: `C = A x B` over signed byte matrices.
//!
//! Each worker computes its striped rows of `C` into a private buffer, then publishes
//! the buffer into the shared product matrix in one pass. Sums of `i8 x i8` products
//! stay far below 2^53, so accumulating in `f64` is exact.

use mxdft_matrix::{Matrix, SharedRealMatrix, Stripe};

use crate::cancel::{PhaseStatus, StopSignal};
use crate::errors::{MxdftError, Result};

/// Allocate the private buffer for a stripe: one row of `side` values per owned row.
///
/// # Errors
/// Returns an allocation error if the buffer cannot be reserved.
pub fn allocate_partial(stripe: Stripe, side: usize) -> Result<Vec<f64>> {
    let len = stripe.count(side) * side;
    let mut partial = Vec::new();
    partial.try_reserve_exact(len).map_err(|_| {
        MxdftError::allocation(
            format!("partial product for worker {}", stripe.worker()),
            mxdft_matrix::MatrixError::Allocation { cells: len },
        )
    })?;
    partial.resize(len, 0.0);
    Ok(partial)
}

/// Compute row `row` of `A x B` into `out`, polling `stop` before every cell.
///
/// On [`PhaseStatus::Stopped`] the contents of `out` are unspecified.
///
/// # Panics
/// Panics if `out.len()` differs from the matrix side.
pub fn multiply_row<S: StopSignal + ?Sized>(
    a: &Matrix<i8>,
    b: &Matrix<i8>,
    row: usize,
    stop: &S,
    out: &mut [f64],
) -> PhaseStatus {
    assert_eq!(out.len(), b.side(), "output row length must equal matrix side");
    let a_row = a.row(row);
    for (col, cell) in out.iter_mut().enumerate() {
        if stop.should_stop() {
            return PhaseStatus::Stopped;
        }
        let mut sum = 0.0;
        for (k, &a_ik) in a_row.iter().enumerate() {
            sum += f64::from(a_ik) * f64::from(b.get(k, col));
        }
        *cell = sum;
    }
    PhaseStatus::Completed
}

/// Copy a completed private buffer into the shared product at the stripe's rows.
pub fn publish_partial(partial: &[f64], stripe: Stripe, product: &SharedRealMatrix) {
    let side = product.side();
    for (values, row) in partial.chunks_exact(side).zip(stripe.rows(side)) {
        product.write_row(row, values);
    }
}

/// Single-threaded triple loop, used as the reference result.
///
/// # Errors
/// Returns an error if the inputs differ in size or the result cannot be allocated.
pub fn multiply_naive(a: &Matrix<i8>, b: &Matrix<i8>) -> Result<Matrix<f64>> {
    if a.side() != b.side() {
        return Err(MxdftError::InvalidParameter {
            parameter: "matrix B".to_string(),
            reason: format!("Side {} does not match matrix A side {}", b.side(), a.side()),
        });
    }
    let side = a.side();
    let mut c = Matrix::<f64>::zeros(side).map_err(|e| MxdftError::matrix("product", e))?;
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                let value = c.get(i, j) + f64::from(a.get(i, k)) * f64::from(b.get(k, j));
                c.set(i, j, value);
            }
        }
    }
    Ok(c)
}
