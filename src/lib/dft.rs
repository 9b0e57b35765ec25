//! Transform phase: two-dimensional DFT of the product matrix.
//!
//! `F[k][l] = sum_m sum_n C[m][n] * exp(-2 pi i (k m + l n) / N)`
//!
//! Every output cell is a pure function of the whole of `C`, so workers can compute
//! their cells in any order once the product is complete. A [`DftScratch`] holds the
//! `N` roots of unity so the per-cell sum does no allocation and no trigonometry.

use std::f64::consts::PI;

use mxdft_matrix::{Matrix, MatrixError, ReadCells, SharedComplexMatrix, Stripe};
use num_complex::Complex64;

use crate::cancel::{PhaseStatus, StopSignal};
use crate::errors::{MxdftError, Result};

/// Per-worker table of `exp(-2 pi i j / N)` for `j in 0..N`.
#[derive(Debug, Clone)]
pub struct DftScratch {
    twiddles: Vec<Complex64>,
}

impl DftScratch {
    /// Build the table for side `side`.
    ///
    /// # Errors
    /// Returns an error if `side` is zero or the table cannot be allocated.
    pub fn new(side: usize) -> Result<Self> {
        if side == 0 {
            return Err(MxdftError::matrix("transform scratch", MatrixError::EmptySide));
        }
        let mut twiddles = Vec::new();
        twiddles.try_reserve_exact(side).map_err(|_| {
            MxdftError::allocation("transform scratch", MatrixError::Allocation { cells: side })
        })?;
        #[allow(clippy::cast_precision_loss)]
        let n = side as f64;
        twiddles.extend((0..side).map(|j| {
            #[allow(clippy::cast_precision_loss)]
            let angle = -2.0 * PI * (j as f64) / n;
            Complex64::from_polar(1.0, angle)
        }));
        Ok(Self { twiddles })
    }

    /// Side the table was built for.
    #[must_use]
    pub fn side(&self) -> usize {
        self.twiddles.len()
    }

    /// `exp(-2 pi i (a * b) / N)`, reduced modulo `N`.
    #[inline]
    fn root(&self, a: usize, b: usize) -> Complex64 {
        let side = self.twiddles.len();
        self.twiddles[(a % side) * (b % side) % side]
    }

    /// Compute `F[k][l]` from the cells of `c`.
    ///
    /// # Panics
    /// Panics if `c` does not have the side this scratch was built for.
    pub fn transform_cell<C: ReadCells<f64> + ?Sized>(
        &self,
        k: usize,
        l: usize,
        c: &C,
    ) -> Complex64 {
        let side = self.side();
        assert_eq!(c.side(), side, "matrix side must match transform scratch");
        let mut acc = Complex64::new(0.0, 0.0);
        for m in 0..side {
            let mut row_sum = Complex64::new(0.0, 0.0);
            for n in 0..side {
                row_sum += self.root(l, n) * c.cell(m, n);
            }
            acc += self.root(k, m) * row_sum;
        }
        acc
    }

    /// Compute the stripe's rows of `F` into `out`, polling `stop` before every cell.
    ///
    /// `row_done` is called with each row index once all of its cells are written. On
    /// [`PhaseStatus::Stopped`] the row that was in progress is not reported.
    pub fn transform_stripe<C, S, F>(
        &self,
        stripe: Stripe,
        c: &C,
        out: &SharedComplexMatrix,
        stop: &S,
        mut row_done: F,
    ) -> PhaseStatus
    where
        C: ReadCells<f64> + ?Sized,
        S: StopSignal + ?Sized,
        F: FnMut(usize),
    {
        for k in stripe.rows(out.side()) {
            if self.transform_row(k, c, out, stop) == PhaseStatus::Stopped {
                return PhaseStatus::Stopped;
            }
            row_done(k);
        }
        PhaseStatus::Completed
    }

    /// Compute row `k` of `F` into `out`, polling `stop` before every cell.
    pub fn transform_row<C, S>(
        &self,
        k: usize,
        c: &C,
        out: &SharedComplexMatrix,
        stop: &S,
    ) -> PhaseStatus
    where
        C: ReadCells<f64> + ?Sized,
        S: StopSignal + ?Sized,
    {
        for l in 0..out.side() {
            if stop.should_stop() {
                return PhaseStatus::Stopped;
            }
            out.set(k, l, self.transform_cell(k, l, c));
        }
        PhaseStatus::Completed
    }
}

/// Direct evaluation of one output cell with fresh trigonometry per term.
#[must_use]
pub fn dft_direct(k: usize, l: usize, c: &Matrix<f64>) -> Complex64 {
    let side = c.side();
    #[allow(clippy::cast_precision_loss)]
    let n = side as f64;
    let mut acc = Complex64::new(0.0, 0.0);
    for (m, row) in c.rows().enumerate() {
        for (col, &value) in row.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let phase = ((k * m + l * col) % side) as f64;
            acc += Complex64::from_polar(value, -2.0 * PI * phase / n);
        }
    }
    acc
}

/// Single-threaded reference transform of a whole matrix.
///
/// # Errors
/// Returns an error if the scratch or output cannot be allocated.
pub fn dft2_reference(c: &Matrix<f64>) -> Result<Matrix<Complex64>> {
    let scratch = DftScratch::new(c.side())?;
    Matrix::from_fn(c.side(), |k, l| scratch.transform_cell(k, l, c))
        .map_err(|e| MxdftError::matrix("reference transform", e))
}
