//! Matrices that many threads write concurrently, one writer per cell.
//!
//! Each cell is backed by `AtomicU64` holding the bit pattern of an `f64`, so writes
//! from different threads are data-race free without `unsafe` and without locks.
//! Stores and loads are `Relaxed`: callers are expected to partition cells so that
//! every cell has exactly one writer, and to order the writing phase before the
//! reading phase with a real synchronization point (a mutex-guarded barrier or a
//! thread join), which supplies the happens-before edge.

use std::sync::atomic::{AtomicU64, Ordering};

use num_complex::Complex64;

use crate::{Matrix, MatrixError, ReadCells, Result, cell_count};

fn atomic_cells(cells: usize) -> Result<Box<[AtomicU64]>> {
    let mut data = Vec::new();
    data.try_reserve_exact(cells).map_err(|_| MatrixError::Allocation { cells })?;
    data.extend((0..cells).map(|_| AtomicU64::new(0.0f64.to_bits())));
    Ok(data.into_boxed_slice())
}

/// A shared `N x N` matrix of `f64`.
#[derive(Debug)]
pub struct SharedRealMatrix {
    side: usize,
    cells: Box<[AtomicU64]>,
}

impl SharedRealMatrix {
    /// Allocate a zero-filled shared matrix.
    pub fn zeros(side: usize) -> Result<Self> {
        let cells = atomic_cells(cell_count(side)?)?;
        Ok(Self { side, cells })
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Value at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        f64::from_bits(self.cells[self.offset(row, col)].load(Ordering::Relaxed))
    }

    /// Store `value` at `(row, col)`.
    #[inline]
    pub fn set(&self, row: usize, col: usize, value: f64) {
        self.cells[self.offset(row, col)].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Store a whole row.
    ///
    /// # Panics
    /// Panics if `values.len() != side`.
    pub fn write_row(&self, row: usize, values: &[f64]) {
        assert_eq!(values.len(), self.side, "row length must equal matrix side");
        let start = self.offset(row, 0);
        for (cell, value) in self.cells[start..start + self.side].iter().zip(values) {
            cell.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Copy the current contents into an owned [`Matrix`].
    pub fn snapshot(&self) -> Result<Matrix<f64>> {
        Matrix::from_fn(self.side, |row, col| self.get(row, col))
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.side && col < self.side,
            "cell ({row}, {col}) out of bounds for side {}",
            self.side
        );
        row * self.side + col
    }
}

impl ReadCells<f64> for SharedRealMatrix {
    fn side(&self) -> usize {
        self.side
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> f64 {
        self.get(row, col)
    }
}

/// A shared `N x N` matrix of `Complex<f64>`.
///
/// The real and imaginary parts are two adjacent atomic cells. A reader racing a
/// writer of the same cell could observe a torn pair; the single-writer discipline
/// plus a synchronization point before reading rules this out.
#[derive(Debug)]
pub struct SharedComplexMatrix {
    side: usize,
    cells: Box<[AtomicU64]>,
}

impl SharedComplexMatrix {
    /// Allocate a zero-filled shared complex matrix.
    pub fn zeros(side: usize) -> Result<Self> {
        let cells = cell_count(side)?;
        let doubled = cells.checked_mul(2).ok_or(MatrixError::Allocation { cells })?;
        Ok(Self { side, cells: atomic_cells(doubled)? })
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Value at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        let offset = self.offset(row, col);
        Complex64::new(
            f64::from_bits(self.cells[offset].load(Ordering::Relaxed)),
            f64::from_bits(self.cells[offset + 1].load(Ordering::Relaxed)),
        )
    }

    /// Store `value` at `(row, col)`.
    #[inline]
    pub fn set(&self, row: usize, col: usize, value: Complex64) {
        let offset = self.offset(row, col);
        self.cells[offset].store(value.re.to_bits(), Ordering::Relaxed);
        self.cells[offset + 1].store(value.im.to_bits(), Ordering::Relaxed);
    }

    /// Copy the current contents into an owned [`Matrix`].
    pub fn snapshot(&self) -> Result<Matrix<Complex64>> {
        Matrix::from_fn(self.side, |row, col| self.get(row, col))
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.side && col < self.side,
            "cell ({row}, {col}) out of bounds for side {}",
            self.side
        );
        2 * (row * self.side + col)
    }
}

impl ReadCells<Complex64> for SharedComplexMatrix {
    fn side(&self) -> usize {
        self.side
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> Complex64 {
        self.get(row, col)
    }
}
