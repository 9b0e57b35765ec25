#![deny(unsafe_code)]

//! Matrix containers and work partitioning for mxdft.
//!
//! This crate provides the data structures the threaded pipeline is built on:
//! - [`Matrix`]: an owned, row-major `N x N` matrix with `get(row, col)`/`set(row, col)`
//! - [`SharedRealMatrix`] / [`SharedComplexMatrix`]: matrices of atomic cells that many
//!   threads may write concurrently, provided each cell has a single writer
//! - [`Stripe`]: round-robin row ownership (`row % workers == worker`)

pub mod dense;
pub mod shared;
pub mod stripe;

use thiserror::Error;

pub use dense::Matrix;
pub use shared::{SharedComplexMatrix, SharedRealMatrix};
pub use stripe::Stripe;

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised when constructing matrices or partitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A matrix must have at least one row and one column.
    #[error("Matrix side length must be greater than zero")]
    EmptySide,

    /// Backing data does not hold `side * side` cells.
    #[error("Matrix of side {side} needs {expected} cells, got {actual}")]
    DimensionMismatch {
        /// Side length requested
        side: usize,
        /// Number of cells required
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// The backing store could not be allocated.
    #[error("Failed to allocate {cells} matrix cells")]
    Allocation {
        /// Number of cells requested
        cells: usize,
    },

    /// A stripe was requested for a worker outside `[0, workers)`.
    #[error("Invalid stripe: worker {worker} of {workers}")]
    InvalidStripe {
        /// Worker id
        worker: usize,
        /// Total worker count
        workers: usize,
    },
}

/// Read access to the cells of a square matrix, whatever its backing store.
pub trait ReadCells<T> {
    /// Side length `N`.
    fn side(&self) -> usize;

    /// Value at `(row, col)`.
    fn cell(&self, row: usize, col: usize) -> T;
}

/// Number of cells in a `side x side` matrix, or an allocation error on overflow.
pub(crate) fn cell_count(side: usize) -> Result<usize> {
    if side == 0 {
        return Err(MatrixError::EmptySide);
    }
    side.checked_mul(side).ok_or(MatrixError::Allocation { cells: usize::MAX })
}
