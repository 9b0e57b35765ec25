//! Owned row-major square matrices.

use crate::{MatrixError, ReadCells, Result, cell_count};

/// An owned `side x side` matrix stored row-major in a flat vector.
///
/// Cell `(row, col)` lives at `row * side + col`, which is also the order rows are
/// written to and read from disk.
///
/// # Example
/// ```
/// use mxdft_matrix::Matrix;
///
/// let mut m = Matrix::<f64>::zeros(2).unwrap();
/// m.set(1, 0, 3.5);
/// assert_eq!(m.get(1, 0), 3.5);
/// assert_eq!(m.row(1), &[3.5, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    side: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Allocate a matrix filled with `T::default()`.
    ///
    /// The allocation is fallible: a matrix too large for the allocator yields
    /// [`MatrixError::Allocation`] instead of aborting the process.
    pub fn zeros(side: usize) -> Result<Self> {
        let cells = cell_count(side)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells).map_err(|_| MatrixError::Allocation { cells })?;
        data.resize(cells, T::default());
        Ok(Self { side, data })
    }
}

impl<T: Copy> Matrix<T> {
    /// Wrap a row-major vector holding exactly `side * side` cells.
    pub fn from_vec(side: usize, data: Vec<T>) -> Result<Self> {
        let expected = cell_count(side)?;
        if data.len() != expected {
            return Err(MatrixError::DimensionMismatch { side, expected, actual: data.len() });
        }
        Ok(Self { side, data })
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let cells = cell_count(side)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells).map_err(|_| MatrixError::Allocation { cells })?;
        for row in 0..side {
            for col in 0..side {
                data.push(f(row, col));
            }
        }
        Ok(Self { side, data })
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells (`N * N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; matrices have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below `side`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.offset(row, col)]
    }

    /// Overwrite the value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below `side`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let offset = self.offset(row, col);
        self.data[offset] = value;
    }

    /// Borrow one row.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.side;
        &self.data[start..start + self.side]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        self.data.chunks_exact(self.side)
    }

    /// The flat row-major backing store.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning the flat row-major backing store.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
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

impl<T: Copy> ReadCells<T> for Matrix<T> {
    fn side(&self) -> usize {
        self.side
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> T {
        self.get(row, col)
    }
}
