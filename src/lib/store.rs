//! Run-scoped matrix storage shared by every worker.

use mxdft_matrix::{Matrix, SharedComplexMatrix, SharedRealMatrix};

use crate::errors::{MxdftError, Result};

/// The two input matrices and the two shared outputs of one run.
///
/// `a` and `b` are immutable once the store exists. `product` is written during the
/// multiply phase and `transform` during the transform phase, each cell by exactly one
/// worker (see [`mxdft_matrix::Stripe`]).
#[derive(Debug)]
pub struct MatrixStore {
    a: Matrix<i8>,
    b: Matrix<i8>,
    product: SharedRealMatrix,
    transform: SharedComplexMatrix,
}

impl MatrixStore {
    /// Build a store from two equally sized input matrices, allocating both outputs.
    ///
    /// # Errors
    /// Returns an error if the inputs differ in size or an output cannot be allocated.
    pub fn new(a: Matrix<i8>, b: Matrix<i8>) -> Result<Self> {
        if a.side() != b.side() {
            return Err(MxdftError::InvalidParameter {
                parameter: "matrix B".to_string(),
                reason: format!("Side {} does not match matrix A side {}", b.side(), a.side()),
            });
        }
        let side = a.side();
        let product = SharedRealMatrix::zeros(side)
            .map_err(|e| MxdftError::allocation("product matrix", e))?;
        let transform = SharedComplexMatrix::zeros(side)
            .map_err(|e| MxdftError::allocation("transform matrix", e))?;
        Ok(Self { a, b, product, transform })
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.a.side()
    }

    /// Left input matrix.
    #[must_use]
    pub fn a(&self) -> &Matrix<i8> {
        &self.a
    }

    /// Right input matrix.
    #[must_use]
    pub fn b(&self) -> &Matrix<i8> {
        &self.b
    }

    /// Shared product matrix `C = A x B`.
    #[must_use]
    pub fn product(&self) -> &SharedRealMatrix {
        &self.product
    }

    /// Shared transform matrix `F = DFT2(C)`.
    #[must_use]
    pub fn transform(&self) -> &SharedComplexMatrix {
        &self.transform
    }
}

/// Reinterpret row-major bytes as a signed matrix.
pub fn signed_matrix(side: usize, bytes: &[u8]) -> mxdft_matrix::Result<Matrix<i8>> {
    Matrix::from_vec(side, bytes.iter().map(|&byte| i8::from_ne_bytes([byte])).collect())
}
