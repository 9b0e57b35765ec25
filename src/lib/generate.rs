//! Synthetic input matrices.

use clap::ValueEnum;
use mxdft_matrix::Matrix;
use rand::Rng;

use crate::errors::{MxdftError, Result};

/// Contents of a generated matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatrixPattern {
    /// Uniformly random bytes
    #[default]
    Random,
    /// Ones on the diagonal, zeros elsewhere
    Identity,
    /// Every entry is one
    Ones,
    /// Every entry is zero
    Zeros,
}

impl std::fmt::Display for MatrixPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Identity => "identity",
            Self::Ones => "ones",
            Self::Zeros => "zeros",
        };
        f.write_str(name)
    }
}

/// Build a `side x side` signed matrix following `pattern`. `rng` is only drawn from
/// for [`MatrixPattern::Random`].
///
/// # Errors
/// Returns an error if `side` is zero or the matrix cannot be allocated.
pub fn generate_matrix<R: Rng>(
    side: usize,
    pattern: MatrixPattern,
    rng: &mut R,
) -> Result<Matrix<i8>> {
    let matrix = match pattern {
        MatrixPattern::Random => Matrix::from_fn(side, |_, _| rng.random::<i8>()),
        MatrixPattern::Identity => Matrix::from_fn(side, |r, c| i8::from(r == c)),
        MatrixPattern::Ones => Matrix::from_fn(side, |_, _| 1),
        MatrixPattern::Zeros => Matrix::zeros(side),
    };
    matrix.map_err(|e| MxdftError::matrix("generated matrix", e))
}
