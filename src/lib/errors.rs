//! Custom error types for mxdft operations.

use std::path::PathBuf;

use mxdft_matrix::MatrixError;
use thiserror::Error;

/// Result type alias for mxdft operations
pub type Result<T> = std::result::Result<T, MxdftError>;

/// Error type for mxdft operations
#[derive(Error, Debug)]
pub enum MxdftError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "Matrix A")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// An input matrix file holds fewer bytes than the matrix needs
    #[error("Short read from '{}': expected {expected} bytes, read only {actual}", path.display())]
    ShortRead {
        /// Path to the file
        path: PathBuf,
        /// Bytes required (`N * N`)
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// A matrix, scratch buffer, or partition could not be created
    #[error("Failed to allocate {what}: {source}")]
    Allocation {
        /// What was being allocated
        what: String,
        /// Underlying matrix error
        #[source]
        source: MatrixError,
    },

    /// More workers arrived at the phase barrier than it was built for
    #[error("Phase barrier for {parties} workers received an extra arrival")]
    BarrierOverrun {
        /// Number of workers the barrier was built for
        parties: usize,
    },

    /// A worker thread panicked
    #[error("Worker thread {worker} panicked: {message}")]
    WorkerPanicked {
        /// Worker id
        worker: usize,
        /// Panic payload rendered as text
        message: String,
    },

    /// A worker thread could not be started
    #[error("Failed to spawn worker thread {worker}: {source}")]
    ThreadSpawn {
        /// Worker id
        worker: usize,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The run was interrupted before all workers finished
    #[error("Interrupted before the transform completed; no output was written")]
    Interrupted,

    /// I/O failure
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl MxdftError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Wrap a matrix allocation failure.
    pub fn allocation(what: impl Into<String>, source: MatrixError) -> Self {
        Self::Allocation { what: what.into(), source }
    }

    /// Classify a matrix error: allocation failures stay resource errors, shape problems
    /// become parameter errors on `what`.
    pub fn matrix(what: impl Into<String>, source: MatrixError) -> Self {
        match source {
            MatrixError::Allocation { .. } => Self::allocation(what, source),
            other => Self::InvalidParameter { parameter: what.into(), reason: other.to_string() },
        }
    }
}
