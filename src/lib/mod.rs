#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: Numeric code intentionally casts between index and float types
// - missing_*_doc: Documentation improvements tracked separately
// - needless_pass_by_value: Some APIs designed for ownership transfer
// - items_after_statements: Some test code uses late item declarations
// - module_name_repetitions: Types like MatrixStore read better with the prefix
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # mxdft - threaded matrix multiply and 2D DFT
//!
//! This library multiplies two `N x N` signed byte matrices (`N = 2^n`) and takes the
//! two-dimensional discrete Fourier transform of the product, using a fixed pool of
//! worker threads that meet exactly once, at a barrier between the two phases.
//!
//! ## Overview
//!
//! ### Computation
//!
//! - **[`multiply`]** - Per-row product kernel and single-threaded reference
//! - **[`dft`]** - Per-cell transform kernel with a reusable twiddle table
//! - **[`pool`]** - Worker pool running both phases over row stripes
//! - **[`barrier`]** - Single-use phase barrier that honours cancellation
//! - **[`cancel`]** - Cancellation flag wired to SIGINT/SIGTERM
//!
//! ### Orchestration and I/O
//!
//! - **[`pipeline`]** - Validate, read, compute, write
//! - **[`store`]** - Inputs and shared outputs of one run
//! - **[`matrix_io`]** - Raw byte input and text output
//! - **[`generate`]** - Synthetic input matrices
//!
//! ### Utilities
//!
//! - **[`validation`]** - Parameter and file validation
//! - **[`progress`]** - Milestone progress logging
//! - **[`logging`]** - Duration, rate and count formatting
//! - **[`errors`]** - Error type shared by all of the above
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use mxdft_lib::cancel::CancellationFlag;
//! use mxdft_lib::pipeline::{ComputeOutcome, compute};
//! use mxdft_lib::pool::NoopObserver;
//! use mxdft_matrix::Matrix;
//!
//! # fn main() -> anyhow::Result<()> {
//! let a = Matrix::from_fn(8, |r, c| i8::from(r == c))?;
//! let b = Matrix::from_fn(8, |_, _| 1)?;
//!
//! let outcome = compute(a, b, 2, &CancellationFlag::new(), Arc::new(NoopObserver))?;
//! if let ComputeOutcome::Completed(store) = outcome {
//!     assert_eq!(store.product().get(0, 0), 1.0);
//!     assert!((store.transform().get(0, 0).re - 64.0).abs() < 1e-9);
//! }
//! # Ok(())
//! # }
//! ```

pub mod barrier;
pub mod cancel;
pub mod dft;
pub mod errors;
pub mod generate;
pub mod logging;
pub mod matrix_io;
pub mod multiply;
pub mod pipeline;
pub mod pool;
pub mod progress;
pub mod store;
pub mod validation;

pub use errors::{MxdftError, Result};
pub use pipeline::{PipelineConfig, PipelineOutcome, run_pipeline};
