//! CLI command implementations for mxdft.
//!
//! - [`transform`] - Multiply two matrices and write the 2D DFT of the product
//! - [`generate`] - Write a synthetic input matrix

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod generate;
pub mod transform;
