//! Helper utilities for integration tests.

pub mod assertions;
pub mod matrix_files;

pub use assertions::*;
pub use matrix_files::*;
