//! Input validation utilities
//!
//! This module provides common validation functions for command-line parameters and
//! file paths with consistent error messages.
//!
//! All validation functions use structured error types from [`crate::errors`].

use crate::errors::{MxdftError, Result};
use std::path::Path;

/// Exponents at or below this value are rejected (`n` must be strictly greater).
pub const MIN_EXPONENT_EXCLUSIVE: u32 = 2;

/// Largest accepted exponent. `N = 4096` already means a 16M-cell product and a
/// transform of roughly `2.8e14` complex multiply-adds.
pub const MAX_EXPONENT: u32 = 12;

/// Smallest accepted worker thread count on the command line.
pub const MIN_THREADS: usize = 2;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Matrix A")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use mxdft_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/a.bin", "Matrix A");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.is_file() {
        return Err(MxdftError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that multiple files exist
///
/// # Errors
/// Returns an error for the first file that doesn't exist
pub fn validate_files_exist<P: AsRef<Path>>(files: &[(P, &str)]) -> Result<()> {
    for (path, desc) in files {
        validate_file_exists(path, desc)?;
    }
    Ok(())
}

/// Validate the size exponent and return the matrix side `N = 2^n`.
///
/// # Errors
/// Returns an error if `n <= 2` or `n > 12`
///
/// # Example
/// ```
/// use mxdft_lib::validation::validate_exponent;
///
/// assert_eq!(validate_exponent(3, "exponent").unwrap(), 8);
/// assert!(validate_exponent(2, "exponent").is_err());
/// ```
pub fn validate_exponent(exponent: u32, name: &str) -> Result<usize> {
    if exponent <= MIN_EXPONENT_EXCLUSIVE {
        return Err(MxdftError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be greater than {MIN_EXPONENT_EXCLUSIVE}, got: {exponent}"),
        });
    }
    if exponent > MAX_EXPONENT {
        return Err(MxdftError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be at most {MAX_EXPONENT}, got: {exponent}"),
        });
    }
    Ok(1usize << exponent)
}

/// Validate the number of worker threads.
///
/// # Errors
/// Returns an error if `threads < 2`
///
/// # Example
/// ```
/// use mxdft_lib::validation::validate_thread_count;
///
/// validate_thread_count(4, "threads").unwrap();
/// assert!(validate_thread_count(1, "threads").is_err());
/// ```
pub fn validate_thread_count(threads: usize, name: &str) -> Result<()> {
    if threads < MIN_THREADS {
        return Err(MxdftError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be at least {MIN_THREADS}, got: {threads}"),
        });
    }
    Ok(())
}
