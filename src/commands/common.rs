//! Common CLI options shared across commands.
//!
//! Argument structures here are composed into command structs with `#[command(flatten)]`.

use clap::Args;

use mxdft_lib::validation::validate_exponent;

/// Matrix size option: the side is `2^exponent`.
#[derive(Debug, Clone, Copy, Args)]
pub struct SizeOptions {
    /// Size exponent n; matrices are 2^n x 2^n (3 <= n <= 12)
    #[arg(short = 'n', long = "exponent")]
    pub exponent: u32,
}

impl SizeOptions {
    /// Validates the exponent and returns the matrix side.
    ///
    /// # Errors
    ///
    /// Returns an error if the exponent is out of range.
    pub fn side(&self) -> anyhow::Result<usize> {
        Ok(validate_exponent(self.exponent, "exponent")?)
    }
}
