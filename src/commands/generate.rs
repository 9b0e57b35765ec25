//! Write a synthetic input matrix.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use mxdft_lib::generate::{MatrixPattern, generate_matrix};
use mxdft_lib::logging::OperationTimer;
use mxdft_lib::matrix_io::write_matrix_bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::commands::command::Command;
use crate::commands::common::SizeOptions;

/// Generate an N x N signed byte matrix file.
#[derive(Debug, Parser)]
#[command(
    name = "generate",
    about = "\x1b[38;5;166m[UTILITIES]\x1b[0m      \x1b[36mWrite a synthetic input matrix\x1b[0m",
    long_about = r#"
Write an N x N matrix (N = 2^n) of signed bytes, row-major, suitable as input to
`mxdft transform`.

Patterns:
  random    uniformly random bytes (reproducible with --seed)
  identity  ones on the diagonal, zeros elsewhere
  ones      every byte is 1
  zeros     every byte is 0

Example usage:
  mxdft generate -o a.bin -n 6 --seed 42
  mxdft generate -o b.bin -n 6 --pattern identity
"#
)]
pub struct Generate {
    /// Output matrix file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Matrix size options
    #[command(flatten)]
    pub size: SizeOptions,

    /// Contents of the matrix
    #[arg(short = 'p', long = "pattern", value_enum, default_value_t = MatrixPattern::Random)]
    pub pattern: MatrixPattern,

    /// Random seed for reproducibility
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl Command for Generate {
    fn execute(&self, _command_line: &str) -> Result<()> {
        let side = self.size.side()?;
        let timer = OperationTimer::new("Generating matrix");
        info!("Output: {}", self.output.display());
        info!("Pattern: {}, side {side}", self.pattern);
        if let Some(seed) = self.seed {
            info!("Random seed: {seed}");
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let matrix = generate_matrix(side, self.pattern, &mut rng)?;
        write_matrix_bytes(&self.output, &matrix)?;

        timer.log_completion((side * side) as u64);
        Ok(())
    }
}
