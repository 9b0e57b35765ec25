//! Multiply two byte matrices and write the 2D DFT of their product.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mxdft_lib::cancel::CancellationFlag;
use mxdft_lib::errors::MxdftError;
use mxdft_lib::pipeline::{PipelineConfig, PipelineOutcome, run_pipeline};

use crate::commands::command::Command;
use crate::commands::common::SizeOptions;

/// Multiply two matrices with a worker pool, then transform the product.
#[derive(Debug, Parser)]
#[command(
    name = "transform",
    about = "\x1b[38;5;72m[COMPUTE]\x1b[0m        \x1b[36mMultiply two matrices and take the 2D DFT of the product\x1b[0m",
    long_about = r#"
Multiply two N x N matrices of signed bytes (N = 2^n) and write the two-dimensional
discrete Fourier transform of the product.

Each input file must hold at least N*N bytes; the first N*N are read row-major and each
byte is taken as a signed value in [-128, 127]. Extra bytes are ignored with a warning.

Work is split across T worker threads by row: worker t owns every row i with
i mod T == t. Workers first compute their rows of the product, wait for every other
worker at a barrier, then compute their rows of the transform.

The output holds one line per row of the transform. Each cell is written as
"re + (i im)" with three decimals, and cells are separated by ", ".

SIGINT or SIGTERM stops all workers at the next cell. A stopped run writes no output
and exits with status 130. A second SIGINT or SIGTERM exits immediately with status
128 + the signal number, even while output is being written.

Example usage:
  mxdft transform -i a.bin -j b.bin -o f.txt -n 6 -m 8
  mxdft transform -i a.bin -j b.bin -o f.txt -n 4 -m 2 --product c.txt
"#
)]
pub struct Transform {
    /// Raw byte file for matrix A
    #[arg(short = 'i', long = "input-a")]
    pub input_a: PathBuf,

    /// Raw byte file for matrix B
    #[arg(short = 'j', long = "input-b")]
    pub input_b: PathBuf,

    /// Output text file for the transform of A x B
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Optional output text file for the product A x B
    #[arg(long = "product")]
    pub product: Option<PathBuf>,

    /// Matrix size options
    #[command(flatten)]
    pub size: SizeOptions,

    /// Number of worker threads (at least 2)
    #[arg(short = 'm', long = "threads")]
    pub threads: usize,
}

impl Command for Transform {
    fn execute(&self, command_line: &str) -> Result<()> {
        info!("Command line: {command_line}");
        info!("Matrix A: {}", self.input_a.display());
        info!("Matrix B: {}", self.input_b.display());
        info!("Output: {}", self.output.display());

        let config = PipelineConfig {
            matrix_a: self.input_a.clone(),
            matrix_b: self.input_b.clone(),
            output: self.output.clone(),
            product_output: self.product.clone(),
            exponent: self.size.exponent,
            threads: self.threads,
        };

        let cancel = CancellationFlag::new();
        cancel.register_interrupts().context("Failed to install interrupt handlers")?;

        match run_pipeline(&config, &cancel)? {
            PipelineOutcome::Written { side, output } => {
                info!("Wrote {side}x{side} transform to {}", output.display());
                Ok(())
            }
            PipelineOutcome::Cancelled => Err(MxdftError::Interrupted.into()),
        }
    }
}
