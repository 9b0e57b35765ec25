//! End-to-end orchestration: validate, read, compute, write.
//!
//! Output files are only written when every worker completed both phases. A run that
//! was cancelled leaves no output behind.

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use mxdft_matrix::Matrix;

use crate::cancel::CancellationFlag;
use crate::errors::Result;
use crate::logging::{OperationTimer, format_duration};
use crate::matrix_io::{read_matrix, write_product, write_transform};
use crate::pool::{NoopObserver, PhaseObserver, WorkerPool};
use crate::store::MatrixStore;
use crate::validation::{validate_exponent, validate_files_exist, validate_thread_count};

/// Everything needed for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw byte file for the left matrix
    pub matrix_a: PathBuf,
    /// Raw byte file for the right matrix
    pub matrix_b: PathBuf,
    /// Text file receiving the transform
    pub output: PathBuf,
    /// Optional text file receiving the product
    pub product_output: Option<PathBuf>,
    /// Size exponent `n`; matrices are `2^n x 2^n`
    pub exponent: u32,
    /// Worker thread count
    pub threads: usize,
}

impl PipelineConfig {
    /// Check parameters and input files, returning the matrix side `N`.
    ///
    /// # Errors
    /// Returns an error for an out-of-range exponent or thread count, or a missing input.
    pub fn validate(&self) -> Result<usize> {
        let side = validate_exponent(self.exponent, "exponent")?;
        validate_thread_count(self.threads, "threads")?;
        validate_files_exist(&[(&self.matrix_a, "Matrix A"), (&self.matrix_b, "Matrix B")])?;
        Ok(side)
    }
}

/// Result of running both phases in memory.
#[derive(Debug)]
pub enum ComputeOutcome {
    /// Every worker finished; the store holds the complete product and transform.
    Completed(Arc<MatrixStore>),
    /// At least one worker stopped early; the store contents are partial.
    Cancelled {
        /// Ids of the workers that reported cancellation
        workers: Vec<usize>,
    },
}

impl ComputeOutcome {
    /// The completed store, if the run completed.
    #[must_use]
    pub fn store(&self) -> Option<&MatrixStore> {
        match self {
            Self::Completed(store) => Some(store),
            Self::Cancelled { .. } => None,
        }
    }
}

/// Run both phases over `a` and `b` with `threads` workers.
///
/// # Errors
/// Returns an error if the matrices differ in size, storage cannot be allocated, or a
/// worker fails.
pub fn compute(
    a: Matrix<i8>,
    b: Matrix<i8>,
    threads: usize,
    cancel: &CancellationFlag,
    observer: Arc<dyn PhaseObserver>,
) -> Result<ComputeOutcome> {
    let store = Arc::new(MatrixStore::new(a, b)?);
    let outcome =
        WorkerPool::new(threads)?.with_observer(observer).run(Arc::clone(&store), cancel)?;
    if outcome.is_complete() {
        Ok(ComputeOutcome::Completed(store))
    } else {
        Ok(ComputeOutcome::Cancelled { workers: outcome.cancelled_workers() })
    }
}

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Output files were written.
    Written {
        /// Matrix side `N`
        side: usize,
        /// Transform output path
        output: PathBuf,
    },
    /// The run was cancelled and nothing was written.
    Cancelled,
}

/// Validate `config`, read both inputs, compute, and write results.
///
/// # Errors
/// Returns configuration, resource, I/O, or worker errors. Cancellation is not an
/// error here; it is reported as [`PipelineOutcome::Cancelled`].
pub fn run_pipeline(config: &PipelineConfig, cancel: &CancellationFlag) -> Result<PipelineOutcome> {
    let side = config.validate()?;
    info!("Matrix side {side} (n = {}), {} threads", config.exponent, config.threads);
    let timer = OperationTimer::new("Transforming matrices");

    let a = read_matrix(&config.matrix_a, side, "Matrix A")?;
    let b = read_matrix(&config.matrix_b, side, "Matrix B")?;

    let store = match compute(a, b, config.threads, cancel, Arc::new(NoopObserver))? {
        ComputeOutcome::Completed(store) => store,
        ComputeOutcome::Cancelled { workers } => {
            timer.log_abandoned();
            warn!("Workers {workers:?} were cancelled; no output written");
            return Ok(PipelineOutcome::Cancelled);
        }
    };

    write_transform(&config.output, store.transform())?;
    info!("Wrote transform to {}", config.output.display());
    if let Some(path) = &config.product_output {
        write_product(path, store.product())?;
        info!("Wrote product to {}", path.display());
    }

    let cells = (side as u64) * (side as u64);
    timer.log_completion(cells);
    info!("Total elapsed {}", format_duration(timer.elapsed()));
    Ok(PipelineOutcome::Written { side, output: config.output.clone() })
}
