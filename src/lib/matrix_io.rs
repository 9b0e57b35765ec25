//! Reading raw byte matrices and writing text results.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::warn;
use mxdft_matrix::{Matrix, MatrixError, ReadCells};
use num_complex::Complex64;

use crate::errors::{MxdftError, Result};
use crate::store::signed_matrix;

/// Separator placed between cells on one output line.
pub const CELL_SEPARATOR: &str = ", ";

/// Read the first `side * side` bytes of `path` as a row-major signed matrix.
///
/// Bytes past the first `side * side` are ignored with a warning.
///
/// # Errors
/// Returns [`MxdftError::ShortRead`] if the file is too small, or an I/O error.
pub fn read_matrix(path: &Path, side: usize, description: &str) -> Result<Matrix<i8>> {
    let expected = side
        .checked_mul(side)
        .ok_or_else(|| MxdftError::matrix(description, MatrixError::Allocation { cells: usize::MAX }))?;
    let mut file = File::open(path).map_err(|e| MxdftError::io(path, e))?;

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(expected).map_err(|_| {
        MxdftError::allocation(description, MatrixError::Allocation { cells: expected })
    })?;
    let read = Read::by_ref(&mut file)
        .take(expected as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| MxdftError::io(path, e))?;
    if read < expected {
        return Err(MxdftError::ShortRead { path: path.to_path_buf(), expected, actual: read });
    }

    let mut next = [0u8; 1];
    if file.read(&mut next).map_err(|e| MxdftError::io(path, e))? > 0 {
        let total = file.metadata().map(|m| m.len()).unwrap_or(0);
        if total > expected as u64 {
            warn!(
                "{description} file '{}' has {total} bytes; ignoring the {} bytes after the first {expected}",
                path.display(),
                total - expected as u64
            );
        } else {
            warn!(
                "{description} file '{}' has more than {expected} bytes; ignoring the rest",
                path.display()
            );
        }
    }

    signed_matrix(side, &bytes).map_err(|e| MxdftError::matrix(description, e))
}

/// Write a signed matrix as raw row-major bytes.
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn write_matrix_bytes(path: &Path, matrix: &Matrix<i8>) -> Result<()> {
    let bytes: Vec<u8> = matrix.as_slice().iter().map(|v| v.to_ne_bytes()[0]).collect();
    write_or_remove(path, |out| out.write_all(&bytes))
}

/// Render one transform cell as `re + (i im)` with three decimals.
#[must_use]
pub fn format_complex(value: Complex64) -> String {
    format!("{:.3} + (i {:.3})", value.re, value.im)
}

/// Write the transform matrix, one line per row.
///
/// # Errors
/// Returns an I/O error if the file cannot be written. A partially written file is
/// removed.
pub fn write_transform<M: ReadCells<Complex64> + ?Sized>(path: &Path, transform: &M) -> Result<()> {
    write_rows(path, transform, format_complex)
}

/// Write the product matrix, one line per row.
///
/// # Errors
/// Returns an I/O error if the file cannot be written. A partially written file is
/// removed.
pub fn write_product<M: ReadCells<f64> + ?Sized>(path: &Path, product: &M) -> Result<()> {
    write_rows(path, product, |value| format!("{value:.3}"))
}

fn write_rows<T, M, F>(path: &Path, matrix: &M, render: F) -> Result<()>
where
    M: ReadCells<T> + ?Sized,
    F: Fn(T) -> String,
{
    let side = matrix.side();
    write_or_remove(path, |out| {
        for row in 0..side {
            for col in 0..side {
                if col > 0 {
                    out.write_all(CELL_SEPARATOR.as_bytes())?;
                }
                out.write_all(render(matrix.cell(row, col)).as_bytes())?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    })
}

/// Create `path`, run `body` against a buffered writer, and flush. Removes the file if
/// any step after creation fails.
fn write_or_remove<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| MxdftError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let result = body(&mut out).and_then(|()| out.flush());
    if let Err(e) = result {
        drop(out);
        if let Err(remove) = fs::remove_file(path) {
            warn!("Could not remove partial output '{}': {remove}", path.display());
        }
        return Err(MxdftError::io(path, e));
    }
    Ok(())
}
