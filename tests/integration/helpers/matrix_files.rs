//! Builders for matrix input files and parsers for text outputs.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use num_complex::Complex64;

/// Write a `side x side` matrix of signed bytes, row-major, computing each value with `f`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_matrix_file(path: &Path, side: usize, f: impl Fn(usize, usize) -> i8) {
    let mut bytes = Vec::with_capacity(side * side);
    for r in 0..side {
        for c in 0..side {
            bytes.push(f(r, c).to_ne_bytes()[0]);
        }
    }
    fs::write(path, bytes).expect("Failed to write matrix file");
}

/// Parse one `re + (i im)` cell.
///
/// # Panics
///
/// Panics if the cell is malformed.
pub fn parse_complex_cell(cell: &str) -> Complex64 {
    let (re, rest) = cell.split_once(" + (i ").unwrap_or_else(|| panic!("Malformed cell: {cell}"));
    let im = rest.strip_suffix(')').unwrap_or_else(|| panic!("Malformed cell: {cell}"));
    Complex64::new(
        re.parse().unwrap_or_else(|_| panic!("Bad real part: {cell}")),
        im.parse().unwrap_or_else(|_| panic!("Bad imaginary part: {cell}")),
    )
}

/// Parse a transform output file into rows of cells.
///
/// # Panics
///
/// Panics if the file cannot be read or is malformed.
pub fn read_transform_output(path: &Path) -> Vec<Vec<Complex64>> {
    let text = fs::read_to_string(path).expect("Failed to read transform output");
    assert!(text.ends_with('\n'), "Output must end with a newline");
    text.lines().map(|line| line.split(", ").map(parse_complex_cell).collect()).collect()
}

/// Parse a product output file into rows of values.
///
/// # Panics
///
/// Panics if the file cannot be read or is malformed.
pub fn read_product_output(path: &Path) -> Vec<Vec<f64>> {
    let text = fs::read_to_string(path).expect("Failed to read product output");
    text.lines()
        .map(|line| line.split(", ").map(|v| v.parse().expect("Bad product value")).collect())
        .collect()
}
