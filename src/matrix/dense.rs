//! Dense-matrix helpers on top of Faer.
//!
//! Row-oriented construction, in-place row/column swaps and the `[A | b]` augmented
//! matrix used by elimination.

use crate::error::SolverError;
use faer::Mat;

/// Build a matrix from row vectors.
///
/// Ragged input is reported as `NonSquareMatrix` using the first offending row length.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Mat<f64>, SolverError> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
        return Err(SolverError::NonSquareMatrix {
            rows: nrows,
            cols: bad.len(),
        });
    }
    Ok(Mat::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Snapshot of a matrix as row vectors.
pub fn to_rows(m: &Mat<f64>) -> Vec<Vec<f64>> {
    (0..m.nrows())
        .map(|i| (0..m.ncols()).map(|j| m[(i, j)]).collect())
        .collect()
}

/// `[A | b]`, an n×(n+1) matrix.
pub fn augmented(a: &Mat<f64>, b: &[f64]) -> Mat<f64> {
    let n = a.nrows();
    Mat::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] })
}

pub fn swap_rows(m: &mut Mat<f64>, r1: usize, r2: usize) {
    if r1 == r2 {
        return;
    }
    for j in 0..m.ncols() {
        let tmp = m[(r1, j)];
        m[(r1, j)] = m[(r2, j)];
        m[(r2, j)] = tmp;
    }
}

pub fn swap_cols(m: &mut Mat<f64>, c1: usize, c2: usize) {
    if c1 == c2 {
        return;
    }
    for i in 0..m.nrows() {
        let tmp = m[(i, c1)];
        m[(i, c1)] = m[(i, c2)];
        m[(i, c2)] = tmp;
    }
}
