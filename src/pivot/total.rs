// Total pivoting: largest |a_ij| in the trailing submatrix, rows and columns k..n

use crate::config::PivotMode;
use crate::matrix::dense::{swap_cols, swap_rows};
use crate::pivot::{Permutation, PivotStrategy};
use faer::Mat;

#[derive(Debug, Clone, Copy, Default)]
pub struct TotalPivot;

impl TotalPivot {
    /// `(row, col)` of the pivot for step `k`; first maximum in row-major order.
    ///
    /// Only the coefficient block is scanned; the augmented column is never a candidate.
    pub fn select(ab: &Mat<f64>, k: usize) -> (usize, usize) {
        let n = ab.nrows();
        let mut best = ab[(k, k)].abs();
        let mut at = (k, k);
        for i in k..n {
            for j in k..n {
                let v = ab[(i, j)].abs();
                if v > best {
                    best = v;
                    at = (i, j);
                }
            }
        }
        at
    }
}

impl PivotStrategy for TotalPivot {
    fn pivot(&self, ab: &mut Mat<f64>, mark: &mut Permutation, k: usize) {
        let (row, col) = Self::select(ab, k);
        if row != k {
            swap_rows(ab, k, row);
        }
        if col != k {
            swap_cols(ab, k, col);
            mark.swap(k, col);
        }
        log::trace!("total pivot step {k}: row {row}, col {col}, mark {:?}", mark.as_slice());
    }

    fn mode(&self) -> PivotMode {
        PivotMode::Total
    }
}
