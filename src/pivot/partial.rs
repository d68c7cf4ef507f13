// Partial pivoting: largest |a_ik| in column k, rows k..n

use crate::config::PivotMode;
use crate::matrix::dense::swap_rows;
use crate::pivot::{Permutation, PivotStrategy};
use faer::Mat;

#[derive(Debug, Clone, Copy, Default)]
pub struct PartialPivot;

impl PartialPivot {
    /// Row holding the pivot for step `k`; the lowest index wins ties.
    pub fn select(ab: &Mat<f64>, k: usize) -> usize {
        let n = ab.nrows();
        let mut best = ab[(k, k)].abs();
        let mut row = k;
        for i in (k + 1)..n {
            let v = ab[(i, k)].abs();
            if v > best {
                best = v;
                row = i;
            }
        }
        row
    }
}

impl PivotStrategy for PartialPivot {
    fn pivot(&self, ab: &mut Mat<f64>, _mark: &mut Permutation, k: usize) {
        let row = Self::select(ab, k);
        if row != k {
            log::trace!("partial pivot step {k}: swap rows {k} <-> {row}");
            swap_rows(ab, k, row);
        }
    }

    fn mode(&self) -> PivotMode {
        PivotMode::Partial
    }
}
