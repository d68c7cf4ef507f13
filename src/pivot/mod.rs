//! Pivot strategies for Gaussian elimination.
//!
//! This module defines the `PivotStrategy` trait, the `Permutation` that records column
//! swaps, and the three strategies: no pivoting, partial (row) pivoting and total
//! (row + column) pivoting.

use crate::config::PivotMode;
use faer::Mat;

pub mod partial;
pub mod total;

pub use partial::PartialPivot;
pub use total::TotalPivot;

/// Reorders the augmented matrix before elimination step `k`.
pub trait PivotStrategy {
    /// Select a pivot among rows/columns `k..n` and move it to `(k, k)` in place.
    ///
    /// `ab` is the n×(n+1) augmented matrix; `mark` is only touched by column swaps.
    fn pivot(&self, ab: &mut Mat<f64>, mark: &mut Permutation, k: usize);

    fn mode(&self) -> PivotMode;
}

/// Identity strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPivot;

impl PivotStrategy for NoPivot {
    fn pivot(&self, _ab: &mut Mat<f64>, _mark: &mut Permutation, _k: usize) {}

    fn mode(&self) -> PivotMode {
        PivotMode::None
    }
}

/// The strategy implementing `mode`.
pub fn strategy_for(mode: PivotMode) -> Box<dyn PivotStrategy> {
    match mode {
        PivotMode::None => Box::new(NoPivot),
        PivotMode::Partial => Box::new(PartialPivot),
        PivotMode::Total => Box::new(TotalPivot),
    }
}

/// Maps post-pivot column index → original variable index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &p)| i == p)
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// `out[mark[i]] = x[i]`: from pivoted-column order back to variable order.
    pub fn unpermute(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.len(), "permutation and vector lengths differ");
        let mut out = vec![0.0; x.len()];
        for (i, &orig) in self.0.iter().enumerate() {
            out[orig] = x[i];
        }
        out
    }

    /// Every index in `0..n` appears exactly once.
    pub fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.len()];
        for &p in &self.0 {
            if p >= seen.len() || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }
}
