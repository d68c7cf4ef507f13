//! Structural and numerical checks on a system before solving it.
//!
//! `diagnose` works on raw rows so that malformed input (ragged or non-square) is
//! reported as a flag rather than a construction error.

use bitflags::bitflags;
use faer::Mat;

use crate::config::{NEGLIGIBLE, PivotMode};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SystemChecks: u32 {
        const SQUARE                         = 0b0_0001;
        const DIMENSIONS_MATCH               = 0b0_0010;
        const NONSINGULAR                    = 0b0_0100;
        const DIAGONALLY_DOMINANT            = 0b0_1000;
        const STRICTLY_DIAGONALLY_DOMINANT   = 0b1_0000;
        const WELL_FORMED = Self::SQUARE.bits() | Self::DIMENSIONS_MATCH.bits() | Self::NONSINGULAR.bits();
    }
}

/// Below this determinant magnitude pivoting is recommended.
const PIVOT_ADVICE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemDiagnostics {
    pub checks: SystemChecks,
    pub size: usize,
    /// Only computed for square input.
    pub determinant: Option<f64>,
    pub recommended_pivot: PivotMode,
}

impl SystemDiagnostics {
    /// Square, matching right-hand side and non-zero determinant.
    pub fn is_valid(&self) -> bool {
        self.checks.contains(SystemChecks::WELL_FORMED)
    }
}

pub fn diagnose(rows: &[Vec<f64>], b: &[f64]) -> SystemDiagnostics {
    let n = rows.len();
    let mut checks = SystemChecks::empty();
    if rows.iter().all(|r| r.len() == n) {
        checks |= SystemChecks::SQUARE;
    }
    if b.len() == n {
        checks |= SystemChecks::DIMENSIONS_MATCH;
    }

    let mut determinant = None;
    if checks.contains(SystemChecks::SQUARE) && n > 0 {
        let a = Mat::from_fn(n, n, |i, j| rows[i][j]);
        let det = determinant_of(&a);
        if det != 0.0 && det.is_finite() {
            checks |= SystemChecks::NONSINGULAR;
        }
        determinant = Some(det);
        checks |= dominance(&a);
    }

    let recommended_pivot = match determinant {
        Some(det) if det.abs() > PIVOT_ADVICE_THRESHOLD => PivotMode::None,
        _ => PivotMode::Partial,
    };

    log::debug!("diagnose: n={n} checks={checks:?} det={determinant:?}");
    SystemDiagnostics {
        checks,
        size: n,
        determinant,
        recommended_pivot,
    }
}

/// Determinant of a square matrix, from faer's LU-based reduction.
pub fn determinant_of(a: &Mat<f64>) -> f64 {
    a.as_ref().determinant()
}

/// Row diagonal-dominance flags of a square matrix.
pub fn dominance(a: &Mat<f64>) -> SystemChecks {
    let n = a.nrows();
    let mut weak = true;
    let mut strict = true;
    for i in 0..n {
        let diag = a[(i, i)].abs();
        let off: f64 = (0..n).filter(|&j| j != i).map(|j| a[(i, j)].abs()).sum();
        weak &= diag >= off;
        strict &= diag > off;
    }
    let mut flags = SystemChecks::empty();
    if weak {
        flags |= SystemChecks::DIAGONALLY_DOMINANT;
    }
    if strict {
        flags |= SystemChecks::STRICTLY_DIAGONALLY_DOMINANT;
    }
    flags
}

/// Young's optimal SOR factor `2 / (1 + sqrt(1 - ρ²))` from the Jacobi spectral radius.
///
/// Exact for consistently ordered matrices; `None` when the Jacobi iteration diverges.
pub fn optimal_relaxation(rho_jacobi: f64) -> Option<f64> {
    if (0.0..1.0).contains(&rho_jacobi) {
        Some(2.0 / (1.0 + (1.0 - rho_jacobi * rho_jacobi).sqrt()))
    } else {
        None
    }
}

/// `|x| < ε`
pub fn is_negligible(x: f64) -> bool {
    !(x.abs() >= NEGLIGIBLE)
}
