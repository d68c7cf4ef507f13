//! The `Ax = b` input shared by every solver.

use crate::core::traits::{MatShape, MatVec};
use crate::error::SolverError;
use crate::matrix::dense;
use faer::Mat;

/// A square system `Ax = b`.
///
/// Construction validates the shapes; afterwards the system is read-only and solvers
/// only ever borrow it.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    a: Mat<f64>,
    b: Vec<f64>,
}

impl LinearSystem {
    pub fn new(a: Mat<f64>, b: Vec<f64>) -> Result<Self, SolverError> {
        if !a.is_square() {
            return Err(SolverError::NonSquareMatrix {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        if a.nrows() == 0 {
            return Err(SolverError::InvalidParameter("system must have at least one equation"));
        }
        if b.len() != a.nrows() {
            return Err(SolverError::DimensionMismatch {
                what: "right-hand side",
                expected: a.nrows(),
                actual: b.len(),
            });
        }
        Ok(Self { a, b })
    }

    /// Build from the row-major nested vectors most callers deserialize into.
    pub fn from_rows(rows: &[Vec<f64>], b: &[f64]) -> Result<Self, SolverError> {
        let a = dense::from_rows(rows)?;
        Self::new(a, b.to_vec())
    }

    pub fn n(&self) -> usize {
        self.b.len()
    }

    pub fn a(&self) -> &Mat<f64> {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// `b - A x`
    pub fn residual(&self, x: &[f64]) -> Vec<f64> {
        let mut ax = vec![0.0; self.n()];
        self.a.matvec(&x.to_vec(), &mut ax);
        self.b.iter().zip(&ax).map(|(bi, axi)| bi - axi).collect()
    }
}
