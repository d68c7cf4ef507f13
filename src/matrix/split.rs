//! Additive splitting `A = D + L + U`.

use crate::config::NEGLIGIBLE;
use crate::error::SolverError;
use faer::Mat;
use num_traits::Float;

/// Diagonal, strict-lower and strict-upper parts of a square matrix.
#[derive(Debug, Clone)]
pub struct Splitting<T> {
    pub d: Vec<T>,
    pub l: Mat<T>,
    pub u: Mat<T>,
}

impl<T: Float> Splitting<T> {
    pub fn of(a: &Mat<T>) -> Self {
        let n = a.nrows();
        let d = (0..n).map(|i| a[(i, i)]).collect();
        let l = Mat::from_fn(n, n, |i, j| if j < i { a[(i, j)] } else { T::zero() });
        let u = Mat::from_fn(n, n, |i, j| if j > i { a[(i, j)] } else { T::zero() });
        Self { d, l, u }
    }

    pub fn n(&self) -> usize {
        self.d.len()
    }

    /// First row whose diagonal entry is negligible, if any.
    pub fn singular_row(&self) -> Option<usize> {
        let eps = T::from(NEGLIGIBLE).unwrap_or_else(T::epsilon);
        self.d.iter().position(|di| !(di.abs() >= eps))
    }

    /// Fails with `SingularOrIllConditioned` when `D` is not invertible.
    pub fn require_invertible_diagonal(&self) -> Result<(), SolverError> {
        match self.singular_row() {
            Some(row) => Err(SolverError::SingularOrIllConditioned { row }),
            None => Ok(()),
        }
    }
}
