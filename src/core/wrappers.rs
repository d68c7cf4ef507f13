//! Wrappers for faer dense matrix types and vector operations.
//!
//! This module provides implementations of the core traits for `faer::Mat`, `faer::MatRef`,
//! `Vec<T>` and slices, so the elimination and iteration kernels can be written once
//! against `MatVec`/`InfNorm`.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{InfNorm, MatShape, MatVec};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().matvec(x, y)
    }
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatVec<Vec<T>> for MatRef<'a, T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            let mut acc = T::zero();
            for j in 0..self.ncols() {
                acc = acc + self[(i, j)] * x[j];
            }
            y[i] = acc;
        }
    }
}

impl<T: Float> InfNorm for [T] {
    type Scalar = T;
    fn norm_inf(&self) -> T {
        self.iter().fold(T::zero(), |acc, v| acc.max(v.abs()))
    }
}

impl<T: Float> InfNorm for Vec<T> {
    type Scalar = T;
    fn norm_inf(&self) -> T {
        self.as_slice().norm_inf()
    }
}

/// Maximum absolute row sum.
impl<T: Float> InfNorm for Mat<T> {
    type Scalar = T;
    fn norm_inf(&self) -> T {
        (0..self.nrows())
            .map(|i| (0..self.ncols()).fold(T::zero(), |acc, j| acc + self[(i, j)].abs()))
            .fold(T::zero(), |acc, row| acc.max(row))
    }
}

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

/// `‖x - y‖∞` for two vectors of equal length.
pub fn diff_norm_inf<T: Float>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter()
        .zip(y)
        .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()))
}
