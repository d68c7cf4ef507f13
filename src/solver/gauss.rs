//! Gaussian elimination with selectable pivoting, followed by back substitution.
//!
//! The elimination routine takes an [`EliminationObserver`]. The plain solver passes
//! `()` which ignores every event; [`EliminationTrace`] records them for a step-by-step
//! presentation. Both go through the same arithmetic, so traced and untraced solves
//! return bit-identical solutions.
//!
//! Under total pivoting the returned `x` is in pivoted-column order; use
//! [`Solution::unpermuted`] to recover variable order.
//!
//! # References
//! - Burden & Faires, Numerical Analysis, §6.1–6.2

use crate::config::PivotMode;
use crate::core::traits::InfNorm;
use crate::error::{SolverError, ensure_finite};
use crate::matrix::LinearSystem;
use crate::matrix::dense::{augmented, to_rows};
use crate::pivot::{Permutation, strategy_for};
use crate::solver::LinearSolver;
use crate::utils::diagnostics::is_negligible;
use faer::Mat;

/// Result of a direct solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    /// Solution in pivoted-column order.
    pub x: Vec<f64>,
    /// Column permutation; the identity unless total pivoting reordered variables.
    pub mark: Permutation,
    pub pivot: PivotMode,
}

impl Solution {
    /// `x` in original variable order: `out[mark[i]] = x[i]`.
    pub fn unpermuted(&self) -> Vec<f64> {
        self.mark.unpermute(&self.x)
    }

    /// `‖b - A x‖∞` using the un-permuted solution.
    pub fn residual_inf_norm(&self, system: &LinearSystem) -> f64 {
        system.residual(&self.unpermuted()).norm_inf()
    }
}

/// Hooks into the elimination. Every method defaults to a no-op.
pub trait EliminationObserver {
    fn initial(&mut self, _ab: &Mat<f64>) {}
    fn pivoted(&mut self, _step: usize, _ab: &Mat<f64>, _mark: &Permutation) {}
    fn multiplier(&mut self, _row: usize, _col: usize, _value: f64) {}
    fn eliminated(&mut self, _step: usize, _ab: &Mat<f64>) {}
}

impl EliminationObserver for () {}

/// One recorded elimination event; matrices are row snapshots of `[A | b]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EliminationEvent {
    Initial { matrix: Vec<Vec<f64>> },
    Pivoted { step: usize, matrix: Vec<Vec<f64>>, mark: Vec<usize> },
    Multiplier { row: usize, col: usize, value: f64 },
    Eliminated { step: usize, matrix: Vec<Vec<f64>> },
}

/// Ordered log of the intermediate augmented matrices.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EliminationTrace {
    pub events: Vec<EliminationEvent>,
}

impl EliminationObserver for EliminationTrace {
    fn initial(&mut self, ab: &Mat<f64>) {
        self.events.push(EliminationEvent::Initial { matrix: to_rows(ab) });
    }

    fn pivoted(&mut self, step: usize, ab: &Mat<f64>, mark: &Permutation) {
        self.events.push(EliminationEvent::Pivoted {
            step,
            matrix: to_rows(ab),
            mark: mark.as_slice().to_vec(),
        });
    }

    fn multiplier(&mut self, row: usize, col: usize, value: f64) {
        self.events.push(EliminationEvent::Multiplier { row, col, value });
    }

    fn eliminated(&mut self, step: usize, ab: &Mat<f64>) {
        self.events.push(EliminationEvent::Eliminated { step, matrix: to_rows(ab) });
    }
}

/// Direct solver: Gaussian elimination driven by a pivot strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSolver {
    pub pivot: PivotMode,
}

impl GaussSolver {
    pub fn new(pivot: PivotMode) -> Self {
        Self { pivot }
    }

    /// Solve while reporting each elimination event to `observer`.
    pub fn solve_observed<O: EliminationObserver>(
        &self,
        system: &LinearSystem,
        observer: &mut O,
    ) -> Result<Solution, SolverError> {
        let n = system.n();
        ensure_finite(system.b(), "input")?;
        let mut ab = augmented(system.a(), system.b());
        for i in 0..n {
            for j in 0..n {
                if !ab[(i, j)].is_finite() {
                    return Err(SolverError::NumericOverflow { stage: "input" });
                }
            }
        }

        let strategy = strategy_for(self.pivot);
        let mut mark = Permutation::identity(n);
        log::debug!("gauss: n={n} pivot={}", self.pivot);
        observer.initial(&ab);

        for k in 0..n.saturating_sub(1) {
            strategy.pivot(&mut ab, &mut mark, k);
            if self.pivot != PivotMode::None {
                observer.pivoted(k, &ab, &mark);
            }
            check_pivot(&ab, k)?;

            for i in (k + 1)..n {
                let m = ab[(i, k)] / ab[(k, k)];
                observer.multiplier(i, k, m);
                for j in k..=n {
                    ab[(i, j)] -= m * ab[(k, j)];
                }
                if !(k..=n).all(|j| ab[(i, j)].is_finite()) {
                    return Err(SolverError::NumericOverflow { stage: "elimination" });
                }
            }
            log::trace!("gauss: eliminated column {k}");
            observer.eliminated(k, &ab);
        }
        check_pivot(&ab, n - 1)?;

        let x = back_substitute(&ab)?;
        Ok(Solution {
            x,
            mark,
            pivot: self.pivot,
        })
    }
}

impl LinearSolver for GaussSolver {
    type Output = Solution;

    fn solve(&mut self, system: &LinearSystem) -> Result<Solution, SolverError> {
        self.solve_observed(system, &mut ())
    }
}

fn check_pivot(ab: &Mat<f64>, k: usize) -> Result<(), SolverError> {
    let p = ab[(k, k)];
    if !p.is_finite() {
        return Err(SolverError::NumericOverflow { stage: "elimination" });
    }
    if is_negligible(p) {
        log::debug!("gauss: negligible pivot {p:e} at row {k}");
        return Err(SolverError::SingularOrIllConditioned { row: k });
    }
    Ok(())
}

/// Solve the upper-triangular n×(n+1) augmented system from the last row up.
pub fn back_substitute(ab: &Mat<f64>) -> Result<Vec<f64>, SolverError> {
    let n = ab.nrows();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += ab[(i, j)] * x[j];
        }
        x[i] = (ab[(i, n)] - sum) / ab[(i, i)];
    }
    ensure_finite(&x, "back substitution")?;
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn scenario() -> LinearSystem {
        LinearSystem::from_rows(
            &[vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]],
            &[8.0, -11.0, -3.0],
        )
        .unwrap()
    }

    #[test]
    fn gauss_solver_solves_dense_system() {
        for mode in PivotMode::ALL {
            let sol = GaussSolver::new(mode).solve(&scenario()).unwrap();
            let x = sol.unpermuted();
            for (xi, ei) in x.iter().zip([2.0, 3.0, -1.0]) {
                assert_abs_diff_eq!(*xi, ei, epsilon = 1e-10);
            }
            assert_eq!(sol.pivot, mode);
        }
    }

    #[test]
    fn back_substitution_on_triangular_system() {
        let ab = Mat::from_fn(2, 3, |i, j| match (i, j) {
            (0, 0) => 2.0,
            (0, 1) => 1.0,
            (0, 2) => 5.0,
            (1, 1) => 3.0,
            (1, 2) => 6.0,
            _ => 0.0,
        });
        assert_eq!(back_substitute(&ab).unwrap(), vec![1.5, 2.0]);
    }

    #[test]
    fn one_by_one_system() {
        let sys = LinearSystem::from_rows(&[vec![4.0]], &[2.0]).unwrap();
        let sol = GaussSolver::default().solve(&sys).unwrap();
        assert_eq!(sol.x, vec![0.5]);
        let sys = LinearSystem::from_rows(&[vec![0.0]], &[2.0]).unwrap();
        assert_eq!(
            GaussSolver::default().solve(&sys),
            Err(SolverError::SingularOrIllConditioned { row: 0 })
        );
    }

    #[test]
    fn zero_leading_pivot_needs_pivoting() {
        let sys = LinearSystem::from_rows(&[vec![0.0, 1.0], vec![1.0, 1.0]], &[1.0, 2.0]).unwrap();
        assert_eq!(
            GaussSolver::new(PivotMode::None).solve(&sys),
            Err(SolverError::SingularOrIllConditioned { row: 0 })
        );
        let sol = GaussSolver::new(PivotMode::Partial).solve(&sys).unwrap();
        assert_abs_diff_eq!(sol.x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sol.x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn trace_records_every_step() {
        let mut trace = EliminationTrace::default();
        let traced = GaussSolver::new(PivotMode::Total)
            .solve_observed(&scenario(), &mut trace)
            .unwrap();
        let plain = GaussSolver::new(PivotMode::Total).solve(&scenario()).unwrap();
        assert_eq!(traced, plain);

        assert!(matches!(trace.events[0], EliminationEvent::Initial { .. }));
        let pivots = trace
            .events
            .iter()
            .filter(|e| matches!(e, EliminationEvent::Pivoted { .. }))
            .count();
        let multipliers = trace
            .events
            .iter()
            .filter(|e| matches!(e, EliminationEvent::Multiplier { .. }))
            .count();
        assert_eq!(pivots, 2);
        assert_eq!(multipliers, 3);
        assert!(matches!(
            trace.events.last(),
            Some(EliminationEvent::Eliminated { step: 1, .. })
        ));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let sys = LinearSystem::from_rows(&[vec![1.0, f64::NAN], vec![0.0, 1.0]], &[1.0, 1.0]).unwrap();
        assert_eq!(
            GaussSolver::default().solve(&sys),
            Err(SolverError::NumericOverflow { stage: "input" })
        );
    }
}
