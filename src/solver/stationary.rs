//! Stationary iteration engine: runs `x ← T·x + C` to tolerance or budget.
//!
//! The engine moves through `Init → Iterating → {Converged | MaxIterReached | Failed}`.
//! Running out of iterations is a normal, fully reported outcome; only structural
//! errors, a singular diagonal, or a non-finite value end a run with `Err`.

use crate::config::{IterativeConfig, Method};
use crate::error::{SolverError, ensure_finite};
use crate::matrix::LinearSystem;
use crate::solver::LinearSolver;
use crate::solver::operator::IterationOperator;
use crate::utils::convergence::{
    Convergence, ConvergenceReport, IterationTrace, StopReason, TraceEntry,
};

/// Cap on the trace's up-front allocation; it still grows as needed.
const TRACE_PREALLOC: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Init,
    Iterating,
    Converged,
    MaxIterReached,
    Failed,
}

/// Jacobi, Gauss-Seidel or SOR on a borrowed system.
#[derive(Debug, Clone)]
pub struct StationarySolver {
    pub method: Method,
    pub config: IterativeConfig,
    state: SolverState,
}

impl StationarySolver {
    pub fn new(method: Method, config: IterativeConfig) -> Self {
        Self { method, config, state: SolverState::Init }
    }

    /// State reached by the most recent run.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Run on an operator built elsewhere (e.g. shared between runs with different `x0`).
    ///
    /// The operator's own ω is used; `config.relaxation` is ignored here.
    pub fn run(&mut self, op: &IterationOperator) -> Result<ConvergenceReport, SolverError> {
        self.config.validate_iteration(op.n())?;
        self.iterate(op)
    }

    fn iterate(&mut self, op: &IterationOperator) -> Result<ConvergenceReport, SolverError> {
        self.state = SolverState::Init;
        let result = self.iterate_inner(op);
        if result.is_err() {
            self.state = SolverState::Failed;
        }
        result
    }

    fn iterate_inner(&mut self, op: &IterationOperator) -> Result<ConvergenceReport, SolverError> {
        let spectral_radius = radius_or_unavailable(op.spectral_radius(), op.method())?;
        let theoretical_convergence = spectral_radius.is_some_and(|rho| rho < 1.0);
        let conv = Convergence {
            tol: self.config.tolerance,
            max_iters: self.config.max_iterations,
        };
        let mode = self.config.error_mode;
        log::debug!(
            "{}: n={} rho={spectral_radius:?} tol={:e} max_iters={}",
            op.method(),
            op.n(),
            conv.tol,
            conv.max_iters
        );

        let mut trace = IterationTrace::with_capacity(conv.max_iters.min(TRACE_PREALLOC));
        let mut x0 = self.config.x0.clone();
        let mut iteration = 0;
        self.state = SolverState::Iterating;
        let (stop, final_error) = loop {
            iteration += 1;
            let x1 = op.apply(&x0);
            ensure_finite(&x1, "iteration")?;
            let error = mode.measure(&x0, &x1);
            if !error.is_finite() {
                return Err(SolverError::NumericOverflow { stage: "iteration" });
            }
            log::trace!("{} iter {iteration}: error={error:e}", op.method());
            trace.push(TraceEntry { iteration, x: x1.clone(), error });
            x0 = x1;
            if let Some(reason) = conv.check(error, iteration) {
                break (reason, error);
            }
        };

        let actual_converged = stop == StopReason::Converged;
        self.state = match stop {
            StopReason::Converged => SolverState::Converged,
            StopReason::MaxIterReached => SolverState::MaxIterReached,
        };
        if !actual_converged {
            log::warn!(
                "{}: no convergence after {iteration} iterations (error {final_error:e})",
                op.method()
            );
        }
        if actual_converged != theoretical_convergence {
            log::warn!(
                "{}: rho={spectral_radius:?} predicts {} but the run {}",
                op.method(),
                if theoretical_convergence { "convergence" } else { "divergence" },
                if actual_converged { "converged" } else { "did not converge" }
            );
        }
        log::debug!("{}: {stop:?} after {iteration} iterations", op.method());

        Ok(ConvergenceReport {
            method: op.method(),
            spectral_radius,
            theoretical_convergence,
            actual_converged,
            stop_reason: stop,
            iterations_used: iteration,
            final_error,
            solution: actual_converged.then(|| x0.clone()),
            last_iterate: x0,
            trace,
        })
    }
}

/// A failed eigenvalue computation leaves the radius unknown but the run goes ahead.
fn radius_or_unavailable(
    radius: Result<f64, SolverError>,
    method: Method,
) -> Result<Option<f64>, SolverError> {
    match radius {
        Ok(rho) => Ok(Some(rho)),
        Err(SolverError::EigenvalueFailure) => {
            log::warn!("{method}: spectral radius unavailable, eigenvalues did not converge");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl LinearSolver for StationarySolver {
    type Output = ConvergenceReport;

    fn solve(&mut self, system: &LinearSystem) -> Result<ConvergenceReport, SolverError> {
        self.state = SolverState::Init;
        self.config.validate(system.n(), self.method)?;
        let op = match IterationOperator::build(system, self.method, self.config.relaxation) {
            Ok(op) => op,
            Err(e) => {
                self.state = SolverState::Failed;
                return Err(e);
            }
        };
        self.iterate(&op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorMode;
    use approx::assert_abs_diff_eq;

    fn tridiag() -> LinearSystem {
        LinearSystem::from_rows(
            &[vec![4.0, -1.0, 0.0], vec![-1.0, 4.0, -1.0], vec![0.0, -1.0, 4.0]],
            &[2.0, 6.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn jacobi_converges_on_dominant_system() {
        let cfg = IterativeConfig::new(vec![0.0; 3], 1e-8, 100);
        let mut solver = StationarySolver::new(Method::Jacobi, cfg);
        let report = solver.solve(&tridiag()).unwrap();
        assert_eq!(solver.state(), SolverState::Converged);
        assert!(report.actual_converged);
        assert!(report.theoretical_convergence);
        let x = report.solution.unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-7);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-7);
        assert_abs_diff_eq!(x[2], 1.0, epsilon = 1e-7);
        assert_eq!(report.trace.len(), report.iterations_used);
    }

    #[test]
    fn budget_exhaustion_is_not_an_error() {
        let cfg = IterativeConfig::new(vec![0.0; 3], 1e-14, 3);
        let mut solver = StationarySolver::new(Method::Jacobi, cfg);
        let report = solver.solve(&tridiag()).unwrap();
        assert_eq!(solver.state(), SolverState::MaxIterReached);
        assert_eq!(report.stop_reason, StopReason::MaxIterReached);
        assert!(!report.actual_converged);
        assert!(report.theoretical_convergence);
        assert!(report.solution.is_none());
        assert_eq!(report.iterations_used, 3);
        assert_eq!(report.trace.len(), 3);
        assert_eq!(report.last_iterate, report.trace.last().unwrap().x);
    }

    #[test]
    fn relative_mode_reports_relative_error() {
        let cfg = IterativeConfig::new(vec![0.0; 3], 1e-6, 100).with_error_mode(ErrorMode::Relative);
        let report = StationarySolver::new(Method::GaussSeidel, cfg)
            .solve(&tridiag())
            .unwrap();
        assert!(report.actual_converged);
        assert!(report.final_error <= 1e-6);
        // first step from zero: every entry moves by 100%
        assert_abs_diff_eq!(report.trace.entries()[0].error, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn zero_diagonal_fails_before_iterating() {
        let sys = LinearSystem::from_rows(&[vec![0.0, 1.0], vec![1.0, 2.0]], &[1.0, 1.0]).unwrap();
        let mut solver = StationarySolver::new(Method::Jacobi, IterativeConfig::new(vec![0.0; 2], 1e-6, 10));
        assert_eq!(
            solver.solve(&sys).unwrap_err(),
            SolverError::SingularOrIllConditioned { row: 0 }
        );
        assert_eq!(solver.state(), SolverState::Failed);
    }

    #[test]
    fn run_uses_the_operator_relaxation() {
        let op = IterationOperator::sor(&tridiag(), 1.2).unwrap();
        let cfg = IterativeConfig::new(vec![0.0; 3], 1e-8, 100).with_relaxation(2.5);
        let mut solver = StationarySolver::new(Method::Sor, cfg);
        let report = solver.run(&op).unwrap();
        assert!(report.actual_converged);
        assert_eq!(solver.state(), SolverState::Converged);
        // the config's ω is still rejected when the solver builds its own operator
        assert_eq!(
            solver.solve(&tridiag()).unwrap_err(),
            SolverError::InvalidRelaxationFactor(2.5)
        );
    }

    #[test]
    fn eigenvalue_failure_leaves_radius_unknown() {
        assert_eq!(
            radius_or_unavailable(Err(SolverError::EigenvalueFailure), Method::Jacobi),
            Ok(None)
        );
        assert_eq!(radius_or_unavailable(Ok(0.5), Method::Jacobi), Ok(Some(0.5)));
        assert_eq!(
            radius_or_unavailable(
                Err(SolverError::NumericOverflow { stage: "spectral radius" }),
                Method::Jacobi
            ),
            Err(SolverError::NumericOverflow { stage: "spectral radius" })
        );
    }

    #[test]
    fn run_validates_against_operator_size() {
        let op = IterationOperator::jacobi(&tridiag()).unwrap();
        let mut solver = StationarySolver::new(Method::Jacobi, IterativeConfig::new(vec![0.0; 2], 1e-6, 10));
        assert!(matches!(
            solver.run(&op),
            Err(SolverError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
    }
}
