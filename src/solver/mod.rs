//! Direct & stationary solver interfaces.
//!
//! The free functions are the entry points used by callers; the solver structs behind
//! them implement [`LinearSolver`] for callers that want to keep a configured solver.

use crate::config::{IterativeConfig, Method, PivotMode};
use crate::error::SolverError;
use crate::matrix::LinearSystem;
use crate::utils::convergence::ConvergenceReport;

/// Common interface for the direct and the iterative solvers.
pub trait LinearSolver {
    type Output;
    /// Solve `A·x = b` for the borrowed system.
    fn solve(&mut self, system: &LinearSystem) -> Result<Self::Output, SolverError>;
}

pub mod gauss;
pub use gauss::{EliminationEvent, EliminationObserver, EliminationTrace, GaussSolver, Solution};

pub mod operator;
pub use operator::IterationOperator;

pub mod stationary;
pub use stationary::{SolverState, StationarySolver};

/// Gaussian elimination with the given pivoting.
pub fn solve_direct(system: &LinearSystem, pivot: PivotMode) -> Result<Solution, SolverError> {
    GaussSolver::new(pivot).solve(system)
}

/// Like [`solve_direct`], also returning every intermediate augmented matrix.
pub fn solve_direct_traced(
    system: &LinearSystem,
    pivot: PivotMode,
) -> Result<(Solution, EliminationTrace), SolverError> {
    let mut trace = EliminationTrace::default();
    let solution = GaussSolver::new(pivot).solve_observed(system, &mut trace)?;
    Ok((solution, trace))
}

/// Jacobi, Gauss-Seidel or SOR (ω taken from `config.relaxation`).
pub fn solve_iterative(
    system: &LinearSystem,
    config: &IterativeConfig,
    method: Method,
) -> Result<ConvergenceReport, SolverError> {
    StationarySolver::new(method, config.clone()).solve(system)
}
