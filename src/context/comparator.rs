//! Side-by-side comparison of the three stationary methods.
//!
//! `Comparator` runs Jacobi, Gauss-Seidel and SOR on the same system and settings,
//! timing each run, and ranks the runs that actually converged. With the `rayon`
//! feature the three runs execute in parallel; they share only read-only input, so
//! the results do not depend on scheduling.
//!
//! # Scoring
//!
//! Each converged run gets
//!
//! ```text
//! 0.30·inv(ρ) + 0.25·inv(iterations) + 0.25·inv(final error) + 0.20·[ρ < 1]
//! ```
//!
//! where `inv(v) = 1 - v / max(v)` over the converged runs (`1` when the maximum is 0).
//! Higher is better; equal scores are ordered Jacobi, Gauss-Seidel, SOR.

use std::time::{Duration, Instant};

use crate::config::{IterativeConfig, Method, PivotMode};
use crate::core::wrappers::diff_norm_inf;
use crate::error::SolverError;
use crate::matrix::LinearSystem;
use crate::solver::{Solution, solve_direct, solve_iterative};
use crate::utils::convergence::ConvergenceReport;

const W_SPECTRAL: f64 = 0.30;
const W_ITERATIONS: f64 = 0.25;
const W_ERROR: f64 = 0.25;
const W_THEORY: f64 = 0.20;

/// One iterative method's run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodRun {
    pub method: Method,
    pub elapsed: Duration,
    pub outcome: Result<ConvergenceReport, SolverError>,
    /// `‖x_method - x_direct‖∞` when both converged/succeeded.
    pub deviation_from_direct: Option<f64>,
}

impl MethodRun {
    pub fn converged(&self) -> bool {
        matches!(&self.outcome, Ok(r) if r.actual_converged)
    }

    pub fn report(&self) -> Option<&ConvergenceReport> {
        self.outcome.as_ref().ok()
    }
}

/// The optional direct reference solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectRun {
    pub pivot: PivotMode,
    pub elapsed: Duration,
    pub outcome: Result<Solution, SolverError>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedMethod {
    pub method: Method,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonReport {
    /// Jacobi, Gauss-Seidel, SOR, in that order.
    pub runs: Vec<MethodRun>,
    pub direct: Option<DirectRun>,
    /// Converged methods only, best first.
    pub ranking: Vec<RankedMethod>,
    /// `None` when no method converged.
    pub best: Option<Method>,
}

impl ComparisonReport {
    /// At least one method reached the tolerance.
    pub fn succeeded(&self) -> bool {
        self.best.is_some()
    }

    pub fn run(&self, method: Method) -> Option<&MethodRun> {
        self.runs.iter().find(|r| r.method == method)
    }

    /// Converged method with the shortest wall-clock time.
    pub fn fastest(&self) -> Option<Method> {
        self.runs
            .iter()
            .filter(|r| r.converged())
            .min_by_key(|r| r.elapsed)
            .map(|r| r.method)
    }
}

/// Runs every stationary method on one system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    direct: Option<PivotMode>,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also solve directly and report each method's distance to that solution.
    pub fn with_direct(mut self, pivot: PivotMode) -> Self {
        self.direct = Some(pivot);
        self
    }

    /// Structural problems (sizes, tolerance, budget, ω) fail the whole comparison;
    /// numeric failures of a single method are recorded in its run.
    pub fn compare(
        &self,
        system: &LinearSystem,
        config: &IterativeConfig,
    ) -> Result<ComparisonReport, SolverError> {
        config.validate(system.n(), Method::Sor)?;

        let direct = self.direct.map(|pivot| {
            let start = Instant::now();
            let outcome = solve_direct(system, pivot);
            DirectRun { pivot, elapsed: start.elapsed(), outcome }
        });
        let reference = direct
            .as_ref()
            .and_then(|d| d.outcome.as_ref().ok())
            .map(Solution::unpermuted);

        let mut runs = run_all(system, config);
        if let Some(xd) = &reference {
            for run in &mut runs {
                run.deviation_from_direct = run
                    .report()
                    .and_then(|r| r.solution.as_deref())
                    .map(|x| diff_norm_inf(x, xd));
            }
        }

        let converged: Vec<&ConvergenceReport> = runs
            .iter()
            .filter(|r| r.converged())
            .filter_map(MethodRun::report)
            .collect();
        let ranking = rank(&converged);
        let best = ranking.first().map(|r| r.method);
        match best {
            Some(m) => log::debug!("compare: best method {m}"),
            None => log::warn!("compare: no method converged"),
        }

        Ok(ComparisonReport { runs, direct, ranking, best })
    }
}

/// [`Comparator`] without a direct reference.
pub fn compare_iterative(
    system: &LinearSystem,
    config: &IterativeConfig,
) -> Result<ComparisonReport, SolverError> {
    Comparator::new().compare(system, config)
}

fn run_one(system: &LinearSystem, config: &IterativeConfig, method: Method) -> MethodRun {
    let start = Instant::now();
    let outcome = solve_iterative(system, config, method);
    MethodRun {
        method,
        elapsed: start.elapsed(),
        outcome,
        deviation_from_direct: None,
    }
}

#[cfg(feature = "rayon")]
fn run_all(system: &LinearSystem, config: &IterativeConfig) -> Vec<MethodRun> {
    use rayon::prelude::*;
    Method::ALL
        .par_iter()
        .map(|&m| run_one(system, config, m))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn run_all(system: &LinearSystem, config: &IterativeConfig) -> Vec<MethodRun> {
    Method::ALL
        .iter()
        .map(|&m| run_one(system, config, m))
        .collect()
}

/// Score and order converged reports; reports that did not converge are skipped.
pub fn rank(reports: &[&ConvergenceReport]) -> Vec<RankedMethod> {
    let reports: Vec<&ConvergenceReport> = reports
        .iter()
        .copied()
        .filter(|r| r.actual_converged)
        .collect();
    if reports.is_empty() {
        return Vec::new();
    }

    let max_rho = reports.iter().filter_map(|r| r.spectral_radius).fold(0.0, f64::max);
    let max_iters = reports.iter().map(|r| r.iterations_used as f64).fold(0.0, f64::max);
    let max_err = reports.iter().map(|r| r.final_error).fold(0.0, f64::max);

    let mut ranking: Vec<RankedMethod> = reports
        .iter()
        .map(|r| {
            let theory = if r.theoretical_convergence { 1.0 } else { 0.0 };
            // an unknown radius earns nothing on that criterion
            let rho_score = r
                .spectral_radius
                .map_or(0.0, |rho| inverse_normalized(rho, max_rho));
            let score = W_SPECTRAL * rho_score
                + W_ITERATIONS * inverse_normalized(r.iterations_used as f64, max_iters)
                + W_ERROR * inverse_normalized(r.final_error, max_err)
                + W_THEORY * theory;
            RankedMethod { method: r.method, score }
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.method.cmp(&b.method)));
    ranking
}

fn inverse_normalized(v: f64, max: f64) -> f64 {
    if max > 0.0 { 1.0 - v / max } else { 1.0 }
}
