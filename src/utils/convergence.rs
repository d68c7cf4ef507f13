//! Convergence tracking & tolerance checks for stationary iterations.

use crate::config::{ErrorMode, Method};
use crate::error::SolverError;
use crate::utils::diagnostics::is_negligible;

/// Stopping criteria.
#[derive(Debug, Clone, Copy)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

/// Why an iterative run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StopReason {
    /// The error dropped to or below the tolerance.
    Converged,
    /// The iteration budget ran out first.
    MaxIterReached,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// `Some(reason)` once iteration `i` (1-based) with the given `error` ends the run.
    pub fn check(&self, error: T, i: usize) -> Option<StopReason> {
        if error <= self.tol {
            Some(StopReason::Converged)
        } else if i >= self.max_iters {
            Some(StopReason::MaxIterReached)
        } else {
            None
        }
    }
}

impl ErrorMode {
    /// Distance between consecutive iterates `prev` and `next`.
    pub fn measure(self, prev: &[f64], next: &[f64]) -> f64 {
        debug_assert_eq!(prev.len(), next.len());
        let diffs = prev.iter().zip(next).map(|(&p, &x)| {
            let d = (x - p).abs();
            match self {
                ErrorMode::Absolute => d,
                ErrorMode::Relative if is_negligible(x) => d,
                ErrorMode::Relative => d / x.abs(),
            }
        });
        diffs.fold(0.0, f64::max)
    }
}

/// One completed iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceEntry {
    /// 1-based iteration index.
    pub iteration: usize,
    pub x: Vec<f64>,
    pub error: f64,
}

/// Append-only log of iterates, one entry per completed iteration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IterationTrace {
    entries: Vec<TraceEntry>,
}

impl IterationTrace {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { entries: Vec::with_capacity(n) }
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        debug_assert_eq!(entry.iteration, self.entries.len() + 1);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

}

impl<'a> IntoIterator for &'a IterationTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of one stationary run.
///
/// `theoretical_convergence` is a property of the iteration operator and
/// `actual_converged` of this particular run; the two may disagree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergenceReport {
    pub method: Method,
    /// Largest eigenvalue magnitude of the iteration matrix `T`; `None` if the
    /// eigenvalues could not be computed.
    pub spectral_radius: Option<f64>,
    /// `spectral_radius < 1`, false when the radius is unknown
    pub theoretical_convergence: bool,
    pub actual_converged: bool,
    pub stop_reason: StopReason,
    pub iterations_used: usize,
    pub final_error: f64,
    /// Present only when `actual_converged`.
    pub solution: Option<Vec<f64>>,
    /// Last iterate, whatever the outcome.
    pub last_iterate: Vec<f64>,
    pub trace: IterationTrace,
}

impl ConvergenceReport {
    /// The solution, or `NonConvergence` when the budget ran out.
    pub fn into_solution(self) -> Result<Vec<f64>, SolverError> {
        match self.solution {
            Some(x) => Ok(x),
            None => Err(SolverError::NonConvergence {
                iterations: self.iterations_used,
                error: self.final_error,
            }),
        }
    }
}
