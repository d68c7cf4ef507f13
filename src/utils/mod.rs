//! Convergence bookkeeping and system diagnostics.

pub mod convergence;
pub mod diagnostics;

pub use convergence::{ConvergenceReport, IterationTrace, StopReason, TraceEntry};
pub use diagnostics::{SystemChecks, SystemDiagnostics, diagnose, optimal_relaxation};
