use thiserror::Error;

// Unified error type for linsolve

#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolverError {
    #[error("matrix is not square ({rows} rows, {cols} columns)")]
    NonSquareMatrix { rows: usize, cols: usize },
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("zero or negligible pivot at row {row}; the system may not have a unique solution")]
    SingularOrIllConditioned { row: usize },
    #[error("relaxation factor {0} is outside the open interval (0, 2)")]
    InvalidRelaxationFactor(f64),
    #[error("no convergence after {iterations} iterations (last error {error:e})")]
    NonConvergence { iterations: usize, error: f64 },
    #[error("non-finite value produced during {stage}")]
    NumericOverflow { stage: &'static str },
    #[error("eigenvalue computation did not converge")]
    EigenvalueFailure,
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    #[error("unknown {kind} `{value}`")]
    Parse { kind: &'static str, value: String },
}

/// Fails with `NumericOverflow` if any entry of `values` is NaN or infinite.
pub(crate) fn ensure_finite(values: &[f64], stage: &'static str) -> Result<(), SolverError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SolverError::NumericOverflow { stage })
    }
}
