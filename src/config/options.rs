//! Solver options: pivoting mode, error measure and iterative settings.
//!
//! The enumerations here can be built from the short names used by callers
//! (`"partial"`, `"relative"`, `"gauss-seidel"`, ...) and, for `PivotMode`,
//! from the numeric wire codes `0`, `1` and `2`.

use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;

/// Magnitude below which a pivot or diagonal entry is treated as zero.
pub const NEGLIGIBLE: f64 = 1e-10;

/// Pivot search performed at each elimination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PivotMode {
    /// Use the diagonal as is.
    #[default]
    None,
    /// Row swaps only.
    Partial,
    /// Row and column swaps, tracked in a permutation.
    Total,
}

impl PivotMode {
    pub const ALL: [PivotMode; 3] = [PivotMode::None, PivotMode::Partial, PivotMode::Total];
}

impl TryFrom<u8> for PivotMode {
    type Error = SolverError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PivotMode::None),
            1 => Ok(PivotMode::Partial),
            2 => Ok(PivotMode::Total),
            other => Err(SolverError::Parse {
                kind: "pivot mode",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for PivotMode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(PivotMode::None),
            "partial" | "1" => Ok(PivotMode::Partial),
            "total" | "full" | "2" => Ok(PivotMode::Total),
            _ => Err(SolverError::Parse {
                kind: "pivot mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PivotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PivotMode::None => "none",
            PivotMode::Partial => "partial",
            PivotMode::Total => "total",
        };
        f.write_str(name)
    }
}

/// How the distance between two consecutive iterates is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorMode {
    /// `‖x1 - x0‖∞`
    #[default]
    Absolute,
    /// `‖(x1 - x0) ⊘ x1‖∞`, falling back to the absolute difference where `x1` is ~0.
    Relative,
}

impl FromStr for ErrorMode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" | "abs" => Ok(ErrorMode::Absolute),
            "relative" | "rel" => Ok(ErrorMode::Relative),
            _ => Err(SolverError::Parse {
                kind: "error mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Stationary iteration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Method {
    Jacobi,
    GaussSeidel,
    /// Successive over-relaxation, using `IterativeConfig::relaxation`.
    Sor,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Jacobi, Method::GaussSeidel, Method::Sor];
}

impl FromStr for Method {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "jacobi" => Ok(Method::Jacobi),
            "gauss-seidel" | "gaussseidel" | "gs" => Ok(Method::GaussSeidel),
            "sor" => Ok(Method::Sor),
            _ => Err(SolverError::Parse {
                kind: "iterative method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Jacobi => "Jacobi",
            Method::GaussSeidel => "Gauss-Seidel",
            Method::Sor => "SOR",
        };
        f.write_str(name)
    }
}

/// Settings shared by the Jacobi, Gauss-Seidel and SOR iterations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterativeConfig {
    /// Initial guess, one entry per unknown.
    pub x0: Vec<f64>,
    /// Stop once the error drops to or below this value.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: usize,
    pub error_mode: ErrorMode,
    /// Relaxation factor ω for SOR, `0 < ω < 2`.
    pub relaxation: f64,
}

impl IterativeConfig {
    pub fn new(x0: Vec<f64>, tolerance: f64, max_iterations: usize) -> Self {
        Self {
            x0,
            tolerance,
            max_iterations,
            error_mode: ErrorMode::Absolute,
            relaxation: 1.0,
        }
    }

    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn with_relaxation(mut self, w: f64) -> Self {
        self.relaxation = w;
        self
    }

    /// Structural checks against a system of size `n`; no numeric work is done.
    pub fn validate(&self, n: usize, method: Method) -> Result<(), SolverError> {
        self.validate_iteration(n)?;
        if method == Method::Sor {
            check_relaxation(self.relaxation)?;
        }
        Ok(())
    }

    /// The checks that do not depend on the method: `x0`, tolerance and budget.
    pub(crate) fn validate_iteration(&self, n: usize) -> Result<(), SolverError> {
        if self.x0.len() != n {
            return Err(SolverError::DimensionMismatch {
                what: "initial guess",
                expected: n,
                actual: self.x0.len(),
            });
        }
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(SolverError::InvalidParameter("tolerance must be positive and finite"));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidParameter("max_iterations must be positive"));
        }
        Ok(())
    }
}

pub(crate) fn check_relaxation(w: f64) -> Result<(), SolverError> {
    if w > 0.0 && w < 2.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidRelaxationFactor(w))
    }
}
