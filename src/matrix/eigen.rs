//! Eigenvalues of small dense non-symmetric matrices, via faer's eigendecomposition.
//!
//! Only eigenvalues are requested; eigenvectors are never formed.

use crate::error::SolverError;
use faer::Mat;
use faer::linalg::evd::EvdError;

/// An eigenvalue `re + i·im`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenvalue {
    pub re: f64,
    pub im: f64,
}

impl Eigenvalue {
    pub fn magnitude(&self) -> f64 {
        self.re.hypot(self.im)
    }
}

/// All eigenvalues of a square matrix, in no particular order.
pub fn eigenvalues(a: &Mat<f64>) -> Result<Vec<Eigenvalue>, SolverError> {
    assert_eq!(a.nrows(), a.ncols(), "eigenvalues of a non-square matrix");
    let values = a.eigenvalues().map_err(|e| match e {
        EvdError::NoConvergence => SolverError::EigenvalueFailure,
    })?;
    Ok(values
        .into_iter()
        .map(|z| Eigenvalue { re: z.re, im: z.im })
        .collect())
}

/// `max |λ|` over the eigenvalues of `a`.
pub fn spectral_radius(a: &Mat<f64>) -> Result<f64, SolverError> {
    if a.nrows() == 0 {
        return Ok(0.0);
    }
    let radius = eigenvalues(a)?
        .iter()
        .map(Eigenvalue::magnitude)
        .fold(0.0, f64::max);
    if radius.is_finite() {
        Ok(radius)
    } else {
        Err(SolverError::NumericOverflow { stage: "spectral radius" })
    }
}
