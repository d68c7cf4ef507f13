//! Affine iteration maps `x ← T·x + C` from the splitting `A = D + L + U`.
//!
//! Each method picks a lower-triangular `M` and a remainder `N` with `A = M - N`
//! (SOR scales the system by ω first), then `T = M⁻¹N` and `C = M⁻¹b`. `M⁻¹` is
//! never formed; `N` and `b` are overwritten by faer's lower-triangular solve.
//!
//! | method       | M        | N              | C            |
//! |--------------|----------|----------------|--------------|
//! | Jacobi       | D        | -(L + U)       | D⁻¹b         |
//! | Gauss-Seidel | D + L    | -U             | (D+L)⁻¹b     |
//! | SOR(ω)       | D + ωL   | (1-ω)D - ωU    | ω(D+ωL)⁻¹b   |

use crate::config::Method;
use crate::config::options::check_relaxation;
use crate::core::traits::MatVec;
use crate::error::{SolverError, ensure_finite};
use crate::matrix::{LinearSystem, Splitting, spectral_radius};
use faer::linalg::triangular_solve::solve_lower_triangular_in_place;
use faer::{Mat, Par};

/// The pair `(T, C)` for one method on one system.
#[derive(Debug, Clone)]
pub struct IterationOperator {
    method: Method,
    relaxation: f64,
    t: Mat<f64>,
    c: Vec<f64>,
}

impl IterationOperator {
    /// `relaxation` is only read for `Method::Sor`.
    pub fn build(system: &LinearSystem, method: Method, relaxation: f64) -> Result<Self, SolverError> {
        match method {
            Method::Jacobi => Self::jacobi(system),
            Method::GaussSeidel => Self::gauss_seidel(system),
            Method::Sor => Self::sor(system, relaxation),
        }
    }

    pub fn jacobi(system: &LinearSystem) -> Result<Self, SolverError> {
        let s = split(system)?;
        let n = s.n();
        let m = Mat::from_fn(n, n, |i, j| if i == j { s.d[i] } else { 0.0 });
        let rem = Mat::from_fn(n, n, |i, j| -(s.l[(i, j)] + s.u[(i, j)]));
        let (t, c) = solve_splitting(&m, &rem, system.b(), 1.0)?;
        Ok(Self { method: Method::Jacobi, relaxation: 1.0, t, c })
    }

    pub fn gauss_seidel(system: &LinearSystem) -> Result<Self, SolverError> {
        let s = split(system)?;
        let n = s.n();
        let m = Mat::from_fn(n, n, |i, j| if i == j { s.d[i] } else { s.l[(i, j)] });
        let rem = Mat::from_fn(n, n, |i, j| -s.u[(i, j)]);
        let (t, c) = solve_splitting(&m, &rem, system.b(), 1.0)?;
        Ok(Self { method: Method::GaussSeidel, relaxation: 1.0, t, c })
    }

    /// Fails with `InvalidRelaxationFactor` unless `0 < w < 2`.
    pub fn sor(system: &LinearSystem, w: f64) -> Result<Self, SolverError> {
        check_relaxation(w)?;
        let s = split(system)?;
        let n = s.n();
        let m = Mat::from_fn(n, n, |i, j| if i == j { s.d[i] } else { w * s.l[(i, j)] });
        let rem = Mat::from_fn(n, n, |i, j| {
            if i == j {
                (1.0 - w) * s.d[i]
            } else {
                -w * s.u[(i, j)]
            }
        });
        let (t, c) = solve_splitting(&m, &rem, system.b(), w)?;
        Ok(Self { method: Method::Sor, relaxation: w, t, c })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn relaxation(&self) -> f64 {
        self.relaxation
    }

    pub fn n(&self) -> usize {
        self.c.len()
    }

    /// Iteration matrix `T`.
    pub fn t(&self) -> &Mat<f64> {
        &self.t
    }

    /// Constant term `C`.
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    /// One step of the map: `T·x + C`.
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; self.n()];
        self.t.matvec(&x.to_vec(), &mut y);
        for (yi, ci) in y.iter_mut().zip(&self.c) {
            *yi += ci;
        }
        y
    }

    /// `ρ(T)`
    pub fn spectral_radius(&self) -> Result<f64, SolverError> {
        spectral_radius(&self.t)
    }
}

fn split(system: &LinearSystem) -> Result<Splitting<f64>, SolverError> {
    let s = Splitting::of(system.a());
    s.require_invertible_diagonal()?;
    Ok(s)
}

/// `T = M⁻¹N`, `C = scale · M⁻¹b` for lower-triangular `M`.
fn solve_splitting(
    m: &Mat<f64>,
    rem: &Mat<f64>,
    b: &[f64],
    scale: f64,
) -> Result<(Mat<f64>, Vec<f64>), SolverError> {
    let n = m.nrows();
    let mut t = rem.clone();
    solve_lower_triangular_in_place(m.as_ref(), t.as_mut(), Par::Seq);
    for j in 0..n {
        ensure_finite(t.col_as_slice(j), "operator construction")?;
    }

    let mut rhs = Mat::from_fn(n, 1, |i, _| b[i]);
    solve_lower_triangular_in_place(m.as_ref(), rhs.as_mut(), Par::Seq);
    let c: Vec<f64> = rhs.col_as_slice(0).iter().map(|v| scale * v).collect();
    ensure_finite(&c, "operator construction")?;
    Ok((t, c))
}
