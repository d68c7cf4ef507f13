//! linsolve: direct and stationary solvers for dense linear systems over Faer
//!
//! This crate solves `Ax = b` for small to medium dense square systems, either directly
//! (Gaussian elimination with no, partial or total pivoting) or with the Jacobi,
//! Gauss-Seidel and SOR iterations, reporting spectral-radius based convergence
//! diagnostics and comparing the iterative methods against each other.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod pivot;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use error::*;
pub use matrix::{LinearSystem, spectral_radius};
pub use pivot::Permutation;
pub use solver::*;
pub use utils::*;
