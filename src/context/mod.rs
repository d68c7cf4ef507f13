//! Context module for linsolve.
//!
//! Higher-level drivers that combine the individual solvers.
//!
//! Modules:
//! - [`comparator`]: runs Jacobi, Gauss-Seidel and SOR on one system and ranks them.
//!
//! # Example
//! ```rust,ignore
//! use linsolve::{Comparator, IterativeConfig, LinearSystem, PivotMode};
//! let report = Comparator::new().with_direct(PivotMode::Partial).compare(&system, &config)?;
//! ```

pub mod comparator;
pub use comparator::{
    Comparator, ComparisonReport, DirectRun, MethodRun, RankedMethod, compare_iterative, rank,
};
