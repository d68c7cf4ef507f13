//! Configuration types for the direct and iterative solvers.

pub mod options;
pub use options::{ErrorMode, IterativeConfig, Method, NEGLIGIBLE, PivotMode};
