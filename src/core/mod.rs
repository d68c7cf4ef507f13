//! Core traits and their implementations for faer matrices and Rust vectors.

pub mod traits;
pub mod wrappers;

pub use traits::{InfNorm, MatShape, MatVec};
pub use wrappers::diff_norm_inf;
