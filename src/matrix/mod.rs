//! Matrix module: the linear system type, dense helpers, splitting and eigenvalues.

pub mod dense;
pub mod eigen;
pub mod split;
pub mod system;

pub use eigen::{Eigenvalue, eigenvalues, spectral_radius};
pub use split::Splitting;
pub use system::LinearSystem;
