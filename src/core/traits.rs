//! Core linear-algebra traits for linsolve.

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Infinity norms.
pub trait InfNorm {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Vectors: `max |xᵢ|`. Matrices: maximum absolute row sum.
    fn norm_inf(&self) -> Self::Scalar;
}

/// Shape queries shared by dense matrices.
pub trait MatShape {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
