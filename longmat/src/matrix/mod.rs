mod bitmatrix;
mod dense;
mod typed;

pub use bitmatrix::{BitMatrix, BitMatrix1D, BitMatrix2D, BitMatrix3D};
pub use dense::{DenseMatrix, DenseMatrix1D, DenseMatrix2D, DenseMatrix3D};
pub use typed::TypedMatrix;
