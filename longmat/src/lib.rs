pub mod bit;
pub use bit::{BitBlock, BitLength, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};

pub mod error;
pub use error::{MatrixError, Result};

pub mod partition;
pub use partition::{DEFAULT_BLOCK_CAPACITY, MAX_SIZE, Partitioner};

pub mod shape;
pub use shape::{Coordinates, MAX_RANK, Shape};

pub mod vec;
pub use vec::{Block, LongBitVec};

pub mod matrix;
pub use matrix::{BitMatrix, BitMatrix1D, BitMatrix2D, BitMatrix3D, DenseMatrix, TypedMatrix};

pub mod view;
pub use view::{IntoView, Transform, View, ViewFactory, ViewFactory1D, ViewFactory2D, ViewFactory3D, unmodifiable};

/// Matrices, views and the traits their methods live on.
pub mod prelude {
    pub use crate::error::{MatrixError, Result};
    pub use crate::matrix::{
        BitMatrix, BitMatrix1D, BitMatrix2D, BitMatrix3D, DenseMatrix, DenseMatrix1D, DenseMatrix2D, DenseMatrix3D,
        TypedMatrix,
    };
    pub use crate::view::{IntoView, View, ViewFactory, ViewFactory1D, ViewFactory2D, ViewFactory3D, unmodifiable};
    pub use crate::{new_bit_matrix, new_typed_matrix};
}

/// All-`false` bit matrix with the given extents.
///
/// # Errors
///
/// [`MatrixError::InvalidArgument`] if `D` is not 1, 2 or 3, or the extents hold
/// [`MAX_SIZE`] cells or more.
pub fn new_bit_matrix<const D: usize>(extents: [u64; D]) -> Result<BitMatrix<D>> {
    BitMatrix::new(extents)
}

/// Dense matrix with every cell `T::default()`.
///
/// # Errors
///
/// [`MatrixError::InvalidArgument`] if `D` is not 1, 2 or 3, or the extents hold
/// [`MAX_SIZE`] cells or more than memory can address.
pub fn new_typed_matrix<T: Copy + Default, const D: usize>(extents: [u64; D]) -> Result<DenseMatrix<T, D>> {
    DenseMatrix::new(extents)
}
