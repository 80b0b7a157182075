use thiserror::Error;

/// Errors raised by matrix construction, addressing and mutation.
///
/// Every operation validates its arguments completely before it mutates anything, so a
/// call that returns an error leaves the matrix exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Bad extents, capacity, stride, sub-range, permutation or input length.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate outside `[0, extent)` along `axis`.
    ///
    /// Range operations over the linear index space report `axis = 0` and the total size.
    #[error("index {index} out of range for axis {axis} with extent {extent}")]
    IndexOutOfRange { axis: usize, index: u64, extent: u64 },

    /// A binary operation between matrices with different extents.
    #[error("dimension mismatch: expected extents {expected:?}, found {found:?}")]
    DimensionMismatch { expected: Vec<u64>, found: Vec<u64> },

    /// A mutation attempted through a read-only view.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn mismatch(expected: &[u64], found: &[u64]) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}
