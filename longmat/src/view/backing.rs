use crate::error::Result;

/// Cell storage a [`View`](crate::view::View) reads and writes through.
///
/// Coordinates are slices whose length is the rank of the backing; a view maps its own
/// coordinates into its parent's before forwarding. Implementations may assume the
/// coordinates are in range.
pub trait Backing<T: Copy> {
    fn axis_extents(&self) -> &[u64];

    fn read_cell(&self, coordinates: &[u64]) -> T;

    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`](crate::error::MatrixError::UnsupportedOperation)
    /// when the backing does not accept writes.
    fn write_cell(&self, coordinates: &[u64], value: T) -> Result<()>;

    fn rejects_writes(&self) -> bool;
}

impl<T: Copy, B: Backing<T> + ?Sized> Backing<T> for &B {
    fn axis_extents(&self) -> &[u64] {
        (**self).axis_extents()
    }

    #[inline]
    fn read_cell(&self, coordinates: &[u64]) -> T {
        (**self).read_cell(coordinates)
    }

    #[inline]
    fn write_cell(&self, coordinates: &[u64], value: T) -> Result<()> {
        (**self).write_cell(coordinates, value)
    }

    fn rejects_writes(&self) -> bool {
        (**self).rejects_writes()
    }
}
