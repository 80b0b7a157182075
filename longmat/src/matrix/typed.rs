use crate::error::{MatrixError, Result};
use crate::matrix::DenseMatrix;
use crate::shape::{Coordinates, check_coordinates, row_major};

/// Cell access, traversal and aggregation shared by [`DenseMatrix`] and
/// [`View`](crate::view::View).
///
/// Writes take `&self`: cells are shared between a matrix and every view over it, and a
/// write through any of them is visible through all the others. Read-only views reject
/// every write with [`MatrixError::UnsupportedOperation`] before any cell changes.
///
/// Traversal is row-major: the last axis varies fastest.
pub trait TypedMatrix<T: Copy, const D: usize> {
    fn extents(&self) -> [u64; D];

    /// Reads a cell without validating `coordinates`.
    fn get_quick(&self, coordinates: [u64; D]) -> T;

    /// Writes a cell without validating `coordinates`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view.
    fn set_quick(&self, coordinates: [u64; D], value: T) -> Result<()>;

    fn is_read_only(&self) -> bool;

    #[must_use]
    fn size(&self) -> u64 {
        self.extents().iter().product()
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a coordinate is outside its extent.
    fn get(&self, coordinates: impl Coordinates<D>) -> Result<T> {
        let coordinates = coordinates.into_array();
        check_coordinates(&coordinates, &self.extents())?;
        Ok(self.get_quick(coordinates))
    }

    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view,
    /// [`MatrixError::IndexOutOfRange`] if a coordinate is outside its extent.
    fn set(&self, coordinates: impl Coordinates<D>, value: T) -> Result<()> {
        self.ensure_writable()?;
        let coordinates = coordinates.into_array();
        check_coordinates(&coordinates, &self.extents())?;
        self.set_quick(coordinates, value)
    }

    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view.
    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only() {
            Err(MatrixError::UnsupportedOperation("mutation of a read-only view"))
        } else {
            Ok(())
        }
    }

    /// Sets every cell to `value`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view.
    fn assign(&self, value: T) -> Result<()> {
        self.ensure_writable()?;
        for coordinates in row_major(self.extents()) {
            self.set_quick(coordinates, value)?;
        }
        Ok(())
    }

    /// Sets every cell to `function(coordinates)`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view.
    fn assign_with(&self, mut function: impl FnMut([u64; D]) -> T) -> Result<()> {
        self.ensure_writable()?;
        for coordinates in row_major(self.extents()) {
            self.set_quick(coordinates, function(coordinates))?;
        }
        Ok(())
    }

    /// Copies every cell of `other`. `other` may share cells with `self`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOperation`] on a read-only view,
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    fn assign_from<M>(&self, other: &M) -> Result<()>
    where
        M: TypedMatrix<T, D> + ?Sized,
    {
        self.ensure_writable()?;
        if self.extents() != other.extents() {
            return Err(MatrixError::mismatch(&self.extents(), &other.extents()));
        }
        let values = other.to_vec();
        for (coordinates, value) in row_major(self.extents()).zip(values) {
            self.set_quick(coordinates, value)?;
        }
        Ok(())
    }

    /// Cell values in row-major order.
    fn iter(&self) -> impl Iterator<Item = T> {
        row_major(self.extents()).map(move |coordinates| self.get_quick(coordinates))
    }

    fn for_each(&self, mut visitor: impl FnMut([u64; D], T)) {
        for coordinates in row_major(self.extents()) {
            visitor(coordinates, self.get_quick(coordinates));
        }
    }

    /// Visits only the cells whose value satisfies `predicate`.
    fn for_each_where(&self, mut predicate: impl FnMut(T) -> bool, mut visitor: impl FnMut([u64; D], T)) {
        for coordinates in row_major(self.extents()) {
            let value = self.get_quick(coordinates);
            if predicate(value) {
                visitor(coordinates, value);
            }
        }
    }

    /// Maps every cell and folds the results with `combine`; `None` for an empty matrix.
    fn aggregate<A>(&self, map: impl FnMut(T) -> A, combine: impl FnMut(A, A) -> A) -> Option<A> {
        self.iter().map(map).reduce(combine)
    }

    /// Number of cells that differ from `T::default()`.
    #[must_use]
    fn cardinality(&self) -> u64
    where
        T: Default + PartialEq,
    {
        let zero = T::default();
        self.iter().filter(|value| *value != zero).count() as u64
    }

    #[must_use]
    fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Materialises the cells into a new, independent matrix.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if the cells do not fit in memory addressing.
    fn to_dense(&self) -> Result<DenseMatrix<T, D>> {
        DenseMatrix::from_vec(self.extents(), self.to_vec())
    }

    /// Equal extents and equal cells, wherever the cells live.
    #[must_use]
    fn content_eq<M>(&self, other: &M) -> bool
    where
        M: TypedMatrix<T, D> + ?Sized,
        T: PartialEq,
    {
        self.extents() == other.extents() && self.iter().eq(other.iter())
    }
}
