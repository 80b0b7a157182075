use crate::error::{MatrixError, Result};
use crate::matrix::TypedMatrix;
use crate::partition::MAX_SIZE;
use crate::shape::{Shape, linear_index, row_major};
use crate::view::{Backing, View};
use std::cell::Cell;
use std::hash::{Hash, Hasher};

/// A dense, fixed-extent matrix of `Copy` cells in row-major order.
///
/// Cells live in [`Cell`]s so that the matrix and any number of [`View`]s over it can read
/// and write the same storage; the matrix is therefore `!Sync` and meant for
/// single-threaded use.
///
/// ```
/// use longmat::prelude::*;
///
/// let matrix = DenseMatrix::<f64, 2>::new([3, 4]).unwrap();
/// matrix.set((1, 2), 7.5).unwrap();
///
/// let transposed = matrix.view_transpose();
/// assert_eq!(transposed.extents(), [4, 3]);
/// assert_eq!(transposed.get((2, 1)).unwrap(), 7.5);
///
/// transposed.set((0, 0), 1.0).unwrap();
/// assert_eq!(matrix.get((0, 0)).unwrap(), 1.0);
/// ```
#[must_use]
pub struct DenseMatrix<T, const D: usize> {
    shape: Shape<D>,
    cells: Box<[Cell<T>]>,
}

pub type DenseMatrix1D<T> = DenseMatrix<T, 1>;
pub type DenseMatrix2D<T> = DenseMatrix<T, 2>;
pub type DenseMatrix3D<T> = DenseMatrix<T, 3>;

impl<T: Copy, const D: usize> DenseMatrix<T, D> {
    /// Matrix with every cell `T::default()`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `D` is not 1, 2 or 3, or the extents hold
    /// `MAX_SIZE` cells or more than memory can address.
    pub fn new(extents: [u64; D]) -> Result<Self>
    where
        T: Default,
    {
        Self::filled(extents, T::default())
    }

    /// # Errors
    ///
    /// See [`DenseMatrix::new`].
    pub fn filled(extents: [u64; D], value: T) -> Result<Self> {
        let (shape, len) = Self::checked_shape(extents)?;
        Ok(Self {
            shape,
            cells: vec![Cell::new(value); len].into_boxed_slice(),
        })
    }

    /// Takes ownership of `values` laid out in row-major order.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] for bad extents or if `values` does not hold
    /// exactly one value per cell.
    pub fn from_vec(extents: [u64; D], values: Vec<T>) -> Result<Self> {
        let (shape, len) = Self::checked_shape(extents)?;
        if values.len() != len {
            return Err(MatrixError::invalid(format!(
                "{} values for extents {extents:?} holding {len} cells",
                values.len()
            )));
        }
        Ok(Self {
            shape,
            cells: values.into_iter().map(Cell::new).collect(),
        })
    }

    /// # Errors
    ///
    /// See [`DenseMatrix::new`].
    pub fn from_fn(extents: [u64; D], function: impl FnMut([u64; D]) -> T) -> Result<Self> {
        let (shape, len) = Self::checked_shape(extents)?;
        let mut cells = Vec::with_capacity(len);
        cells.extend(row_major(extents).map(function).map(Cell::new));
        Ok(Self {
            shape,
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn shape(&self) -> Shape<D> {
        self.shape
    }

    /// Identity view over all cells.
    pub fn view(&self) -> View<'_, T, D> {
        View::of(self)
    }

    fn checked_shape(extents: [u64; D]) -> Result<(Shape<D>, usize)> {
        let shape = Shape::new(extents, MAX_SIZE)?;
        let len = usize::try_from(shape.size())
            .map_err(|_| MatrixError::invalid(format!("extents {extents:?} exceed the address space")))?;
        Ok((shape, len))
    }

    #[inline]
    fn cell(&self, coordinates: &[u64]) -> &Cell<T> {
        &self.cells[linear_index(coordinates, &self.shape[..]) as usize]
    }
}

impl<T: Copy, const D: usize> TypedMatrix<T, D> for DenseMatrix<T, D> {
    fn extents(&self) -> [u64; D] {
        self.shape.extents()
    }

    #[inline]
    fn get_quick(&self, coordinates: [u64; D]) -> T {
        self.cell(&coordinates).get()
    }

    #[inline]
    fn set_quick(&self, coordinates: [u64; D], value: T) -> Result<()> {
        self.cell(&coordinates).set(value);
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn iter(&self) -> impl Iterator<Item = T> {
        self.cells.iter().map(Cell::get)
    }

    fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }
}

impl<T: Copy, const D: usize> Backing<T> for DenseMatrix<T, D> {
    fn axis_extents(&self) -> &[u64] {
        &self.shape[..]
    }

    #[inline]
    fn read_cell(&self, coordinates: &[u64]) -> T {
        self.cell(coordinates).get()
    }

    #[inline]
    fn write_cell(&self, coordinates: &[u64], value: T) -> Result<()> {
        self.cell(coordinates).set(value);
        Ok(())
    }

    fn rejects_writes(&self) -> bool {
        false
    }
}

impl<T: Copy, const D: usize> Clone for DenseMatrix<T, D> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            cells: self.cells.clone(),
        }
    }
}

impl<T: Copy + PartialEq, const D: usize> PartialEq for DenseMatrix<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.cells == other.cells
    }
}

impl<T: Copy + Eq, const D: usize> Eq for DenseMatrix<T, D> {}

impl<T: Copy + Hash, const D: usize> Hash for DenseMatrix<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        for cell in &self.cells {
            cell.get().hash(state);
        }
    }
}

impl<'a, T: Copy + PartialEq, const D: usize> PartialEq<View<'a, T, D>> for DenseMatrix<T, D> {
    fn eq(&self, other: &View<'a, T, D>) -> bool {
        self.content_eq(other)
    }
}

impl<T: Copy + std::fmt::Debug, const D: usize> std::fmt::Debug for DenseMatrix<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DenseMatrix(shape={:?},value={:?})", self.shape.extents(), self.to_vec())
    }
}
