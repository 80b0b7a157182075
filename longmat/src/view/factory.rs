use crate::error::{MatrixError, Result};
use crate::matrix::{BitMatrix, DenseMatrix, TypedMatrix};
use crate::view::View;

/// A matrix or view reference that can be looked at through a [`View`].
///
/// Implemented for `&DenseMatrix`, `&View` and `&BitMatrix`; the bit matrix view is
/// read-only.
pub trait IntoView<'a, const D: usize> {
    type Cell: Copy + 'a;

    fn into_view(self) -> View<'a, Self::Cell, D>;
}

impl<'a, T: Copy + 'a, const D: usize> IntoView<'a, D> for &'a DenseMatrix<T, D> {
    type Cell = T;

    fn into_view(self) -> View<'a, T, D> {
        View::of(self)
    }
}

impl<'a, T: Copy + 'a, const D: usize> IntoView<'a, D> for &View<'a, T, D> {
    type Cell = T;

    fn into_view(self) -> View<'a, T, D> {
        self.clone()
    }
}

impl<'a, const D: usize> IntoView<'a, D> for &'a BitMatrix<D> {
    type Cell = bool;

    fn into_view(self) -> View<'a, bool, D> {
        View::of(self)
    }
}

/// Read-only view over `matrix`. Every view derived from it is read-only as well.
pub fn unmodifiable<'a, const D: usize, M: IntoView<'a, D>>(matrix: M) -> View<'a, M::Cell, D> {
    matrix.into_view().read_only_view()
}

fn check_index(axis: usize, index: u64, extents: &[u64]) -> Result<()> {
    let extent = extents[axis];
    if index >= extent {
        return Err(MatrixError::IndexOutOfRange { axis, index, extent });
    }
    Ok(())
}

/// View factories shared by every dimensionality.
pub trait ViewFactory<'a, const D: usize>: IntoView<'a, D> + Sized {
    /// View axis `i` is backing axis `axes[i]`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] unless `axes` is a permutation of `0..D`.
    fn view_dice(self, axes: [usize; D]) -> Result<View<'a, Self::Cell, D>> {
        self.into_view().diced(axes)
    }

    /// Reverses the order along `axis`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `axis >= D`.
    fn view_flip(self, axis: usize) -> Result<View<'a, Self::Cell, D>> {
        if axis >= D {
            return Err(MatrixError::invalid(format!("axis {axis} of a rank {D} matrix")));
        }
        Ok(self.into_view().flipped(axis))
    }

    /// The box starting at `offset` with the given `extents`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if the box reaches past the backing on any axis.
    fn view_part(self, offset: [u64; D], extents: [u64; D]) -> Result<View<'a, Self::Cell, D>> {
        self.into_view().part(offset, extents)
    }

    /// Picks positions per axis; `None` keeps the axis whole. Indices may repeat, skip or
    /// reorder.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] for the first index outside its axis.
    fn view_selection(self, indices: [Option<&[u64]>; D]) -> Result<View<'a, Self::Cell, D>> {
        self.into_view().selected(indices)
    }

    /// Keeps the positions along `axis` whose bit is set in `mask`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `axis >= D`,
    /// [`MatrixError::DimensionMismatch`] if the mask size differs from the axis extent.
    fn view_selection_mask(self, axis: usize, mask: &BitMatrix<1>) -> Result<View<'a, Self::Cell, D>> {
        self.into_view().masked(axis, mask)
    }

    /// Every `strides[i]`-th position along each axis, starting at 0.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if a stride is 0.
    fn view_strides(self, strides: [u64; D]) -> Result<View<'a, Self::Cell, D>> {
        self.into_view().strided(strides)
    }
}

impl<'a, const D: usize, M: IntoView<'a, D>> ViewFactory<'a, D> for M {}

pub trait ViewFactory1D<'a>: IntoView<'a, 1> + Sized {
    /// Keeps the cells whose value satisfies `predicate`, evaluated once per cell now.
    fn view_selection_where(self, mut predicate: impl FnMut(Self::Cell) -> bool) -> View<'a, Self::Cell, 1> {
        let view = self.into_view();
        let accepted = (0..view.size()).filter(|&index| predicate(view.get_quick([index]))).collect();
        view.accepted(0, accepted)
    }
}

impl<'a, M: IntoView<'a, 1>> ViewFactory1D<'a> for M {}

pub trait ViewFactory2D<'a>: IntoView<'a, 2> + Sized {
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `row` is outside the matrix.
    fn view_row(self, row: u64) -> Result<View<'a, Self::Cell, 1>> {
        let view = self.into_view();
        check_index(0, row, &view.extents())?;
        Ok(view.fixed(0, row))
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `column` is outside the matrix.
    fn view_column(self, column: u64) -> Result<View<'a, Self::Cell, 1>> {
        let view = self.into_view();
        check_index(1, column, &view.extents())?;
        Ok(view.fixed(1, column))
    }

    fn view_transpose(self) -> View<'a, Self::Cell, 2> {
        self.into_view().transposed()
    }

    /// Reverses the row order.
    fn view_row_flip(self) -> View<'a, Self::Cell, 2> {
        self.into_view().flipped(0)
    }

    /// Reverses the column order.
    fn view_column_flip(self) -> View<'a, Self::Cell, 2> {
        self.into_view().flipped(1)
    }

    /// Keeps the rows for which `predicate` holds, evaluated once per row now.
    fn view_selection_where(
        self,
        mut predicate: impl FnMut(&View<'a, Self::Cell, 1>) -> bool,
    ) -> View<'a, Self::Cell, 2> {
        let view = self.into_view();
        let accepted = (0..view.extents()[0])
            .filter(|&row| predicate(&view.fixed(0, row)))
            .collect();
        view.accepted(0, accepted)
    }
}

impl<'a, M: IntoView<'a, 2>> ViewFactory2D<'a> for M {}

/// Axes of a 3D matrix are `[slice, row, column]`.
pub trait ViewFactory3D<'a>: IntoView<'a, 3> + Sized {
    /// The `[rows, columns]` plane at `slice`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `slice` is outside the matrix.
    fn view_slice(self, slice: u64) -> Result<View<'a, Self::Cell, 2>> {
        let view = self.into_view();
        check_index(0, slice, &view.extents())?;
        Ok(view.fixed(0, slice))
    }

    /// The `[slices, columns]` plane at `row`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `row` is outside the matrix.
    fn view_row(self, row: u64) -> Result<View<'a, Self::Cell, 2>> {
        let view = self.into_view();
        check_index(1, row, &view.extents())?;
        Ok(view.fixed(1, row))
    }

    /// The `[slices, rows]` plane at `column`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `column` is outside the matrix.
    fn view_column(self, column: u64) -> Result<View<'a, Self::Cell, 2>> {
        let view = self.into_view();
        check_index(2, column, &view.extents())?;
        Ok(view.fixed(2, column))
    }

    fn view_slice_flip(self) -> View<'a, Self::Cell, 3> {
        self.into_view().flipped(0)
    }

    fn view_row_flip(self) -> View<'a, Self::Cell, 3> {
        self.into_view().flipped(1)
    }

    fn view_column_flip(self) -> View<'a, Self::Cell, 3> {
        self.into_view().flipped(2)
    }

    /// Keeps the slices for which `predicate` holds, evaluated once per slice now.
    fn view_selection_where(
        self,
        mut predicate: impl FnMut(&View<'a, Self::Cell, 2>) -> bool,
    ) -> View<'a, Self::Cell, 3> {
        let view = self.into_view();
        let accepted = (0..view.extents()[0])
            .filter(|&slice| predicate(&view.fixed(0, slice)))
            .collect();
        view.accepted(0, accepted)
    }
}

impl<'a, M: IntoView<'a, 3>> ViewFactory3D<'a> for M {}
