use crate::error::{MatrixError, Result};
use crate::matrix::{BitMatrix, DenseMatrix, TypedMatrix};
use crate::shape::{MAX_RANK, check_coordinates};
use crate::view::Backing;
use crate::view::transform::{Transform, padded, permutation};
use std::rc::Rc;

/// A transformed coordinate space over the cells of a matrix or of another view.
///
/// A view owns no cells. Reads map the view coordinate through its [`Transform`] and
/// forward to the parent; writes do the same unless the view is read-only. Views are built
/// with the factory traits ([`ViewFactory`](crate::view::ViewFactory) and its 1D, 2D and
/// 3D companions), which every matrix and view reference implements.
///
/// ```
/// use longmat::prelude::*;
///
/// let matrix = DenseMatrix::<i32, 2>::from_fn([3, 4], |[row, column]| (10 * row + column) as i32).unwrap();
/// let corner = matrix.view_part([1, 2], [2, 2]).unwrap();
/// assert_eq!(corner.to_vec(), vec![12, 13, 22, 23]);
///
/// let column = corner.view_column(1).unwrap();
/// column.set(0, -1).unwrap();
/// assert_eq!(matrix.get((1, 3)).unwrap(), -1);
/// ```
#[must_use]
pub struct View<'a, T, const D: usize> {
    parent: Rc<dyn Backing<T> + 'a>,
    transform: Transform,
    extents: [u64; D],
    read_only: bool,
}

impl<'a, T: Copy + 'a, const D: usize> View<'a, T, D> {
    /// Identity view over `backing`, whose rank must be `D`.
    pub(crate) fn of<B: Backing<T> + ?Sized + 'a>(backing: &'a B) -> Self {
        let mut extents = [0; D];
        extents.copy_from_slice(backing.axis_extents());
        View {
            read_only: backing.rejects_writes(),
            parent: Rc::new(backing),
            transform: Transform::Identity,
            extents,
        }
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Builds a view whose parent is `self`. An identity view is skipped and its parent
    /// shared directly.
    fn derive<const E: usize>(&self, transform: Transform, extents: [u64; E]) -> View<'a, T, E> {
        let parent: Rc<dyn Backing<T> + 'a> = match self.transform {
            Transform::Identity => Rc::clone(&self.parent),
            _ => Rc::new(self.clone()),
        };
        let read_only = self.read_only || transform == Transform::ReadOnly;
        View {
            read_only,
            parent,
            transform,
            extents,
        }
    }

    pub(crate) fn read_only_view(&self) -> Self {
        self.derive(Transform::ReadOnly, self.extents)
    }

    /// Drops `axis` by fixing it at `index`, which must be inside the axis.
    pub(crate) fn fixed<const E: usize>(&self, axis: usize, index: u64) -> View<'a, T, E> {
        debug_assert!(E + 1 == D && index < self.extents[axis]);
        let mut extents = [0; E];
        extents[..axis].copy_from_slice(&self.extents[..axis]);
        extents[axis..].copy_from_slice(&self.extents[axis + 1..]);
        self.derive(Transform::Fix { axis, index }, extents)
    }

    pub(crate) fn diced(&self, axes: [usize; D]) -> Result<Self> {
        let padded_axes =
            permutation(axes).ok_or_else(|| MatrixError::invalid(format!("{axes:?} is not a permutation")))?;
        let extents = axes.map(|axis| self.extents[axis]);
        Ok(self.derive(Transform::Permute { axes: padded_axes }, extents))
    }

    pub(crate) fn flipped(&self, axis: usize) -> Self {
        debug_assert!(axis < D);
        let extent = self.extents[axis];
        if extent == 0 {
            return self.clone();
        }
        self.derive(Transform::Flip { axis, extent }, self.extents)
    }

    pub(crate) fn part(&self, offset: [u64; D], extents: [u64; D]) -> Result<Self> {
        for axis in 0..D {
            let fits = offset[axis]
                .checked_add(extents[axis])
                .is_some_and(|end| end <= self.extents[axis]);
            if !fits {
                return Err(MatrixError::invalid(format!(
                    "part at {offset:?} with extents {extents:?} exceeds {:?}",
                    self.extents
                )));
            }
        }
        Ok(self.derive(
            Transform::SubRange {
                offset: padded(offset, 0),
            },
            extents,
        ))
    }

    pub(crate) fn selected(&self, indices: [Option<&[u64]>; D]) -> Result<Self> {
        let mut lists: [Option<Rc<[u64]>>; MAX_RANK] = std::array::from_fn(|_| None);
        let mut extents = self.extents;
        for (axis, list) in indices.iter().enumerate() {
            let Some(list) = list else { continue };
            let extent = self.extents[axis];
            if let Some(&index) = list.iter().find(|&&index| index >= extent) {
                return Err(MatrixError::IndexOutOfRange { axis, index, extent });
            }
            extents[axis] = list.len() as u64;
            lists[axis] = Some(Rc::from(*list));
        }
        if lists.iter().all(Option::is_none) {
            return Ok(self.clone());
        }
        Ok(self.derive(Transform::IndexSelect { indices: lists }, extents))
    }

    /// Keeps the positions along `axis` listed in `accepted`, in that order.
    pub(crate) fn accepted(&self, axis: usize, accepted: Vec<u64>) -> Self {
        let mut extents = self.extents;
        extents[axis] = accepted.len() as u64;
        self.derive(
            Transform::PredicateSelect {
                axis,
                accepted: Rc::from(accepted),
            },
            extents,
        )
    }

    pub(crate) fn masked(&self, axis: usize, mask: &BitMatrix<1>) -> Result<Self> {
        if axis >= D {
            return Err(MatrixError::invalid(format!("axis {axis} of a rank {D} view")));
        }
        if mask.size() != self.extents[axis] {
            return Err(MatrixError::mismatch(&[self.extents[axis]], &[mask.size()]));
        }
        Ok(self.accepted(axis, mask.support().collect()))
    }

    pub(crate) fn strided(&self, strides: [u64; D]) -> Result<Self> {
        if strides.contains(&0) {
            return Err(MatrixError::invalid(format!("strides {strides:?} must be positive")));
        }
        let mut extents = self.extents;
        for (extent, stride) in extents.iter_mut().zip(strides) {
            *extent = extent.div_ceil(stride);
        }
        Ok(self.derive(
            Transform::Stride {
                strides: padded(strides, 1),
            },
            extents,
        ))
    }
}

impl<'a, T: Copy + 'a> View<'a, T, 2> {
    pub(crate) fn transposed(&self) -> Self {
        self.derive(
            Transform::Permute { axes: [1, 0, 2] },
            [self.extents[1], self.extents[0]],
        )
    }
}

impl<'a, T: Copy + 'a, const D: usize> TypedMatrix<T, D> for View<'a, T, D> {
    fn extents(&self) -> [u64; D] {
        self.extents
    }

    #[inline]
    fn get_quick(&self, coordinates: [u64; D]) -> T {
        debug_assert!(check_coordinates(&coordinates, &self.extents).is_ok());
        self.read_cell(&coordinates)
    }

    #[inline]
    fn set_quick(&self, coordinates: [u64; D], value: T) -> Result<()> {
        debug_assert!(check_coordinates(&coordinates, &self.extents).is_ok());
        self.write_cell(&coordinates, value)
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl<'a, T: Copy + 'a, const D: usize> Backing<T> for View<'a, T, D> {
    fn axis_extents(&self) -> &[u64] {
        &self.extents
    }

    #[inline]
    fn read_cell(&self, coordinates: &[u64]) -> T {
        let mut parent = [0; MAX_RANK];
        let rank = self.transform.map(coordinates, &mut parent);
        self.parent.read_cell(&parent[..rank])
    }

    #[inline]
    fn write_cell(&self, coordinates: &[u64], value: T) -> Result<()> {
        if self.read_only {
            return Err(MatrixError::UnsupportedOperation("mutation of a read-only view"));
        }
        let mut parent = [0; MAX_RANK];
        let rank = self.transform.map(coordinates, &mut parent);
        self.parent.write_cell(&parent[..rank], value)
    }

    fn rejects_writes(&self) -> bool {
        self.read_only
    }
}

impl<T, const D: usize> Clone for View<'_, T, D> {
    fn clone(&self) -> Self {
        Self {
            parent: Rc::clone(&self.parent),
            transform: self.transform.clone(),
            extents: self.extents,
            read_only: self.read_only,
        }
    }
}

impl<'a, 'b, T: Copy + PartialEq + 'a + 'b, const D: usize> PartialEq<View<'b, T, D>> for View<'a, T, D> {
    fn eq(&self, other: &View<'b, T, D>) -> bool {
        self.content_eq(other)
    }
}

impl<'a, T: Copy + PartialEq + 'a, const D: usize> PartialEq<DenseMatrix<T, D>> for View<'a, T, D> {
    fn eq(&self, other: &DenseMatrix<T, D>) -> bool {
        self.content_eq(other)
    }
}

impl<'a, T: Copy + std::fmt::Debug + 'a, const D: usize> std::fmt::Debug for View<'a, T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "View(shape={:?},read_only={},value={:?})",
            self.extents,
            self.read_only,
            self.to_vec()
        )
    }
}
