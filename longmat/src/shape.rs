use crate::error::{MatrixError, Result};
use derive_more::{Deref, Into};

/// Highest dimensionality supported by matrices and views.
pub const MAX_RANK: usize = 3;

/// Validated extents of a `D`-dimensional matrix, addressed in row-major order.
///
/// The product of the extents is known to be below the bound the shape was checked
/// against, so [`Shape::size`] and [`Shape::linear_index`] never overflow.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deref, Into)]
pub struct Shape<const D: usize>([u64; D]);

impl<const D: usize> Shape<D> {
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `D` is not in `1..=MAX_RANK` or the product of
    /// `extents` is not strictly below `limit`.
    pub fn new(extents: [u64; D], limit: u64) -> Result<Self> {
        if D == 0 || D > MAX_RANK {
            return Err(MatrixError::invalid(format!("rank {D} outside [1, {MAX_RANK}]")));
        }
        let size = extents
            .iter()
            .try_fold(1u64, |product, &extent| product.checked_mul(extent))
            .filter(|&size| size < limit);
        if size.is_none() {
            return Err(MatrixError::invalid(format!(
                "extents {extents:?} hold at least {limit} cells"
            )));
        }
        Ok(Self(extents))
    }

    #[must_use]
    pub fn extents(&self) -> [u64; D] {
        self.0
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.0.iter().product()
    }

    #[must_use]
    pub fn contains(&self, coordinates: &[u64; D]) -> bool {
        coordinates.iter().zip(self.0.iter()).all(|(index, extent)| index < extent)
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] naming the first axis whose coordinate is outside
    /// its extent.
    pub fn check(&self, coordinates: &[u64; D]) -> Result<()> {
        check_coordinates(coordinates, &self.0)
    }

    #[inline]
    #[must_use]
    pub fn linear_index(&self, coordinates: &[u64; D]) -> u64 {
        linear_index(coordinates, &self.0)
    }

    /// Inverse of [`Shape::linear_index`].
    #[must_use]
    pub fn coordinates_of(&self, mut index: u64) -> [u64; D] {
        let mut coordinates = [0u64; D];
        for axis in (0..D).rev() {
            let extent = self.0[axis];
            coordinates[axis] = index % extent;
            index /= extent;
        }
        coordinates
    }
}

/// Row-major linear index of `coordinates` within `extents`.
#[inline]
#[must_use]
pub fn linear_index(coordinates: &[u64], extents: &[u64]) -> u64 {
    debug_assert_eq!(coordinates.len(), extents.len());
    coordinates
        .iter()
        .zip(extents)
        .fold(0u64, |index, (coordinate, extent)| index * extent + coordinate)
}

/// # Errors
///
/// [`MatrixError::IndexOutOfRange`] for the first out-of-range axis.
pub fn check_coordinates(coordinates: &[u64], extents: &[u64]) -> Result<()> {
    for (axis, (&index, &extent)) in coordinates.iter().zip(extents).enumerate() {
        if index >= extent {
            return Err(MatrixError::IndexOutOfRange { axis, index, extent });
        }
    }
    Ok(())
}

/// Anything that names one cell of a `D`-dimensional matrix.
///
/// Implemented for `u64` (1D), `(u64, u64)` (2D), `(u64, u64, u64)` (3D), and `[u64; D]`.
pub trait Coordinates<const D: usize>: Copy {
    fn into_array(self) -> [u64; D];
}

impl<const D: usize> Coordinates<D> for [u64; D] {
    #[inline]
    fn into_array(self) -> [u64; D] {
        self
    }
}

impl Coordinates<1> for u64 {
    #[inline]
    fn into_array(self) -> [u64; 1] {
        [self]
    }
}

impl Coordinates<2> for (u64, u64) {
    #[inline]
    fn into_array(self) -> [u64; 2] {
        [self.0, self.1]
    }
}

impl Coordinates<3> for (u64, u64, u64) {
    #[inline]
    fn into_array(self) -> [u64; 3] {
        [self.0, self.1, self.2]
    }
}

/// Every coordinate of `extents` in row-major order (last axis fastest).
pub fn row_major<const D: usize>(extents: [u64; D]) -> RowMajor<D> {
    let next = (D > 0 && extents.iter().all(|&extent| extent > 0)).then_some([0u64; D]);
    RowMajor { extents, next }
}

/// Iterator returned by [`row_major`].
#[derive(Clone, Debug)]
pub struct RowMajor<const D: usize> {
    extents: [u64; D],
    next: Option<[u64; D]>,
}

impl<const D: usize> Iterator for RowMajor<D> {
    type Item = [u64; D];

    fn next(&mut self) -> Option<[u64; D]> {
        let current = self.next?;
        let mut following = current;
        self.next = None;
        for axis in (0..D).rev() {
            following[axis] += 1;
            if following[axis] < self.extents[axis] {
                self.next = Some(following);
                break;
            }
            following[axis] = 0;
        }
        Some(current)
    }
}
