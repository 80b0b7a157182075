use crate::error::{MatrixError, Result};
use crate::partition::{DEFAULT_BLOCK_CAPACITY, Partitioner, max_size};
use crate::shape::{Coordinates, Shape, linear_index};
use crate::vec::LongBitVec;
use crate::view::{Backing, View};
use rand::Rng;
use sorted_iter::SortedIterator;
use std::ops::{Index, Range};
use std::str::FromStr;

/// A fixed-extent boolean matrix of rank `D` addressed by 64-bit coordinates.
///
/// Cells are laid out row-major over one [`LongBitVec`]: for 2D the linear index is
/// `row * columns + column`, for 3D `slice * rows * columns + row * columns + column`.
/// Range operations work on that linear index space.
///
/// ```
/// use longmat::prelude::*;
///
/// let mut matrix = BitMatrix2D::new([3, 4]).unwrap();
/// matrix.set((1, 2), true).unwrap();
/// assert_eq!(matrix.cardinality(), 1);
///
/// let transposed = matrix.view_transpose();
/// assert_eq!(transposed.extents(), [4, 3]);
/// assert!(transposed.get((2, 1)).unwrap());
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix<const D: usize> {
    shape: Shape<D>,
    bits: LongBitVec,
}

pub type BitMatrix1D = BitMatrix<1>;
pub type BitMatrix2D = BitMatrix<2>;
pub type BitMatrix3D = BitMatrix<3>;

impl<const D: usize> BitMatrix<D> {
    /// All-`false` matrix with blocks of [`DEFAULT_BLOCK_CAPACITY`] bits.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `D` is not 1, 2 or 3, or the extents hold
    /// [`MAX_SIZE`](crate::partition::MAX_SIZE) cells or more.
    pub fn new(extents: [u64; D]) -> Result<Self> {
        Self::with_block_capacity(extents, DEFAULT_BLOCK_CAPACITY)
    }

    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] for a capacity outside `[2, DEFAULT_BLOCK_CAPACITY]`
    /// or extents holding `max_size(capacity)` cells or more.
    pub fn with_block_capacity(extents: [u64; D], capacity: u64) -> Result<Self> {
        Partitioner::new(0, capacity)?;
        let shape = Shape::new(extents, max_size(capacity))?;
        Ok(Self {
            shape,
            bits: LongBitVec::with_block_capacity(shape.size(), capacity)?,
        })
    }

    /// Each cell is `true` with probability `density`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] for bad extents or a density outside `[0, 1]`.
    pub fn random_with_rng<R: Rng>(extents: [u64; D], density: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(MatrixError::invalid(format!("density {density} outside [0, 1]")));
        }
        let mut matrix = Self::new(extents)?;
        for index in 0..matrix.size() {
            if rng.gen_bool(density) {
                matrix.bits.set_quick(index, true);
            }
        }
        Ok(matrix)
    }

    pub fn shape(&self) -> Shape<D> {
        self.shape
    }

    #[must_use]
    pub fn extents(&self) -> [u64; D] {
        self.shape.extents()
    }

    /// Number of cells, the product of the extents.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bits.len()
    }

    #[must_use]
    pub fn block_count(&self) -> u64 {
        self.bits.block_count()
    }

    #[must_use]
    pub fn block_capacity(&self) -> u64 {
        self.bits.block_capacity()
    }

    /// The cells in linear index order.
    #[must_use]
    pub fn as_bit_vec(&self) -> &LongBitVec {
        &self.bits
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a coordinate is outside its extent.
    pub fn get(&self, coordinates: impl Coordinates<D>) -> Result<bool> {
        let coordinates = coordinates.into_array();
        self.shape.check(&coordinates)?;
        Ok(self.get_quick(coordinates))
    }

    #[inline]
    #[must_use]
    pub fn get_quick(&self, coordinates: impl Coordinates<D>) -> bool {
        self.bits.get_quick(self.shape.linear_index(&coordinates.into_array()))
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a coordinate is outside its extent.
    pub fn set(&mut self, coordinates: impl Coordinates<D>, to: bool) -> Result<()> {
        let coordinates = coordinates.into_array();
        self.shape.check(&coordinates)?;
        self.set_quick(coordinates, to);
        Ok(())
    }

    #[inline]
    pub fn set_quick(&mut self, coordinates: impl Coordinates<D>, to: bool) {
        let index = self.shape.linear_index(&coordinates.into_array());
        self.bits.set_quick(index, to);
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a coordinate is outside its extent.
    pub fn flip(&mut self, coordinates: impl Coordinates<D>) -> Result<()> {
        let coordinates = coordinates.into_array();
        self.shape.check(&coordinates)?;
        self.bits.flip(self.shape.linear_index(&coordinates))
    }

    /// Assigns `to` to every linear index in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] unless `range.start <= range.end <= size`; the
    /// matrix is unchanged in that case.
    pub fn set_range(&mut self, range: Range<u64>, to: bool) -> Result<()> {
        self.bits.set_range(range, to)
    }

    /// Negates every linear index in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] unless `range.start <= range.end <= size`; the
    /// matrix is unchanged in that case.
    pub fn flip_range(&mut self, range: Range<u64>) -> Result<()> {
        self.bits.flip_range(range)
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    pub fn and(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.bits.and(&other.bits)
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    pub fn or(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.bits.or(&other.bits)
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    pub fn xor(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.bits.xor(&other.bits)
    }

    /// Clears every cell that is set in `other`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    pub fn and_not(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.bits.and_not(&other.bits)
    }

    /// Whether some cell is set in both matrices.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the extents differ.
    pub fn intersects(&self, other: &Self) -> Result<bool> {
        self.check_same_shape(other)?;
        self.bits.intersects(&other.bits)
    }

    /// Number of set cells.
    #[must_use]
    pub fn cardinality(&self) -> u64 {
        self.bits.cardinality()
    }

    /// Whether no cell is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Calls `visitor` with the coordinates of every cell equal to `value`, in row-major
    /// order.
    pub fn for_each(&self, value: bool, mut visitor: impl FnMut([u64; D])) {
        if value {
            self.bits
                .support()
                .for_each(|index| visitor(self.shape.coordinates_of(index)));
        } else {
            self.bits
                .zeros()
                .for_each(|index| visitor(self.shape.coordinates_of(index)));
        }
    }

    /// Linear indices of the set cells, in increasing order.
    pub fn support(&self) -> impl SortedIterator<Item = u64> + '_ {
        self.bits.support()
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn assign(&mut self, to: bool) {
        self.bits.assign(to);
    }

    /// Complements every cell.
    pub fn not(&mut self) {
        self.bits.not();
    }

    /// Read-only view over all cells.
    pub fn view(&self) -> View<'_, bool, D> {
        View::of(self)
    }

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape != other.shape {
            return Err(MatrixError::mismatch(&self.shape[..], &other.shape[..]));
        }
        Ok(())
    }
}

impl<const D: usize> Backing<bool> for BitMatrix<D> {
    fn axis_extents(&self) -> &[u64] {
        &self.shape[..]
    }

    #[inline]
    fn read_cell(&self, coordinates: &[u64]) -> bool {
        self.bits.get_quick(linear_index(coordinates, &self.shape[..]))
    }

    fn write_cell(&self, _coordinates: &[u64], _value: bool) -> Result<()> {
        Err(MatrixError::UnsupportedOperation("mutation of a bit matrix through a view"))
    }

    fn rejects_writes(&self) -> bool {
        true
    }
}

impl<const D: usize, C: Coordinates<D>> Index<C> for BitMatrix<D> {
    type Output = bool;

    /// # Panics
    ///
    /// If a coordinate is outside its extent.
    fn index(&self, coordinates: C) -> &bool {
        let coordinates = coordinates.into_array();
        assert!(
            self.shape.contains(&coordinates),
            "coordinates {coordinates:?} outside {:?}",
            self.extents()
        );
        if self.get_quick(coordinates) { &true } else { &false }
    }
}

impl<const D: usize> std::fmt::Debug for BitMatrix<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitMatrix(shape={:?},support={:?})",
            self.extents(),
            self.support().collect::<Vec<_>>()
        )
    }
}

impl std::fmt::Display for BitMatrix<2> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [rows, columns] = self.extents();
        if f.alternate() {
            write!(f, "[")?;
        }
        for row in 0..rows {
            for column in 0..columns {
                write!(f, "{}", u8::from(self.get_quick((row, column))))?;
            }
            if f.alternate() {
                write!(f, "|")?;
            } else {
                writeln!(f)?;
            }
        }
        if f.alternate() {
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl FromStr for BitMatrix<2> {
    type Err = MatrixError;

    /// Rows of `0`/`.` and `1` characters separated by `|`, `;` or newlines; spaces,
    /// commas and `-` are ignored, as are surrounding brackets.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::<Vec<bool>>::new();
        for row_string in s.split(['|', '[', ']', '(', ')', ';', '\n']) {
            let mut row = Vec::new();
            for char in row_string.chars() {
                match char {
                    '0' | '.' => row.push(false),
                    '1' => row.push(true),
                    ' ' | '-' | ',' | '\r' | '\t' => {}
                    _ => return Err(MatrixError::invalid(format!("unexpected character {char:?}"))),
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(ragged) = rows.iter().find(|row| row.len() != columns) {
            return Err(MatrixError::invalid(format!(
                "row of {} cells in a matrix of {columns} columns",
                ragged.len()
            )));
        }
        let mut matrix = Self::new([rows.len() as u64, columns as u64])?;
        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, &value) in row.iter().enumerate() {
                if value {
                    matrix.set_quick((row_index as u64, column_index as u64), true);
                }
            }
        }
        Ok(matrix)
    }
}
