use crate::error::{MatrixError, Result};
use crate::partition::{DEFAULT_BLOCK_CAPACITY, Partitioner};
use crate::vec::Block;
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A bit vector addressed by `u64` indices, partitioned into [`Block`]s.
///
/// The block table is materialised up to the last block holding a set bit; blocks past it
/// are logically present and all `false`. A vector of `MAX_SIZE - 1` bits therefore costs
/// nothing until bits are set.
///
/// ```
/// use longmat::vec::LongBitVec;
///
/// let mut bits = LongBitVec::with_block_capacity(1000, 64).unwrap();
/// bits.set_range(60..70, true).unwrap();
/// assert_eq!(bits.cardinality(), 10);
/// assert_eq!(bits.block_count(), 16);
/// assert!(bits.get(63).unwrap() && bits.get(64).unwrap());
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct LongBitVec {
    partitioner: Partitioner,
    blocks: Vec<Block>,
}

impl LongBitVec {
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] if `len >= MAX_SIZE`.
    pub fn new(len: u64) -> Result<Self> {
        Self::with_block_capacity(len, DEFAULT_BLOCK_CAPACITY)
    }

    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] for a capacity outside `[2, DEFAULT_BLOCK_CAPACITY]`
    /// or `len >= max_size(capacity)`.
    pub fn with_block_capacity(len: u64, capacity: u64) -> Result<Self> {
        Ok(Self {
            partitioner: Partitioner::new(len, capacity)?,
            blocks: Vec::new(),
        })
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.partitioner.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    /// Logical number of blocks, `ceil(len / capacity)`.
    #[must_use]
    pub fn block_count(&self) -> u64 {
        self.partitioner.block_count()
    }

    #[must_use]
    pub fn block_capacity(&self) -> u64 {
        self.partitioner.capacity()
    }

    /// Blocks currently backed by storage.
    #[must_use]
    pub fn materialized_block_count(&self) -> usize {
        self.blocks.len()
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: u64) -> Result<bool> {
        self.partitioner.check(index)?;
        Ok(self.get_quick(index))
    }

    #[inline]
    #[must_use]
    pub fn get_quick(&self, index: u64) -> bool {
        debug_assert!(index < self.len());
        let (block, offset) = self.partitioner.locate_unchecked(index);
        self.blocks
            .get(block as usize)
            .is_some_and(|block| block.get(offset as usize))
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: u64, to: bool) -> Result<()> {
        self.partitioner.check(index)?;
        self.set_quick(index, to);
        Ok(())
    }

    #[inline]
    pub fn set_quick(&mut self, index: u64, to: bool) {
        debug_assert!(index < self.len());
        let (block, offset) = self.partitioner.locate_unchecked(index);
        if to {
            self.block_mut(block).set(offset as usize, true);
        } else if let Some(stored) = self.blocks.get_mut(block as usize) {
            stored.set(offset as usize, false);
            self.trim();
        }
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `index >= len`.
    pub fn flip(&mut self, index: u64) -> Result<()> {
        self.partitioner.check(index)?;
        let (block, offset) = self.partitioner.locate_unchecked(index);
        self.block_mut(block).flip(offset as usize);
        self.trim();
        Ok(())
    }

    /// Assigns `to` to every index in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] unless `range.start <= range.end <= len`; nothing is
    /// modified in that case.
    pub fn set_range(&mut self, range: Range<u64>, to: bool) -> Result<()> {
        self.partitioner.check_range(range.start, range.end)?;
        for (block, low, high) in self.partitioner.split_range(range.start, range.end) {
            let local = low as usize..high as usize;
            if to {
                self.block_mut(block).set_range(local, true);
            } else if let Some(stored) = self.blocks.get_mut(block as usize) {
                stored.set_range(local, false);
            } else {
                break;
            }
        }
        self.trim();
        Ok(())
    }

    /// Negates every index in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] unless `range.start <= range.end <= len`; nothing is
    /// modified in that case.
    pub fn flip_range(&mut self, range: Range<u64>) -> Result<()> {
        self.partitioner.check_range(range.start, range.end)?;
        for (block, low, high) in self.partitioner.split_range(range.start, range.end) {
            self.block_mut(block).flip_range(low as usize..high as usize);
        }
        self.trim();
        Ok(())
    }

    /// Sets every bit to `to`.
    pub fn assign(&mut self, to: bool) {
        if to {
            let len = self.len();
            for (block, low, high) in self.partitioner.split_range(0, len) {
                self.block_mut(block).set_range(low as usize..high as usize, true);
            }
        } else {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Complements every bit in `[0, len)`.
    pub fn not(&mut self) {
        let len = self.len();
        for (block, low, high) in self.partitioner.split_range(0, len) {
            self.block_mut(block).flip_range(low as usize..high as usize);
        }
        self.trim();
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn and(&mut self, other: &LongBitVec) -> Result<()> {
        let other = self.aligned(other)?;
        self.blocks.truncate(other.blocks.len());
        for (left, right) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            left.and(right);
        }
        self.trim();
        Ok(())
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn or(&mut self, other: &LongBitVec) -> Result<()> {
        let other = self.aligned(other)?;
        self.reserve_blocks(other.blocks.len());
        for (left, right) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            left.or(right);
        }
        self.trim();
        Ok(())
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn xor(&mut self, other: &LongBitVec) -> Result<()> {
        let other = self.aligned(other)?;
        self.reserve_blocks(other.blocks.len());
        for (left, right) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            left.xor(right);
        }
        self.trim();
        Ok(())
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn and_not(&mut self, other: &LongBitVec) -> Result<()> {
        let other = self.aligned(other)?;
        for (left, right) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            left.and_not(right);
        }
        self.trim();
        Ok(())
    }

    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn intersects(&self, other: &LongBitVec) -> Result<bool> {
        let other = self.aligned(other)?;
        Ok(self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .any(|(left, right)| left.intersects(right)))
    }

    #[must_use]
    pub fn cardinality(&self) -> u64 {
        self.blocks.iter().map(Block::cardinality).sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Indices of the set bits, in increasing order.
    pub fn support(&self) -> impl SortedIterator<Item = u64> + '_ {
        let capacity = self.partitioner.capacity();
        self.blocks
            .iter()
            .enumerate()
            .flat_map(move |(block_index, block)| {
                let start = block_index as u64 * capacity;
                block.support().map(move |offset| start + offset as u64)
            })
            .assume_sorted_by_item()
    }

    /// Indices of the clear bits, in increasing order.
    pub fn zeros(&self) -> impl SortedIterator<Item = u64> + '_ {
        (0..self.len()).assume_sorted_by_item().difference(self.support())
    }

    fn block_mut(&mut self, block: u64) -> &mut Block {
        let block = block as usize;
        self.reserve_blocks(block + 1);
        &mut self.blocks[block]
    }

    fn reserve_blocks(&mut self, count: usize) {
        if self.blocks.len() < count {
            self.blocks.resize_with(count, Block::new);
        }
    }

    fn trim(&mut self) {
        while self.blocks.last().is_some_and(Block::is_zero) {
            self.blocks.pop();
        }
    }

    /// `other` with this vector's block capacity, copied only when the capacities differ.
    fn aligned<'other>(&self, other: &'other LongBitVec) -> Result<std::borrow::Cow<'other, LongBitVec>> {
        if self.len() != other.len() {
            return Err(MatrixError::mismatch(&[self.len()], &[other.len()]));
        }
        if self.block_capacity() == other.block_capacity() {
            return Ok(std::borrow::Cow::Borrowed(other));
        }
        let mut rechunked = LongBitVec {
            partitioner: self.partitioner,
            blocks: Vec::new(),
        };
        for index in other.support() {
            rechunked.set_quick(index, true);
        }
        Ok(std::borrow::Cow::Owned(rechunked))
    }
}

impl PartialEq for LongBitVec {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.block_capacity() == other.block_capacity() {
            return self.blocks == other.blocks;
        }
        self.support().eq(other.support())
    }
}

impl Eq for LongBitVec {}

impl Hash for LongBitVec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for index in self.support() {
            index.hash(state);
        }
    }
}
