//! Mapping of the 64-bit logical index space onto fixed-capacity blocks.

use crate::error::{MatrixError, Result};

/// Largest length a 32-bit indexable array can address, the default capacity of one block.
pub const DEFAULT_BLOCK_CAPACITY: u64 = i32::MAX as u64;

/// Exclusive upper bound on the number of cells of a matrix built with the default capacity.
pub const MAX_SIZE: u64 = max_size(DEFAULT_BLOCK_CAPACITY);

/// Exclusive upper bound on the number of cells addressable with blocks of `capacity` bits.
/// Only meaningful for a capacity [`Partitioner::new`] accepts.
#[must_use]
pub(crate) const fn max_size(capacity: u64) -> u64 {
    debug_assert!(capacity >= 2 && capacity <= DEFAULT_BLOCK_CAPACITY);
    capacity * capacity - 1
}

/// Number of blocks of `capacity` bits needed to hold `size` bits.
#[must_use]
pub const fn block_count(size: u64, capacity: u64) -> u64 {
    size.div_ceil(capacity)
}

/// Splits `[0, size)` into consecutive blocks of `capacity` indices; the last block may be
/// shorter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Partitioner {
    size: u64,
    capacity: u64,
}

impl Partitioner {
    /// # Errors
    ///
    /// [`MatrixError::InvalidArgument`] unless `2 <= capacity <= DEFAULT_BLOCK_CAPACITY`
    /// and `size < max_size(capacity)`.
    pub fn new(size: u64, capacity: u64) -> Result<Self> {
        if !(2..=DEFAULT_BLOCK_CAPACITY).contains(&capacity) {
            return Err(MatrixError::invalid(format!(
                "block capacity {capacity} outside [2, {DEFAULT_BLOCK_CAPACITY}]"
            )));
        }
        let limit = max_size(capacity);
        if size >= limit {
            return Err(MatrixError::invalid(format!(
                "size {size} must be below {limit} for block capacity {capacity}"
            )));
        }
        Ok(Self { size, capacity })
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub fn max_size(&self) -> u64 {
        max_size(self.capacity)
    }

    #[must_use]
    pub fn block_count(&self) -> u64 {
        block_count(self.size, self.capacity)
    }

    /// Number of valid indices inside `block`.
    #[must_use]
    pub fn block_len(&self, block: u64) -> u64 {
        let start = block * self.capacity;
        self.size.saturating_sub(start).min(self.capacity)
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `index >= size`.
    pub fn locate(&self, index: u64) -> Result<(u64, u64)> {
        self.check(index)?;
        Ok(self.locate_unchecked(index))
    }

    #[inline]
    #[must_use]
    pub fn locate_unchecked(&self, index: u64) -> (u64, u64) {
        (index / self.capacity, index % self.capacity)
    }

    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `index >= size`.
    #[inline]
    pub fn check(&self, index: u64) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfRange {
                axis: 0,
                index,
                extent: self.size,
            })
        }
    }

    /// Validates `low <= high <= size`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] naming the offending bound.
    pub fn check_range(&self, low: u64, high: u64) -> Result<()> {
        if high > self.size {
            return Err(MatrixError::IndexOutOfRange {
                axis: 0,
                index: high,
                extent: self.size,
            });
        }
        if low > high {
            return Err(MatrixError::IndexOutOfRange {
                axis: 0,
                index: low,
                extent: high,
            });
        }
        Ok(())
    }

    /// Blocks touched by the non-empty range `[low, high)`, each with its local sub-range.
    pub fn split_range(&self, low: u64, high: u64) -> impl Iterator<Item = (u64, u64, u64)> + use<> {
        let capacity = self.capacity;
        let (first, last) = if low < high {
            (low / capacity, (high - 1) / capacity + 1)
        } else {
            (0, 0)
        };
        (first..last).map(move |block| {
            let start = block * capacity;
            let local_low = low.max(start) - start;
            let local_high = high.min(start + capacity) - start;
            (block, local_low, local_high)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_index_lands_in_final_block() {
        let partitioner = Partitioner::new(1000, 64).unwrap();
        assert_eq!(partitioner.block_count(), 16);
        assert_eq!(partitioner.locate(999).unwrap(), (15, 39));
        assert_eq!(partitioner.block_len(15), 40);
        assert_eq!(partitioner.block_len(16), 0);
    }

    #[test]
    fn split_range_covers_every_block_once() {
        let partitioner = Partitioner::new(1000, 64).unwrap();
        let pieces: Vec<_> = partitioner.split_range(60, 200).collect();
        assert_eq!(pieces, vec![(0, 60, 64), (1, 0, 64), (2, 0, 64), (3, 0, 8)]);
        assert_eq!(partitioner.split_range(5, 5).count(), 0);
    }

    #[test]
    fn capacity_bounds_keep_max_size_in_range() {
        assert_eq!(Partitioner::new(0, 2).unwrap().max_size(), 3);
        assert_eq!(Partitioner::new(0, DEFAULT_BLOCK_CAPACITY).unwrap().max_size(), MAX_SIZE);
        for capacity in [0, 1, DEFAULT_BLOCK_CAPACITY + 1, 1 << 32, u64::MAX] {
            assert!(matches!(
                Partitioner::new(0, capacity),
                Err(MatrixError::InvalidArgument(_))
            ));
        }
    }
}
