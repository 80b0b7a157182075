use crate::bit::bitblock::{BitBlock, WORD_BIT_LEN, Word};
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;
use std::iter::zip;

/// See also [`BitwiseMut`], [`BitwisePair`], and [`BitwisePairMut`].
pub trait Bitwise {
    fn index(&self, index: usize) -> bool;
    fn support(&self) -> impl SortedIterator<Item = usize>;
    #[inline]
    fn min_support(&self) -> Option<usize> {
        self.support().next()
    }
    #[inline]
    fn weight(&self) -> usize {
        self.support().count()
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.weight() == 0
    }
}

/// See also [`Bitwise`], [`BitwisePair`], and [`BitwisePairMut`].
pub trait BitwiseMut: Bitwise {
    fn assign_index(&mut self, index: usize, to: bool);
    fn negate_index(&mut self, index: usize);
}

/// See also [`Bitwise`], [`BitwiseMut`], and [`BitwisePairMut`].
pub trait BitwisePair<Other: ?Sized = Self> {
    fn and_weight(&self, other: &Other) -> usize;
    #[inline]
    fn intersects(&self, other: &Other) -> bool {
        self.and_weight(other) > 0
    }
}

/// Pairwise in-place operations. Both sides cover the same bit positions; slices combine
/// their common prefix.
///
/// See also [`Bitwise`], [`BitwiseMut`], and [`BitwisePair`].
pub trait BitwisePairMut<Other: ?Sized = Self>: BitwiseMut + BitwisePair<Other> {
    fn bitand_assign(&mut self, other: &Other);
    fn bitor_assign(&mut self, other: &Other);
    fn bitxor_assign(&mut self, other: &Other);
    fn bitandnot_assign(&mut self, other: &Other);
}

pub trait BitLength {
    fn bit_len(&self) -> usize;
    const BLOCK_BIT_LEN: usize;
}

/// Positions of the set bits of one word, lowest first.
#[derive(Clone, Debug)]
pub(crate) struct WordSupport {
    word: Word,
}

impl WordSupport {
    #[must_use]
    pub(crate) fn new(word: Word) -> Self {
        Self { word }
    }
}

impl Iterator for WordSupport {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.word.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WordSupport {}

impl BitLength for Word {
    fn bit_len(&self) -> usize {
        Self::BLOCK_BIT_LEN
    }
    const BLOCK_BIT_LEN: usize = WORD_BIT_LEN;
}

impl Bitwise for Word {
    #[inline]
    fn index(&self, index: usize) -> bool {
        assert!(index < WORD_BIT_LEN);
        (*self >> index) & 1 == 1
    }

    #[inline]
    fn support(&self) -> impl SortedIterator<Item = usize> {
        WordSupport::new(*self).assume_sorted_by_item()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.count_ones() as usize
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl BitwiseMut for Word {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        assert!(index < WORD_BIT_LEN);
        if to {
            *self |= 1 << index;
        } else {
            *self &= !(1 << index);
        }
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        assert!(index < WORD_BIT_LEN);
        *self ^= 1 << index;
    }
}

impl BitwisePair for Word {
    #[inline]
    fn and_weight(&self, other: &Self) -> usize {
        (self & other).count_ones() as usize
    }

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        self & other != 0
    }
}

impl BitwisePairMut for Word {
    #[inline]
    fn bitand_assign(&mut self, other: &Self) {
        *self &= other;
    }
    #[inline]
    fn bitor_assign(&mut self, other: &Self) {
        *self |= other;
    }
    #[inline]
    fn bitxor_assign(&mut self, other: &Self) {
        *self ^= other;
    }
    #[inline]
    fn bitandnot_assign(&mut self, other: &Self) {
        *self &= !other;
    }
}

// Slices of Bitblocks

impl BitLength for [BitBlock] {
    fn bit_len(&self) -> usize {
        self.len() * BitBlock::BLOCK_BIT_LEN
    }
    const BLOCK_BIT_LEN: usize = BitBlock::BLOCK_BIT_LEN;
}

impl Bitwise for [BitBlock] {
    #[inline]
    fn index(&self, index: usize) -> bool {
        let (block_index, bit_index) = block_and_bit_index::<BitBlock>(index);
        self.get(block_index).is_some_and(|block| block.index(bit_index))
    }

    fn support(&self) -> impl SortedIterator<Item = usize> {
        self.iter()
            .enumerate()
            .flat_map(|(block_index, block)| {
                block
                    .support()
                    .map(move |bit_index| block_index * BitBlock::BLOCK_BIT_LEN + bit_index)
            })
            .assume_sorted_by_item()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.iter().map(Bitwise::weight).sum()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.iter().all(Bitwise::is_zero)
    }
}

impl BitwiseMut for [BitBlock] {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        let (block_index, bit_index) = block_and_bit_index::<BitBlock>(index);
        self[block_index].assign_index(bit_index, to);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        let (block_index, bit_index) = block_and_bit_index::<BitBlock>(index);
        self[block_index].negate_index(bit_index);
    }
}

impl BitwisePair for [BitBlock] {
    #[inline]
    fn and_weight(&self, other: &Self) -> usize {
        zip(self.iter(), other.iter()).map(|(left, right)| left.and_weight(right)).sum()
    }

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        zip(self.iter(), other.iter()).any(|(left, right)| left.intersects(right))
    }
}

impl BitwisePairMut for [BitBlock] {
    #[inline]
    fn bitand_assign(&mut self, other: &Self) {
        zip(self.iter_mut(), other.iter()).for_each(|(left, right)| left.bitand_assign(right));
    }
    #[inline]
    fn bitor_assign(&mut self, other: &Self) {
        zip(self.iter_mut(), other.iter()).for_each(|(left, right)| left.bitor_assign(right));
    }
    #[inline]
    fn bitxor_assign(&mut self, other: &Self) {
        zip(self.iter_mut(), other.iter()).for_each(|(left, right)| left.bitxor_assign(right));
    }
    #[inline]
    fn bitandnot_assign(&mut self, other: &Self) {
        zip(self.iter_mut(), other.iter()).for_each(|(left, right)| left.bitandnot_assign(right));
    }
}

// Common helper for calculating block and bit indices
#[inline]
#[must_use]
pub fn block_and_bit_index<T: BitLength + ?Sized>(index: usize) -> (usize, usize) {
    let block_index = index / T::BLOCK_BIT_LEN;
    let bit_index = index % T::BLOCK_BIT_LEN;
    (block_index, bit_index)
}
