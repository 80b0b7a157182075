use crate::bit::bitwise::{BitLength, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, block_and_bit_index};
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;
use std::iter::zip;
use std::ops::{Deref, DerefMut};

pub const BIT_BLOCK_WORD_COUNT: usize = 8usize;
pub type Word = u64;
pub const WORD_BIT_LEN: usize = Word::BITS as usize;
pub type BitBlockInnerArray = [Word; BIT_BLOCK_WORD_COUNT];

/// Eight words kept on one cache line, the physical unit every [`Block`](crate::vec::Block)
/// is built from.
///
/// The fixed-size array lets LLVM turn the pairwise operations below into vector
/// instructions.
#[repr(C, align(64))]
#[derive(Eq, Clone, Debug, Hash, PartialEq, Default)]
pub struct BitBlock {
    pub words: BitBlockInnerArray,
}

impl Deref for BitBlock {
    type Target = BitBlockInnerArray;
    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl DerefMut for BitBlock {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.words
    }
}

impl From<BitBlockInnerArray> for BitBlock {
    fn from(words: BitBlockInnerArray) -> Self {
        Self { words }
    }
}

impl BitLength for BitBlock {
    fn bit_len(&self) -> usize {
        Self::BLOCK_BIT_LEN
    }
    const BLOCK_BIT_LEN: usize = BIT_BLOCK_WORD_COUNT * WORD_BIT_LEN;
}

impl BitBlock {
    /// [`BitBlock`] with all bits set to one.
    #[must_use]
    pub fn ones() -> Self {
        [Word::MAX; BIT_BLOCK_WORD_COUNT].into()
    }
}

impl FromIterator<bool> for BitBlock {
    fn from_iter<Iterator: IntoIterator<Item = bool>>(iterator: Iterator) -> Self {
        let mut res = BitBlock::default();
        for (index, bit) in iterator.into_iter().take(Self::BLOCK_BIT_LEN).enumerate() {
            res.assign_index(index, bit);
        }
        res
    }
}

impl Bitwise for BitBlock {
    #[inline]
    fn index(&self, index: usize) -> bool {
        let (word_index, bit_index) = word_and_bit_index(index);
        self.words[word_index].index(bit_index)
    }

    fn support(&self) -> impl SortedIterator<Item = usize> {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, word)| word.support().map(move |bit| word_index * WORD_BIT_LEN + bit))
            .assume_sorted_by_item()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.words.iter().map(Bitwise::weight).sum()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.words.iter().all(Bitwise::is_zero)
    }
}

impl BitwiseMut for BitBlock {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        let (word_index, bit_index) = word_and_bit_index(index);
        self.words[word_index].assign_index(bit_index, to);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        let (word_index, bit_index) = word_and_bit_index(index);
        self.words[word_index].negate_index(bit_index);
    }
}

impl BitwisePair for BitBlock {
    #[inline]
    fn and_weight(&self, other: &Self) -> usize {
        zip(self.words.iter(), other.words.iter())
            .map(|(left, right)| left.and_weight(right))
            .sum()
    }

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        zip(self.words.iter(), other.words.iter()).any(|(left, right)| left.intersects(right))
    }
}

impl BitwisePairMut for BitBlock {
    #[inline]
    fn bitand_assign(&mut self, other: &Self) {
        zip(self.words.iter_mut(), other.words.iter()).for_each(|(left, right)| left.bitand_assign(right));
    }

    #[inline]
    fn bitor_assign(&mut self, other: &Self) {
        zip(self.words.iter_mut(), other.words.iter()).for_each(|(left, right)| left.bitor_assign(right));
    }

    #[inline]
    fn bitxor_assign(&mut self, other: &Self) {
        zip(self.words.iter_mut(), other.words.iter()).for_each(|(left, right)| left.bitxor_assign(right));
    }

    #[inline]
    fn bitandnot_assign(&mut self, other: &Self) {
        zip(self.words.iter_mut(), other.words.iter()).for_each(|(left, right)| left.bitandnot_assign(right));
    }
}

/// # Panics
///
/// Will panic if `index` is outside a [`BitBlock`].
#[inline]
fn word_and_bit_index(index: usize) -> (usize, usize) {
    assert!(
        index < BitBlock::BLOCK_BIT_LEN,
        "bit {index} outside a {}-bit block",
        BitBlock::BLOCK_BIT_LEN
    );
    block_and_bit_index::<Word>(index)
}

/// Mask with bits `[low, high)` of a word set; `high` may be [`WORD_BIT_LEN`].
#[inline]
#[must_use]
pub fn range_mask(low: usize, high: usize) -> Word {
    debug_assert!(low <= high && high <= WORD_BIT_LEN);
    if low == high {
        return 0;
    }
    let upper = if high == WORD_BIT_LEN { Word::MAX } else { (1 << high) - 1 };
    upper & !((1 << low) - 1)
}
