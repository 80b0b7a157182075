use crate::bit::{
    BIT_BLOCK_WORD_COUNT, BitBlock, BitLength, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, WORD_BIT_LEN, Word,
    range_mask,
};
use sorted_iter::SortedIterator;
use std::ops::Range;

/// One partition of a long bit vector.
///
/// The logical capacity is owned by the [`Partitioner`](crate::partition::Partitioner);
/// a block only stores the [`BitBlock`]s up to its highest set bit. Bits past the stored
/// words read as `false`, and the stored words never end in an all-zero [`BitBlock`], so
/// the derived equality and hash compare content.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    blocks: Vec<BitBlock>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits currently backed by storage.
    #[must_use]
    pub fn stored_bit_len(&self) -> usize {
        self.blocks.bit_len()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, offset: usize) -> bool {
        self.blocks.index(offset)
    }

    #[inline]
    pub fn set(&mut self, offset: usize, to: bool) {
        if to {
            self.reserve_bits(offset + 1);
            self.blocks.assign_index(offset, true);
        } else if offset < self.stored_bit_len() {
            self.blocks.assign_index(offset, false);
            self.trim();
        }
    }

    #[inline]
    pub fn flip(&mut self, offset: usize) {
        self.reserve_bits(offset + 1);
        self.blocks.negate_index(offset);
        self.trim();
    }

    /// Assigns `to` to every offset in `range` one word at a time.
    pub fn set_range(&mut self, range: Range<usize>, to: bool) {
        if range.is_empty() {
            return;
        }
        if to {
            self.reserve_bits(range.end);
        }
        let stored_words = self.blocks.len() * BIT_BLOCK_WORD_COUNT;
        for (word_index, mask) in word_masks(range) {
            if to {
                self.word_mut(word_index).bitor_assign(&mask);
            } else if word_index < stored_words {
                self.word_mut(word_index).bitandnot_assign(&mask);
            } else {
                break;
            }
        }
        self.trim();
    }

    pub fn flip_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.reserve_bits(range.end);
        for (word_index, mask) in word_masks(range) {
            self.word_mut(word_index).bitxor_assign(&mask);
        }
        self.trim();
    }

    pub fn and(&mut self, other: &Block) {
        self.blocks.truncate(other.blocks.len());
        self.blocks.bitand_assign(other.blocks.as_slice());
        self.trim();
    }

    pub fn or(&mut self, other: &Block) {
        if self.blocks.len() < other.blocks.len() {
            self.blocks.resize(other.blocks.len(), BitBlock::default());
        }
        self.blocks.bitor_assign(other.blocks.as_slice());
    }

    pub fn xor(&mut self, other: &Block) {
        if self.blocks.len() < other.blocks.len() {
            self.blocks.resize(other.blocks.len(), BitBlock::default());
        }
        self.blocks.bitxor_assign(other.blocks.as_slice());
        self.trim();
    }

    pub fn and_not(&mut self, other: &Block) {
        self.blocks.bitandnot_assign(other.blocks.as_slice());
        self.trim();
    }

    #[must_use]
    pub fn intersects(&self, other: &Block) -> bool {
        self.blocks.intersects(other.blocks.as_slice())
    }

    #[must_use]
    pub fn cardinality(&self) -> u64 {
        self.blocks.weight() as u64
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Offsets of the set bits, in increasing order.
    pub fn support(&self) -> impl SortedIterator<Item = usize> + '_ {
        self.blocks.support()
    }

    fn reserve_bits(&mut self, bit_count: usize) {
        let needed = bit_count.div_ceil(BitBlock::BLOCK_BIT_LEN);
        if self.blocks.len() < needed {
            self.blocks.resize(needed, BitBlock::default());
        }
    }

    fn word_mut(&mut self, word_index: usize) -> &mut Word {
        &mut self.blocks[word_index / BIT_BLOCK_WORD_COUNT][word_index % BIT_BLOCK_WORD_COUNT]
    }

    fn trim(&mut self) {
        while self.blocks.last().is_some_and(Bitwise::is_zero) {
            self.blocks.pop();
        }
    }
}

/// Word index and in-word mask for each word that `range` touches.
fn word_masks(range: Range<usize>) -> impl Iterator<Item = (usize, Word)> {
    let first = range.start / WORD_BIT_LEN;
    let last = (range.end - 1) / WORD_BIT_LEN;
    (first..=last).map(move |word_index| {
        let word_start = word_index * WORD_BIT_LEN;
        let low = range.start.max(word_start) - word_start;
        let high = range.end.min(word_start + WORD_BIT_LEN) - word_start;
        (word_index, range_mask(low, high))
    })
}
