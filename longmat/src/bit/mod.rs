pub mod bitblock;
pub mod bitwise;

pub use bitblock::{BIT_BLOCK_WORD_COUNT, BitBlock, WORD_BIT_LEN, Word, range_mask};
pub use bitwise::{BitLength, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};
