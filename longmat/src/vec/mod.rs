mod block;
mod long_bitvec;

pub use block::Block;
pub use long_bitvec::LongBitVec;
