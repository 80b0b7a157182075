use longmat::vec::LongBitVec;
use longmat::{MAX_SIZE, MatrixError};
use proptest::prelude::*;
use sorted_iter::SortedIterator;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

proptest! {
    #[test]
    fn set_then_get((bits, index) in bitvec_and_index(2000), value in any::<bool>()) {
        let mut bits = bits;
        let before = bits.cardinality();
        let previous = bits.get(index).unwrap();
        bits.set(index, value).unwrap();
        assert_eq!(bits.get(index).unwrap(), value);
        let expected = match (previous, value) {
            (false, true) => before + 1,
            (true, false) => before - 1,
            _ => before,
        };
        assert_eq!(bits.cardinality(), expected);
    }

    #[test]
    fn set_range_matches_point_loop(bits in arbitrary_bitvec(1500, 64), bounds in (0..1500u64, 0..1500u64), value in any::<bool>()) {
        let (low, high) = clamp_range(bounds, bits.len());
        let mut ranged = bits.clone();
        ranged.set_range(low..high, value).unwrap();
        let mut pointwise = bits.clone();
        for index in low..high {
            pointwise.set(index, value).unwrap();
        }
        assert_eq!(ranged, pointwise);
    }

    #[test]
    fn flip_range_matches_point_loop(bits in arbitrary_bitvec(1500, 100), bounds in (0..1500u64, 0..1500u64)) {
        let (low, high) = clamp_range(bounds, bits.len());
        let mut ranged = bits.clone();
        ranged.flip_range(low..high).unwrap();
        let mut pointwise = bits.clone();
        for index in low..high {
            pointwise.flip(index).unwrap();
        }
        assert_eq!(ranged, pointwise);
    }

    #[test]
    fn algebra_matches_support_sets((left, right) in equal_length_bitvecs(1500)) {
        let mut and = left.clone();
        and.and(&right).unwrap();
        assert!(and.support().eq(left.support().intersection(right.support())));

        let mut or = left.clone();
        or.or(&right).unwrap();
        assert!(or.support().eq(left.support().union(right.support())));

        let mut xor = left.clone();
        xor.xor(&right).unwrap();
        assert!(xor.support().eq(left.support().symmetric_difference(right.support())));

        let mut and_not = left.clone();
        and_not.and_not(&right).unwrap();
        assert!(and_not.support().eq(left.support().difference(right.support())));

        assert_eq!(left.intersects(&right).unwrap(), !and.is_zero());
    }

    #[test]
    fn equality_ignores_block_capacity(indices in prop::collection::btree_set(0..3000u64, 0..50), capacity in 60..700u64) {
        let mut small = LongBitVec::with_block_capacity(3000, capacity).unwrap();
        let mut large = LongBitVec::new(3000).unwrap();
        for &index in &indices {
            small.set(index, true).unwrap();
            large.set(index, true).unwrap();
        }
        assert_eq!(small, large);
        assert_eq!(hash_of(&small), hash_of(&large));
        let mut combined = large.clone();
        combined.xor(&small).unwrap();
        assert!(combined.is_zero());
    }

    #[test]
    fn zeros_complement_support(bits in arbitrary_bitvec(800, 50)) {
        let mut complement = bits.clone();
        complement.not();
        assert!(complement.support().eq(bits.zeros()));
        assert_eq!(complement.cardinality() + bits.cardinality(), bits.len());
    }
}

#[test]
fn failed_range_leaves_vector_unchanged() {
    let mut bits = LongBitVec::with_block_capacity(100, 16).unwrap();
    bits.set_range(10..20, true).unwrap();
    let before = bits.clone();
    assert!(matches!(bits.set_range(50..101, true), Err(MatrixError::IndexOutOfRange { .. })));
    assert!(matches!(bits.flip_range(60..40), Err(MatrixError::IndexOutOfRange { .. })));
    assert_eq!(bits, before);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let mut left = LongBitVec::new(10).unwrap();
    let right = LongBitVec::new(11).unwrap();
    assert_eq!(
        left.and(&right),
        Err(MatrixError::DimensionMismatch {
            expected: vec![10],
            found: vec![11]
        })
    );
    assert!(left.intersects(&right).is_err());
}

#[test]
fn clearing_releases_storage() {
    let mut bits = LongBitVec::with_block_capacity(1000, 40).unwrap();
    bits.set(999, true).unwrap();
    assert_eq!(bits.materialized_block_count(), 25);
    bits.set(999, false).unwrap();
    assert_eq!(bits.materialized_block_count(), 0);
    bits.assign(true);
    assert_eq!(bits.cardinality(), 1000);
    bits.clear();
    assert!(bits.is_zero());
}

#[test]
fn largest_vector_is_lazy() {
    let mut bits = LongBitVec::new(MAX_SIZE - 1).unwrap();
    assert_eq!(bits.materialized_block_count(), 0);
    assert!(!bits.get(MAX_SIZE - 2).unwrap());
    bits.set(5, true).unwrap();
    assert_eq!(bits.materialized_block_count(), 1);
    assert_eq!(bits.cardinality(), 1);
    assert!(matches!(bits.get(MAX_SIZE - 1), Err(MatrixError::IndexOutOfRange { .. })));
    assert!(LongBitVec::new(MAX_SIZE).is_err());
}

fn clamp_range(bounds: (u64, u64), len: u64) -> (u64, u64) {
    let low = bounds.0.min(bounds.1).min(len);
    let high = bounds.0.max(bounds.1).min(len);
    (low, high)
}

fn hash_of(bits: &LongBitVec) -> u64 {
    let mut hasher = DefaultHasher::new();
    bits.hash(&mut hasher);
    hasher.finish()
}

fn bitvec_from(values: &[bool], capacity: u64) -> LongBitVec {
    let mut bits = LongBitVec::with_block_capacity(values.len() as u64, capacity).unwrap();
    for (index, &value) in values.iter().enumerate() {
        bits.set(index as u64, value).unwrap();
    }
    bits
}

fn arbitrary_bitvec(max_length: usize, capacity: u64) -> impl Strategy<Value = LongBitVec> {
    prop::collection::vec(any::<bool>(), 0..max_length).prop_map(move |values| bitvec_from(&values, capacity))
}

fn bitvec_and_index(max_length: usize) -> impl Strategy<Value = (LongBitVec, u64)> {
    (1..max_length).prop_flat_map(|length| {
        (
            prop::collection::vec(any::<bool>(), length).prop_map(|values| bitvec_from(&values, 97)),
            0..length as u64,
        )
    })
}

fn equal_length_bitvecs(max_length: usize) -> impl Strategy<Value = (LongBitVec, LongBitVec)> {
    (0..max_length).prop_flat_map(|length| {
        (
            prop::collection::vec(any::<bool>(), length).prop_map(|values| bitvec_from(&values, 128)),
            prop::collection::vec(any::<bool>(), length).prop_map(|values| bitvec_from(&values, 300)),
        )
    })
}
