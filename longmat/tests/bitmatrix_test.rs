use itertools::iproduct;
use longmat::prelude::*;
use longmat::partition::Partitioner;
use longmat::{DEFAULT_BLOCK_CAPACITY, MAX_SIZE};
use proptest::prelude::*;
use rand::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

proptest! {
    #[test]
    fn extents(rows in 0..50u64, columns in 0..50u64) {
        let matrix = BitMatrix2D::new([rows, columns]).unwrap();
        assert_eq!(matrix.extents(), [rows, columns]);
        assert_eq!(matrix.size(), rows * columns);
        assert!(matrix.is_empty());
    }

    #[test]
    fn set_then_get(matrix in arbitrary_bitmatrix3(8), raw in (0..8u64, 0..8u64, 0..8u64), value in any::<bool>()) {
        prop_assume!(matrix.size() > 0);
        let [slices, rows, columns] = matrix.extents();
        let coordinates = (raw.0 % slices, raw.1 % rows, raw.2 % columns);
        let mut updated = matrix.clone();
        updated.set(coordinates, value).unwrap();
        assert_eq!(updated.get(coordinates).unwrap(), value);
        let grew = value && !matrix.get(coordinates).unwrap();
        let shrank = !value && matrix.get(coordinates).unwrap();
        assert_eq!(
            updated.cardinality() as i64 - matrix.cardinality() as i64,
            i64::from(grew) - i64::from(shrank)
        );
        for other in iproduct!(0..slices, 0..rows, 0..columns) {
            if other != coordinates {
                assert_eq!(updated.get(other).unwrap(), matrix.get(other).unwrap());
            }
        }
    }

    #[test]
    fn indexing(matrix in arbitrary_bitmatrix2(30)) {
        let [rows, columns] = matrix.extents();
        for (row, column) in iproduct!(0..rows, 0..columns) {
            assert_eq!(matrix[(row, column)], matrix[[row, column]]);
            assert_eq!(matrix[(row, column)], matrix.get((row, column)).unwrap());
        }
    }

    #[test]
    fn clone(matrix in arbitrary_bitmatrix2(30)) {
        assert_eq!(matrix, matrix.clone());
    }

    #[test]
    fn boolean_algebra((left, right) in equal_shape_bitmatrices(25)) {
        let mut absorbed = left.clone();
        absorbed.or(&right).unwrap();
        absorbed.and(&left).unwrap();
        assert_eq!(absorbed, left);

        let mut xor = left.clone();
        xor.xor(&left).unwrap();
        assert!(xor.is_empty());

        let mut and_not = left.clone();
        and_not.and_not(&left).unwrap();
        assert!(and_not.is_empty());

        let mut and = left.clone();
        and.and(&right).unwrap();
        assert_eq!(left.intersects(&right).unwrap(), !and.is_empty());
        for (row, column) in iproduct!(0..left.extents()[0], 0..left.extents()[1]) {
            assert_eq!(and[(row, column)], left[(row, column)] && right[(row, column)]);
        }
    }

    #[test]
    fn equality_is_content_based(matrix in arbitrary_bitmatrix2(20), capacity in 21..200u64) {
        let mut rebuilt = BitMatrix2D::with_block_capacity(matrix.extents(), capacity).unwrap();
        matrix.for_each(true, |coordinates| rebuilt.set(coordinates, true).unwrap());
        assert_eq!(rebuilt, matrix);
        assert_eq!(hash_of(&rebuilt), hash_of(&matrix));
        if matrix.size() > 0 {
            rebuilt.flip([0, 0]).unwrap();
            assert_ne!(rebuilt, matrix);
        }
    }

    #[test]
    fn range_operations_match_point_loops(matrix in arbitrary_bitmatrix2(30), bounds in (0..900u64, 0..900u64), value in any::<bool>()) {
        let low = bounds.0.min(bounds.1).min(matrix.size());
        let high = bounds.0.max(bounds.1).min(matrix.size());
        let columns = matrix.extents()[1];

        let mut ranged = matrix.clone();
        ranged.set_range(low..high, value).unwrap();
        let mut pointwise = matrix.clone();
        for index in low..high {
            pointwise.set((index / columns, index % columns), value).unwrap();
        }
        assert_eq!(ranged, pointwise);

        let mut flipped = matrix.clone();
        flipped.flip_range(low..high).unwrap();
        for index in low..high {
            pointwise.set((index / columns, index % columns), !matrix[(index / columns, index % columns)]).unwrap();
        }
        assert_eq!(flipped, pointwise);
    }

    #[test]
    fn for_each_visits_in_row_major_order(matrix in arbitrary_bitmatrix3(6)) {
        for value in [true, false] {
            let mut visited = Vec::new();
            matrix.for_each(value, |coordinates| visited.push(coordinates));
            let [slices, rows, columns] = matrix.extents();
            let expected: Vec<[u64; 3]> = iproduct!(0..slices, 0..rows, 0..columns)
                .map(|(slice, row, column)| [slice, row, column])
                .filter(|&coordinates| matrix[coordinates] == value)
                .collect();
            assert_eq!(visited, expected);
        }
    }

    #[test]
    fn not_complements(matrix in arbitrary_bitmatrix2(30)) {
        let mut complement = matrix.clone();
        complement.not();
        assert_eq!(complement.cardinality() + matrix.cardinality(), matrix.size());
        assert!(!complement.intersects(&matrix).unwrap());
    }
}

#[test]
fn dice_scenario() {
    let mut matrix = new_bit_matrix([3, 4]).unwrap();
    matrix.set((1, 2), true).unwrap();
    assert_eq!(matrix.cardinality(), 1);
    let diced = matrix.view_dice([1, 0]).unwrap();
    assert_eq!(diced.extents(), [4, 3]);
    assert!(diced.get((2, 1)).unwrap());
    assert_eq!(diced.cardinality(), 1);
}

#[test]
fn size_boundary() {
    let largest = BitMatrix1D::new([MAX_SIZE - 1]).unwrap();
    assert_eq!(largest.size(), MAX_SIZE - 1);
    assert!(matches!(
        largest.get(MAX_SIZE - 1),
        Err(MatrixError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        BitMatrix1D::new([MAX_SIZE]),
        Err(MatrixError::InvalidArgument(_))
    ));
    assert!(matches!(
        BitMatrix2D::new([u64::MAX, 3]),
        Err(MatrixError::InvalidArgument(_))
    ));
    assert!(BitMatrix3D::new([1 << 21, 1 << 21, 1 << 21]).is_err());
}

#[test]
fn small_capacity_boundary() {
    assert_eq!(Partitioner::new(0, 16).unwrap().max_size(), 255);
    assert_eq!(Partitioner::new(0, 2).unwrap().max_size(), 3);
    assert!(Partitioner::new(0, 0).is_err());
    assert!(Partitioner::new(0, 1 << 32).is_err());
    assert!(BitMatrix1D::with_block_capacity([254], 16).is_ok());
    assert!(BitMatrix1D::with_block_capacity([255], 16).is_err());
    assert!(BitMatrix1D::with_block_capacity([4], 1).is_err());
    assert!(BitMatrix1D::with_block_capacity([4], DEFAULT_BLOCK_CAPACITY + 1).is_err());
}

#[test]
fn empty_matrix_rejects_every_access() {
    let mut matrix = BitMatrix2D::new([0, 5]).unwrap();
    assert_eq!(matrix.block_count(), 0);
    assert!(matrix.get((0, 0)).is_err());
    assert!(matrix.set((0, 4), true).is_err());
    matrix.assign(true);
    assert!(matrix.is_empty());
}

#[test]
fn block_boundary_behaves_like_interior() {
    let capacity = 100;
    let mut matrix = BitMatrix1D::with_block_capacity([1000], capacity).unwrap();
    assert_eq!(matrix.block_count(), 10);
    for index in [capacity - 1, capacity, 5 * capacity - 1, 5 * capacity, 50, 999] {
        assert!(!matrix.get(index).unwrap());
        matrix.set(index, true).unwrap();
        assert!(matrix.get(index).unwrap());
    }
    assert_eq!(matrix.cardinality(), 6);
    assert_eq!(
        matrix.support().collect::<Vec<_>>(),
        vec![50, 99, 100, 499, 500, 999]
    );
    matrix.set(capacity, false).unwrap();
    assert!(matrix.get(capacity - 1).unwrap());
    assert!(!matrix.get(capacity).unwrap());
    assert!(matrix.get(1000u64).is_err());
}

#[test]
fn storage_follows_the_highest_set_cell() {
    let mut matrix = BitMatrix2D::with_block_capacity([40, 50], 100).unwrap();
    assert_eq!(matrix.as_bit_vec().len(), 2000);
    assert_eq!(matrix.as_bit_vec().materialized_block_count(), 0);
    matrix.set((7, 10), true).unwrap();
    assert_eq!(matrix.as_bit_vec().materialized_block_count(), 4);
    assert!(matrix.as_bit_vec().get(360).unwrap());
    matrix.set((7, 10), false).unwrap();
    assert_eq!(matrix.as_bit_vec().materialized_block_count(), 0);
}

#[test]
fn failed_operations_leave_matrix_unchanged() {
    let mut matrix = BitMatrix2D::new([4, 4]).unwrap();
    matrix.set_range(3..9, true).unwrap();
    let before = matrix.clone();
    assert!(matrix.set_range(10..17, true).is_err());
    assert!(matrix.flip_range(5..2).is_err());
    assert!(matrix.set((4, 0), true).is_err());
    let other = BitMatrix2D::new([4, 5]).unwrap();
    assert!(matches!(
        matrix.or(&other),
        Err(MatrixError::DimensionMismatch { .. })
    ));
    assert!(matrix.intersects(&other).is_err());
    assert_eq!(matrix, before);
}

#[test]
fn equal_hashes_across_ranks_follow_equality() {
    let mut first = BitMatrix3D::new([2, 3, 4]).unwrap();
    let mut second = BitMatrix3D::with_block_capacity([2, 3, 4], 7).unwrap();
    first.set((1, 2, 3), true).unwrap();
    second.set((1, 2, 3), true).unwrap();
    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
    let reshaped = BitMatrix3D::new([2, 4, 3]).unwrap();
    assert_ne!(BitMatrix3D::new([2, 3, 4]).unwrap(), reshaped);
}

#[test]
fn parse_and_display() {
    let matrix = BitMatrix2D::from_str("[0 1 0|0 0 1|]").unwrap();
    assert_eq!(matrix.extents(), [2, 3]);
    assert!(matrix[(0, 1)] && matrix[(1, 2)]);
    assert_eq!(format!("{matrix:#}"), "[010|001|]");
    assert_eq!(format!("{matrix}").parse::<BitMatrix2D>().unwrap(), matrix);
    assert_eq!(
        format!("{matrix:?}"),
        "BitMatrix(shape=[2, 3],support=[1, 5])"
    );
}

#[test]
fn random_density_extremes() {
    let mut rng = StdRng::seed_from_u64(7);
    let full = BitMatrix2D::random_with_rng([5, 7], 1.0, &mut rng).unwrap();
    assert_eq!(full.cardinality(), 35);
    let empty = BitMatrix2D::random_with_rng([5, 7], 0.0, &mut rng).unwrap();
    assert!(empty.is_empty());
    assert!(BitMatrix2D::random_with_rng([5, 7], 1.5, &mut rng).is_err());
}

fn hash_of<const D: usize>(matrix: &BitMatrix<D>) -> u64 {
    let mut hasher = DefaultHasher::new();
    matrix.hash(&mut hasher);
    hasher.finish()
}

fn random_bitmatrix<const D: usize>(extents: [u64; D]) -> BitMatrix<D> {
    BitMatrix::random_with_rng(extents, 0.5, &mut thread_rng()).unwrap()
}

prop_compose! {
    fn arbitrary_bitmatrix2(max_dimension: u64)(shape in (0..=max_dimension, 0..=max_dimension)) -> BitMatrix2D {
        random_bitmatrix([shape.0, shape.1])
    }
}

prop_compose! {
    fn arbitrary_bitmatrix3(max_dimension: u64)(shape in (0..=max_dimension, 0..=max_dimension, 0..=max_dimension)) -> BitMatrix3D {
        random_bitmatrix([shape.0, shape.1, shape.2])
    }
}

prop_compose! {
    fn equal_shape_bitmatrices(max_dimension: u64)(shape in (1..=max_dimension, 1..=max_dimension)) -> (BitMatrix2D, BitMatrix2D) {
        (random_bitmatrix([shape.0, shape.1]), random_bitmatrix([shape.0, shape.1]))
    }
}
