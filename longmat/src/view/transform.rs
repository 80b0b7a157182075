use crate::shape::MAX_RANK;
use std::rc::Rc;

/// One step of a view chain: maps a view coordinate onto its parent's coordinate.
///
/// Every variant except [`Transform::Fix`] keeps the rank; `Fix` re-inserts the axis it
/// removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// `parent[i] = view[i] + offset[i]`.
    SubRange { offset: [u64; MAX_RANK] },
    /// The view omits `axis`; the parent sees `index` there.
    Fix { axis: usize, index: u64 },
    /// `parent[axes[i]] = view[i]`.
    Permute { axes: [usize; MAX_RANK] },
    /// `parent[axis] = extent - 1 - view[axis]`.
    Flip { axis: usize, extent: u64 },
    /// `parent[i] = view[i] * strides[i]`.
    Stride { strides: [u64; MAX_RANK] },
    /// `parent[i] = indices[i][view[i]]` on every axis with a list.
    IndexSelect { indices: [Option<Rc<[u64]>>; MAX_RANK] },
    /// `parent[axis] = accepted[view[axis]]`, the list frozen when the view was built.
    PredicateSelect { axis: usize, accepted: Rc<[u64]> },
    ReadOnly,
}

impl Transform {
    /// Writes the parent coordinates of `view` into `parent` and returns the parent rank.
    #[inline]
    pub fn map(&self, view: &[u64], parent: &mut [u64; MAX_RANK]) -> usize {
        let rank = view.len();
        match self {
            Transform::Identity | Transform::ReadOnly => {
                parent[..rank].copy_from_slice(view);
                rank
            }
            Transform::SubRange { offset } => {
                for axis in 0..rank {
                    parent[axis] = view[axis] + offset[axis];
                }
                rank
            }
            Transform::Fix { axis, index } => {
                parent[..*axis].copy_from_slice(&view[..*axis]);
                parent[*axis] = *index;
                parent[axis + 1..=rank].copy_from_slice(&view[*axis..]);
                rank + 1
            }
            Transform::Permute { axes } => {
                for axis in 0..rank {
                    parent[axes[axis]] = view[axis];
                }
                rank
            }
            Transform::Flip { axis, extent } => {
                parent[..rank].copy_from_slice(view);
                parent[*axis] = extent - 1 - view[*axis];
                rank
            }
            Transform::Stride { strides } => {
                for axis in 0..rank {
                    parent[axis] = view[axis] * strides[axis];
                }
                rank
            }
            Transform::IndexSelect { indices } => {
                for axis in 0..rank {
                    parent[axis] = match &indices[axis] {
                        Some(list) => list[view[axis] as usize],
                        None => view[axis],
                    };
                }
                rank
            }
            Transform::PredicateSelect { axis, accepted } => {
                parent[..rank].copy_from_slice(view);
                parent[*axis] = accepted[view[*axis] as usize];
                rank
            }
        }
    }
}

/// `axes` padded to [`MAX_RANK`], or `None` unless it is a permutation of `0..D`.
pub fn permutation<const D: usize>(axes: [usize; D]) -> Option<[usize; MAX_RANK]> {
    let mut seen = [false; MAX_RANK];
    let mut padded = [0; MAX_RANK];
    for (position, &axis) in axes.iter().enumerate() {
        if axis >= D || seen[axis] {
            return None;
        }
        seen[axis] = true;
        padded[position] = axis;
    }
    Some(padded)
}

/// Copies the first `D` entries of `values` into `[T; MAX_RANK]`, padding with `fill`.
pub fn padded<T: Copy, const D: usize>(values: [T; D], fill: T) -> [T; MAX_RANK] {
    let mut padded = [fill; MAX_RANK];
    padded[..D].copy_from_slice(&values);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(transform: &Transform, view: &[u64]) -> Vec<u64> {
        let mut parent = [0; MAX_RANK];
        let rank = transform.map(view, &mut parent);
        parent[..rank].to_vec()
    }

    #[test]
    fn fix_reinserts_the_axis() {
        let fix_middle = Transform::Fix { axis: 1, index: 7 };
        assert_eq!(mapped(&fix_middle, &[2, 3]), vec![2, 7, 3]);
        let fix_last = Transform::Fix { axis: 1, index: 4 };
        assert_eq!(mapped(&fix_last, &[5]), vec![5, 4]);
        let fix_first = Transform::Fix { axis: 0, index: 1 };
        assert_eq!(mapped(&fix_first, &[8, 9]), vec![1, 8, 9]);
    }

    #[test]
    fn permute_scatters_view_axes() {
        let transform = Transform::Permute { axes: [2, 0, 1] };
        assert_eq!(mapped(&transform, &[10, 20, 30]), vec![20, 30, 10]);
    }

    #[test]
    fn flip_stride_and_selection() {
        assert_eq!(mapped(&Transform::Flip { axis: 1, extent: 5 }, &[3, 0]), vec![3, 4]);
        assert_eq!(
            mapped(&Transform::Stride { strides: [2, 3, 1] }, &[4, 5]),
            vec![8, 15]
        );
        let select = Transform::IndexSelect {
            indices: [None, Some(Rc::from(vec![6, 1, 6])), None],
        };
        assert_eq!(mapped(&select, &[9, 2]), vec![9, 6]);
        let accepted = Transform::PredicateSelect {
            axis: 0,
            accepted: Rc::from(vec![3, 5]),
        };
        assert_eq!(mapped(&accepted, &[1, 0]), vec![5, 0]);
    }

    #[test]
    fn only_permutations_are_accepted() {
        assert_eq!(permutation([1, 0]), Some([1, 0, 0]));
        assert_eq!(permutation([2, 0, 1]), Some([2, 0, 1]));
        assert_eq!(permutation([1, 1]), None);
        assert_eq!(permutation([0, 2]), None);
    }
}
