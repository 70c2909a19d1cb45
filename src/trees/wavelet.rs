//! Wavelet trees: order statistics over any subrange of an immutable integer array.
//!
//! The tree splits the *value* domain in half at every node, and at the same time stably
//! partitions the node's slice of the array, so that every node sees its elements in their
//! original relative order. A prefix count of "how many went left" is all a node needs to
//! translate an index range into its children's coordinates:
//! `l..r` in the node becomes `f[l]..f[r]` in the left child and `l - f[l]..r - f[r]`
//! in the right child.
//!
//! See [`WaveletTree`]

use crate::data::floor_mid;
use crate::error::{check_index, check_range, Error, Result};
use crate::methods::stable_partition;
use num_traits::PrimInt;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct WaveletNode<T> {
    lo: T,
    hi: T,
    /// Values `<= mid` go to the left child. Meaningless for leaves.
    mid: T,
    /// `left_counts[i]` is the number of the first `i` local elements that went left.
    /// Empty for leaves.
    left_counts: Box<[usize]>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T: PrimInt> WaveletNode<T> {
    fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Translates the local half-open range `l..r` into the left child's coordinates.
    fn to_left(&self, l: usize, r: usize) -> (usize, usize) {
        (self.left_counts[l], self.left_counts[r])
    }

    /// Translates the local half-open range `l..r` into the right child's coordinates.
    fn to_right(&self, l: usize, r: usize) -> (usize, usize) {
        (l - self.left_counts[l], r - self.left_counts[r])
    }
}

/// A static index over an integer array answering, for any range of positions:
/// the k-th smallest value, how many values are `<= x`, and how many equal `x`.
///
/// Nodes live in one arena and refer to their children by index. A node whose values all
/// fall on one side of its midpoint narrows its own value range instead of growing a
/// single child, so there are no one-child chains.
///
/// Queries take `O(log(max - min))` time. The tree is immutable after construction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WaveletTree<T> {
    nodes: Vec<WaveletNode<T>>,
    len: usize,
}

const ROOT: usize = 0;

impl<T: PrimInt> WaveletTree<T> {
    /// Builds the tree from a copy of `values`. The original is never touched.
    /// Fails with [`Error::EmptyInput`] if `values` is empty.
    /// O(N log(max - min))
    pub fn new(values: &[T]) -> Result<Self> {
        let (lo, hi) = match (values.iter().min(), values.iter().max()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => return Err(Error::EmptyInput),
        };

        let mut work = values.to_vec();
        let mut scratch = vec![T::zero(); values.len()];
        let mut tree = WaveletTree {
            nodes: vec![],
            len: values.len(),
        };
        tree.build(&mut work, &mut scratch, lo, hi);

        log::debug!(
            "built wavelet tree over {} values in {:?}..={:?} with {} nodes",
            tree.len,
            lo.to_i128(),
            hi.to_i128(),
            tree.nodes.len()
        );
        Ok(tree)
    }

    /// Builds the subtree for `local`, whose values all lie in `lo..=hi`, and returns its
    /// index in the arena. `scratch` is at least as long as `local`.
    fn build(&mut self, local: &mut [T], scratch: &mut [T], mut lo: T, mut hi: T) -> usize {
        let index = self.nodes.len();
        self.nodes.push(WaveletNode {
            lo,
            hi,
            mid: lo,
            left_counts: Box::new([]),
            left: None,
            right: None,
        });

        while lo != hi {
            let mid = floor_mid(lo, hi);
            let mut left_counts = Vec::with_capacity(local.len() + 1);
            left_counts.push(0);
            let mut went_left = 0;
            for &value in local.iter() {
                if value <= mid {
                    went_left += 1;
                }
                left_counts.push(went_left);
            }

            // everything on one side: narrow this node instead of making a child
            if went_left == 0 {
                lo = mid + T::one();
                continue;
            }
            if went_left == local.len() {
                hi = mid;
                continue;
            }

            stable_partition(local, &mut scratch[..local.len()], |&value| value <= mid);
            let (left_part, right_part) = local.split_at_mut(went_left);
            let left = self.build(left_part, scratch, lo, mid);
            let right = self.build(right_part, scratch, mid + T::one(), hi);

            let node = &mut self.nodes[index];
            node.mid = mid;
            node.left_counts = left_counts.into_boxed_slice();
            node.left = Some(left);
            node.right = Some(right);
            break;
        }

        let node = &mut self.nodes[index];
        node.lo = lo;
        node.hi = hi;
        if lo == hi {
            node.mid = lo;
        }
        index
    }

    fn children(&self, node: &WaveletNode<T>) -> (&WaveletNode<T>, &WaveletNode<T>) {
        match (node.left, node.right) {
            (Some(left), Some(right)) => (&self.nodes[left], &self.nodes[right]),
            _ => unreachable!("internal wavelet node without two children"),
        }
    }

    /// The number of values in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, since empty trees can't be built.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The smallest value in the array.
    pub fn min_value(&self) -> T {
        self.nodes[ROOT].lo
    }

    /// The largest value in the array.
    pub fn max_value(&self) -> T {
        self.nodes[ROOT].hi
    }

    /// The number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The `k`-th smallest value among positions `l..=r`, counting from `k = 1`.
    /// O(log(max - min))
    pub fn kth(&self, l: usize, r: usize, k: usize) -> Result<T> {
        check_range(l, r, self.len)?;
        if k == 0 || k > r - l + 1 {
            return Err(Error::InvalidRank { k, len: r - l + 1 });
        }

        let (mut l, mut r, mut k) = (l, r + 1, k);
        let mut node = &self.nodes[ROOT];
        while !node.is_leaf() {
            let (left, right) = self.children(node);
            let (lf, rf) = node.to_left(l, r);
            let went_left = rf - lf;
            if k <= went_left {
                (l, r) = (lf, rf);
                node = left;
            } else {
                (l, r) = node.to_right(l, r);
                k -= went_left;
                node = right;
            }
        }
        Ok(node.lo)
    }

    /// The number of positions in `l..=r` holding a value `<= x`.
    /// O(log(max - min))
    pub fn count_less_equal(&self, l: usize, r: usize, x: T) -> Result<usize> {
        check_range(l, r, self.len)?;
        Ok(self.count_less_equal_rec(&self.nodes[ROOT], l, r + 1, x))
    }

    fn count_less_equal_rec(&self, node: &WaveletNode<T>, l: usize, r: usize, x: T) -> usize {
        if l >= r || x < node.lo {
            return 0;
        }
        if node.hi <= x {
            return r - l;
        }
        // here `lo <= x < hi`, so the node isn't a leaf
        let (left, right) = self.children(node);
        let (ll, lr) = node.to_left(l, r);
        let (rl, rr) = node.to_right(l, r);
        self.count_less_equal_rec(left, ll, lr, x) + self.count_less_equal_rec(right, rl, rr, x)
    }

    /// The number of positions in `l..=r` holding exactly `x`.
    /// O(log(max - min))
    pub fn count(&self, l: usize, r: usize, x: T) -> Result<usize> {
        check_range(l, r, self.len)?;

        let (mut l, mut r) = (l, r + 1);
        let mut node = &self.nodes[ROOT];
        loop {
            if l >= r || x < node.lo || node.hi < x {
                return Ok(0);
            }
            if node.is_leaf() {
                return Ok(r - l);
            }
            let (left, right) = self.children(node);
            if x <= node.mid {
                (l, r) = node.to_left(l, r);
                node = left;
            } else {
                (l, r) = node.to_right(l, r);
                node = right;
            }
        }
    }

    /// The number of positions in `l..=r` holding a value in `a..=b`.
    /// An inverted value range counts nothing.
    pub fn count_between(&self, l: usize, r: usize, a: T, b: T) -> Result<usize> {
        if a > b {
            check_range(l, r, self.len)?;
            return Ok(0);
        }
        let up_to_b = self.count_less_equal(l, r, b)?;
        let below_a = match a.checked_sub(&T::one()) {
            Some(before) => self.count_less_equal(l, r, before)?,
            // `a` is the smallest value of `T`, nothing is below it
            None => 0,
        };
        Ok(up_to_b - below_a)
    }

    /// The number of occurrences of `x` in the first `i` positions.
    pub fn rank(&self, x: T, i: usize) -> Result<usize> {
        if i == 0 {
            return Ok(0);
        }
        check_index(i - 1, self.len)?;
        self.count(0, i - 1, x)
    }
}
