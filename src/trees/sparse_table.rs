//! Sparse tables: range minimum queries in `O(1)` over an immutable array.
//!
//! See [`SparseTable`]

use crate::error::{check_range, Error, Result};

/// A table of the minima of every subrange whose length is a power of two.
///
/// Any other range is covered by two overlapping power-of-two blocks. Taking the minimum
/// twice doesn't change it, so the overlap is harmless (this is why sparse tables answer
/// min/max/gcd but not sums).
///
/// Ties always resolve to the earliest index.
///
/// The table is immutable once built, so sharing it between threads needs no locking.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SparseTable<T> {
    values: Box<[T]>,
    /// `levels[k][s]` is the index of the minimum of `values[s..s + 2^k]`.
    levels: Vec<Box<[usize]>>,
}

impl<T: Ord + Copy> SparseTable<T> {
    /// Builds the table from a snapshot of `values`.
    /// Fails with [`Error::EmptyInput`] if `values` is empty.
    /// O(N log N)
    pub fn new(values: &[T]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let len = values.len();
        let mut levels: Vec<Box<[usize]>> = vec![(0..len).collect()];
        let mut span = 1;
        while 2 * span <= len {
            let prev = &levels[levels.len() - 1];
            let level = (0..=len - 2 * span)
                .map(|s| Self::earliest_min(values, prev[s], prev[s + span]))
                .collect();
            levels.push(level);
            span *= 2;
        }

        log::debug!(
            "built sparse table over {} values with {} levels",
            len,
            levels.len()
        );
        Ok(SparseTable {
            values: values.into(),
            levels,
        })
    }

    // `a` and `b` are arbitrary indices; prefer the smaller value, then the smaller index.
    fn earliest_min(values: &[T], a: usize, b: usize) -> usize {
        if (values[a], a) <= (values[b], b) {
            a
        } else {
            b
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, since empty tables can't be built. Kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The array the table was built from.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The index of the minimum of `lo..=hi`, preferring the earliest one on ties.
    /// O(1)
    pub fn arg_min(&self, lo: usize, hi: usize) -> Result<usize> {
        check_range(lo, hi, self.len())?;
        let k = (hi - lo + 1).ilog2() as usize;
        let level = &self.levels[k];
        Ok(Self::earliest_min(
            &self.values,
            level[lo],
            level[hi + 1 - (1 << k)],
        ))
    }

    /// The minimum of `lo..=hi`.
    /// O(1)
    pub fn min(&self, lo: usize, hi: usize) -> Result<T> {
        Ok(self.values[self.arg_min(lo, hi)?])
    }
}
