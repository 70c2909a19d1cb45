//! Methods module
//! Free functions shared by the trees: coordinate compression and the stable partition
//! used while building a [`crate::WaveletTree`].

use itertools::Itertools;

/// Returns the distinct values of `values`, sorted.
/// This is the coordinate basis of a compressed coordinate domain.
/// O(N log N)
pub fn sort_and_remove_dupes<T, I>(values: I) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    values.into_iter().sorted_unstable().dedup().collect()
}

/// Reorders `slice` so that every element satisfying `pred` comes before every element
/// that doesn't, keeping the relative order inside each group.
/// Returns the number of elements that satisfied `pred`.
///
/// `scratch` must be at least as long as `slice`. The rejected elements are parked there
/// during the first pass, then copied back behind the accepted ones.
/// O(N)
pub fn stable_partition<T, F>(slice: &mut [T], scratch: &mut [T], mut pred: F) -> usize
where
    T: Copy,
    F: FnMut(&T) -> bool,
{
    assert!(
        scratch.len() >= slice.len(),
        "scratch buffer of length {} is shorter than slice of length {}",
        scratch.len(),
        slice.len()
    );

    let mut accepted = 0;
    let mut rejected = 0;
    for i in 0..slice.len() {
        let elem = slice[i];
        if pred(&elem) {
            slice[accepted] = elem;
            accepted += 1;
        } else {
            scratch[rejected] = elem;
            rejected += 1;
        }
    }
    slice[accepted..].copy_from_slice(&scratch[..rejected]);
    accepted
}
