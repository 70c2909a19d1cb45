//! Brute force shadow models and random input generators shared by the integration tests.

#[cfg(feature = "bench")]
pub mod bench;

use rand::{self, Rng};
use rqtrees::*;

/// Something to perform in one round of the accumulator tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Add { lo: usize, hi: usize, value: i64 },
    Query { lo: usize, hi: usize },
    Get { index: usize },
    Set { index: usize, value: i64 },
}

pub const MAX_ADD: i64 = 200;

pub fn random_inclusive_range(rng: &mut impl Rng, len: usize) -> (usize, usize) {
    let (a, b) = (rng.gen_range(0..len), rng.gen_range(0..len));
    (a.min(b), a.max(b))
}

pub fn random_round_action(rng: &mut impl Rng, len: usize) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..4) {
        0 => {
            let (lo, hi) = random_inclusive_range(rng, len);
            let value = rng.gen_range(-MAX_ADD..=MAX_ADD);
            Add { lo, hi, value }
        }
        1 => {
            let (lo, hi) = random_inclusive_range(rng, len);
            Query { lo, hi }
        }
        2 => Get {
            index: rng.gen_range(0..len),
        },
        3 => Set {
            index: rng.gen_range(0..len),
            value: rng.gen_range(-MAX_ADD..=MAX_ADD),
        },
        _ => unreachable!(),
    }
}

/// Runs one round against both the accumulator and a plain array, and checks they agree.
pub fn run_round(action: &RoundAction, acc: &mut RangeAccumulator<i64>, shadow: &mut [i64]) {
    use RoundAction::*;
    match *action {
        Add { lo, hi, value } => {
            acc.add_inclusive(lo, hi, value).unwrap();
            shadow[lo..=hi].iter_mut().for_each(|x| *x += value);
        }
        Query { lo, hi } => {
            let expected: i64 = shadow[lo..=hi].iter().sum();
            assert_eq!(acc.query_inclusive(lo, hi), Ok(expected), "{action:?}");
        }
        Get { index } => {
            assert_eq!(acc.get(index), Ok(shadow[index]), "{action:?}");
        }
        Set { index, value } => {
            acc.set(index, value).unwrap();
            shadow[index] = value;
        }
    }
}

pub fn brute_min(values: &[i64], lo: usize, hi: usize) -> (i64, usize) {
    (lo..=hi)
        .map(|i| (values[i], i))
        .min()
        .expect("non-empty range")
}

pub fn brute_sorted(values: &[i64], l: usize, r: usize) -> Vec<i64> {
    let mut sorted = values[l..=r].to_vec();
    sorted.sort_unstable();
    sorted
}

/// Per-segment covering counts, updated naively.
#[derive(Clone, Debug)]
pub struct CoverageModel {
    pub counts: Vec<i64>,
    pub breakpoints: Vec<i64>,
}

impl CoverageModel {
    pub fn new(breakpoints: Vec<i64>) -> Self {
        let segments = breakpoints.len().saturating_sub(1);
        CoverageModel {
            counts: vec![0; segments],
            breakpoints,
        }
    }

    /// Mirrors `CoverageTree::update_index`, including the rejection of negative counts.
    pub fn update_index(&mut self, lo: usize, hi: usize, delta: i64) -> bool {
        if self.counts[lo..=hi].iter().any(|&c| c + delta < 0) {
            return false;
        }
        self.counts[lo..=hi].iter_mut().for_each(|c| *c += delta);
        true
    }

    pub fn seg_len(&self, i: usize) -> i64 {
        self.breakpoints[i + 1] - self.breakpoints[i]
    }

    pub fn covered_len(&self) -> i64 {
        (0..self.counts.len())
            .filter(|&i| self.counts[i] > 0)
            .map(|i| self.seg_len(i))
            .sum()
    }

    pub fn covered_len_x(&self, x_lo: i64, x_hi: i64) -> i64 {
        (0..self.counts.len())
            .filter(|&i| self.counts[i] > 0)
            .map(|i| {
                let a = self.breakpoints[i].max(x_lo);
                let b = self.breakpoints[i + 1].min(x_hi);
                (b - a).max(0)
            })
            .sum()
    }

    pub fn next(&self, pos: usize, covered: bool) -> Option<usize> {
        (pos..self.counts.len()).find(|&i| (self.counts[i] > 0) == covered)
    }

    pub fn previous(&self, pos: usize, covered: bool) -> Option<usize> {
        (0..=pos).rev().find(|&i| (self.counts[i] > 0) == covered)
    }
}

/// The union area of rectangles, by rasterizing them over their own coordinate grid.
pub fn brute_union_area(rects: &[Rect<i64>]) -> i64 {
    let xs = sort_and_remove_dupes(rects.iter().flat_map(|r| [r.x1, r.x2]));
    let ys = sort_and_remove_dupes(rects.iter().flat_map(|r| [r.y1, r.y2]));
    let mut area = 0;
    for xw in xs.windows(2) {
        for yw in ys.windows(2) {
            let inside = rects
                .iter()
                .any(|r| r.x1 <= xw[0] && xw[1] <= r.x2 && r.y1 <= yw[0] && yw[1] <= r.y2);
            if inside {
                area += (xw[1] - xw[0]) * (yw[1] - yw[0]);
            }
        }
    }
    area
}
