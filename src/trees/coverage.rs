//! Coverage trees: interval stabbing over compressed coordinates.
//!
//! The domain is a sorted set of distinct breakpoints `b[0] < b[1] < ... < b[m]`, splitting
//! the line into `m` elementary segments; segment `i` is `[b[i], b[i + 1])`. Every segment
//! carries a covering count, and a segment is *covered* while its count is positive.
//!
//! Each node of the segment tree stores the minimum count in its subtree, and the total
//! length and number of segments attaining it. Counts never go below zero, so a subtree's
//! uncovered part is exactly its minimum part whenever the minimum is zero. Range updates
//! are lazy: `add` is an increment still owed to both children. A node's own `min` already
//! includes its `add`, and is exact once every ancestor's `add` is added on top. Reads carry
//! that sum down instead of pushing, so only updates mutate the tree.
//!
//! See [`CoverageTree`], [`union_area`] and [`union_length`].

use std::cmp::Reverse;

use crate::data::Coordinate;
use crate::error::{check_index, check_range, Error, Result};
use crate::methods::sort_and_remove_dupes;
use num_traits::NumCast;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct CoverNode<C> {
    /// The minimum covering count in the subtree, including this node's `add`.
    min: i64,
    /// Increment owed to both children.
    add: i64,
    /// Total original-coordinate length of the segments attaining `min`.
    min_len: C,
    /// Number of segments attaining `min`.
    min_count: usize,
}

/// A segment tree counting how many times each elementary segment is covered, and how
/// much of the line is covered at least once.
///
/// Lengths are measured in original coordinate units. When built with
/// [`CoverageTree::with_capacity`] every segment has length one, so covered length and
/// covered segment count coincide; both are available under their own names either way
/// ([`CoverageTree::query_all`] and [`CoverageTree::count_all`]).
///
/// Counts must stay non-negative: a decrement that would take any segment below zero is
/// rejected with [`Error::NegativeCoverage`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CoverageTree<C = i64> {
    breakpoints: Vec<C>,
    nodes: Vec<CoverNode<C>>,
}

const ROOT: usize = 1;

impl<C: Coordinate> CoverageTree<C> {
    /// A tree over the dense domain `0..capacity`, one unit segment per integer.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let breakpoints = (0..=capacity)
            .map(|i| {
                <C as NumCast>::from(i).ok_or_else(|| {
                    Error::InvalidInterval(format!(
                        "capacity {capacity} doesn't fit the coordinate type"
                    ))
                })
            })
            .collect::<Result<Vec<C>>>()?;
        Ok(Self::from_breakpoints(breakpoints))
    }

    /// A tree over the compressed domain spanned by `coordinates`, in any order and with
    /// any repetitions. Fewer than two distinct coordinates make an empty domain.
    pub fn from_coordinates<I: IntoIterator<Item = C>>(coordinates: I) -> Self {
        Self::from_breakpoints(sort_and_remove_dupes(coordinates))
    }

    // `breakpoints` is sorted and distinct
    fn from_breakpoints(breakpoints: Vec<C>) -> Self {
        let mut tree = CoverageTree {
            breakpoints,
            nodes: vec![],
        };
        let segments = tree.segment_count();
        if segments > 0 {
            tree.nodes = vec![
                CoverNode {
                    min: 0,
                    add: 0,
                    min_len: C::zero(),
                    min_count: 0,
                };
                4 * segments
            ];
            tree.build(ROOT, 0, segments - 1);
        }
        log::debug!(
            "built coverage tree with {} segments over {:?}",
            segments,
            tree.breakpoints.first().zip(tree.breakpoints.last())
        );
        tree
    }

    fn build(&mut self, node: usize, l: usize, r: usize) {
        if l < r {
            let mid = (l + r) / 2;
            self.build(2 * node, l, mid);
            self.build(2 * node + 1, mid + 1, r);
        }
        let n = &mut self.nodes[node];
        n.min_len = self.breakpoints[r + 1] - self.breakpoints[l];
        n.min_count = r - l + 1;
    }

    /// The number of elementary segments.
    pub fn segment_count(&self) -> usize {
        self.breakpoints.len().saturating_sub(1)
    }

    /// The sorted, distinct breakpoints of the domain.
    pub fn breakpoints(&self) -> &[C] {
        &self.breakpoints
    }

    /// The index of breakpoint `x`. Segment `i` starts at breakpoint `i`.
    pub fn index_of(&self, x: C) -> Result<usize> {
        self.breakpoints
            .binary_search(&x)
            .map_err(|_| Error::UnknownCoordinate(format!("{x:?}")))
    }

    fn span_len(&self, l: usize, r: usize) -> C {
        self.breakpoints[r + 1] - self.breakpoints[l]
    }

    // `acc` is the sum of the ancestors' pending increments.
    fn covered_len(&self, node: usize, l: usize, r: usize, acc: i64) -> C {
        let n = &self.nodes[node];
        let span = self.span_len(l, r);
        if n.min + acc > 0 {
            span
        } else {
            span - n.min_len
        }
    }

    fn covered_count(&self, node: usize, l: usize, r: usize, acc: i64) -> usize {
        let n = &self.nodes[node];
        if n.min + acc > 0 {
            r - l + 1
        } else {
            r - l + 1 - n.min_count
        }
    }

    fn apply(&mut self, node: usize, delta: i64) {
        let n = &mut self.nodes[node];
        n.min += delta;
        n.add += delta;
    }

    fn push_down(&mut self, node: usize) {
        let add = self.nodes[node].add;
        if add != 0 {
            self.apply(2 * node, add);
            self.apply(2 * node + 1, add);
            self.nodes[node].add = 0;
        }
    }

    fn pull_up(&mut self, node: usize) {
        let (left, right) = (self.nodes[2 * node], self.nodes[2 * node + 1]);
        let n = &mut self.nodes[node];
        n.min = left.min.min(right.min);
        n.min_len = C::zero();
        n.min_count = 0;
        for child in [left, right] {
            if child.min == n.min {
                n.min_len = n.min_len + child.min_len;
                n.min_count += child.min_count;
            }
        }
    }

    /// Adds `delta` to the covering count of every segment in `lo..=hi`.
    /// O(log N)
    pub fn update_index(&mut self, lo: usize, hi: usize, delta: i64) -> Result<()> {
        check_range(lo, hi, self.segment_count())?;
        let last = self.segment_count() - 1;
        if delta < 0 && self.min_cover_rec(ROOT, 0, last, 0, lo, hi) + delta < 0 {
            return Err(Error::NegativeCoverage { lo, hi });
        }
        log::trace!("coverage update {lo}..={hi} by {delta}");
        self.update_rec(ROOT, 0, last, lo, hi, delta);
        Ok(())
    }

    fn update_rec(&mut self, node: usize, l: usize, r: usize, lo: usize, hi: usize, delta: i64) {
        if hi < l || r < lo {
            return;
        }
        if lo <= l && r <= hi {
            self.apply(node, delta);
            return;
        }
        self.push_down(node);
        let mid = (l + r) / 2;
        self.update_rec(2 * node, l, mid, lo, hi, delta);
        self.update_rec(2 * node + 1, mid + 1, r, lo, hi, delta);
        self.pull_up(node);
    }

    fn min_cover_rec(
        &self,
        node: usize,
        l: usize,
        r: usize,
        acc: i64,
        lo: usize,
        hi: usize,
    ) -> i64 {
        if hi < l || r < lo {
            return i64::MAX;
        }
        let n = &self.nodes[node];
        if lo <= l && r <= hi {
            return n.min + acc;
        }
        let mid = (l + r) / 2;
        let acc = acc + n.add;
        self.min_cover_rec(2 * node, l, mid, acc, lo, hi)
            .min(self.min_cover_rec(2 * node + 1, mid + 1, r, acc, lo, hi))
    }

    /// Adds `delta` to the covering count of the original-coordinate span `[x_lo, x_hi)`.
    /// Both ends must be breakpoints. An empty span does nothing.
    /// O(log N)
    pub fn update_x(&mut self, x_lo: C, x_hi: C, delta: i64) -> Result<()> {
        if x_lo > x_hi {
            return Err(Error::InvalidInterval(format!("[{x_lo:?}, {x_hi:?})")));
        }
        let lo = self.index_of(x_lo)?;
        let hi = self.index_of(x_hi)?;
        if lo == hi {
            return Ok(());
        }
        self.update_index(lo, hi - 1, delta)
    }

    /// The total covered length.
    /// O(1)
    pub fn query_all(&self) -> C {
        match self.segment_count() {
            0 => C::zero(),
            segments => self.covered_len(ROOT, 0, segments - 1, 0),
        }
    }

    /// The number of covered segments.
    /// O(1)
    pub fn count_all(&self) -> usize {
        match self.segment_count() {
            0 => 0,
            segments => self.covered_count(ROOT, 0, segments - 1, 0),
        }
    }

    /// The covered length inside `[x_lo, x_hi)`. The ends are arbitrary coordinates;
    /// segments straddling them are clipped.
    /// O(log N)
    pub fn query_x(&self, x_lo: C, x_hi: C) -> Result<C> {
        if x_lo > x_hi {
            return Err(Error::InvalidInterval(format!("[{x_lo:?}, {x_hi:?})")));
        }
        Ok(match self.segment_count() {
            0 => C::zero(),
            segments => self.query_x_rec(ROOT, 0, segments - 1, 0, x_lo, x_hi),
        })
    }

    fn query_x_rec(&self, node: usize, l: usize, r: usize, acc: i64, x_lo: C, x_hi: C) -> C {
        let (a, b) = (self.breakpoints[l], self.breakpoints[r + 1]);
        if b <= x_lo || x_hi <= a {
            return C::zero();
        }
        if x_lo <= a && b <= x_hi {
            return self.covered_len(node, l, r, acc);
        }
        let n = &self.nodes[node];
        if l == r {
            if n.min + acc > 0 {
                return b.min(x_hi) - a.max(x_lo);
            }
            return C::zero();
        }
        let mid = (l + r) / 2;
        let acc = acc + n.add;
        self.query_x_rec(2 * node, l, mid, acc, x_lo, x_hi)
            + self.query_x_rec(2 * node + 1, mid + 1, r, acc, x_lo, x_hi)
    }

    /// The number of covered segments in `lo..=hi`.
    /// O(log N)
    pub fn query_index(&self, lo: usize, hi: usize) -> Result<usize> {
        check_range(lo, hi, self.segment_count())?;
        Ok(self.query_index_rec(ROOT, 0, self.segment_count() - 1, 0, lo, hi))
    }

    fn query_index_rec(
        &self,
        node: usize,
        l: usize,
        r: usize,
        acc: i64,
        lo: usize,
        hi: usize,
    ) -> usize {
        if hi < l || r < lo {
            return 0;
        }
        if lo <= l && r <= hi {
            return self.covered_count(node, l, r, acc);
        }
        let mid = (l + r) / 2;
        let acc = acc + self.nodes[node].add;
        self.query_index_rec(2 * node, l, mid, acc, lo, hi)
            + self.query_index_rec(2 * node + 1, mid + 1, r, acc, lo, hi)
    }

    /// Whether segment `index` is covered at least once.
    /// O(log N)
    pub fn is_covered(&self, index: usize) -> Result<bool> {
        check_index(index, self.segment_count())?;
        let (mut node, mut l, mut r, mut acc) = (ROOT, 0, self.segment_count() - 1, 0);
        while l < r {
            acc += self.nodes[node].add;
            let mid = (l + r) / 2;
            if index <= mid {
                (node, r) = (2 * node, mid);
            } else {
                (node, l) = (2 * node + 1, mid + 1);
            }
        }
        Ok(self.nodes[node].min + acc > 0)
    }

    /// Whether the point `x` is covered. Points outside the domain never are.
    /// O(log N)
    pub fn is_covered_at(&self, x: C) -> bool {
        // the segment containing `x` starts at the last breakpoint `<= x`
        let after = self.breakpoints.partition_point(|&b| b <= x);
        match after {
            0 => false,
            i if i >= self.breakpoints.len() => false,
            i => self.is_covered(i - 1).unwrap_or(false),
        }
    }

    // whether the subtree has a segment whose coverage matches `covered`
    fn has_match(&self, node: usize, l: usize, r: usize, acc: i64, covered: bool) -> bool {
        let count = self.covered_count(node, l, r, acc);
        if covered {
            count > 0
        } else {
            count < r - l + 1
        }
    }

    /// The first segment at or after `pos` that is covered (or uncovered, when `covered` is
    /// false), if there is one.
    /// O(log N)
    pub fn next_index(&self, pos: usize, covered: bool) -> Result<Option<usize>> {
        check_index(pos, self.segment_count())?;
        Ok(self.next_rec(ROOT, 0, self.segment_count() - 1, 0, pos, covered))
    }

    fn next_rec(
        &self,
        node: usize,
        l: usize,
        r: usize,
        acc: i64,
        pos: usize,
        covered: bool,
    ) -> Option<usize> {
        if r < pos || !self.has_match(node, l, r, acc, covered) {
            return None;
        }
        if l == r {
            return Some(l);
        }
        let mid = (l + r) / 2;
        let acc = acc + self.nodes[node].add;
        self.next_rec(2 * node, l, mid, acc, pos, covered)
            .or_else(|| self.next_rec(2 * node + 1, mid + 1, r, acc, pos, covered))
    }

    /// The last segment at or before `pos` that is covered (or uncovered, when `covered` is
    /// false), if there is one.
    /// O(log N)
    pub fn previous_index(&self, pos: usize, covered: bool) -> Result<Option<usize>> {
        check_index(pos, self.segment_count())?;
        Ok(self.previous_rec(ROOT, 0, self.segment_count() - 1, 0, pos, covered))
    }

    fn previous_rec(
        &self,
        node: usize,
        l: usize,
        r: usize,
        acc: i64,
        pos: usize,
        covered: bool,
    ) -> Option<usize> {
        if pos < l || !self.has_match(node, l, r, acc, covered) {
            return None;
        }
        if l == r {
            return Some(l);
        }
        let mid = (l + r) / 2;
        let acc = acc + self.nodes[node].add;
        self.previous_rec(2 * node + 1, mid + 1, r, acc, pos, covered)
            .or_else(|| self.previous_rec(2 * node, l, mid, acc, pos, covered))
    }
}

/// An axis-aligned rectangle `[x1, x2) x [y1, y2)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rect<C> {
    pub x1: C,
    pub y1: C,
    pub x2: C,
    pub y2: C,
}

impl<C> From<(C, C, C, C)> for Rect<C> {
    fn from((x1, y1, x2, y2): (C, C, C, C)) -> Self {
        Rect { x1, y1, x2, y2 }
    }
}

/// The area of the union of `rects`.
///
/// Sweeps a vertical line across the plane, keeping a [`CoverageTree`] over the compressed
/// y coordinates, and adds `covered length * distance swept` between consecutive edges.
/// The total area must fit in `C`.
/// O(N log N)
pub fn union_area<C: Coordinate>(rects: &[Rect<C>]) -> Result<C> {
    if let Some(bad) = rects.iter().find(|r| r.x1 > r.x2 || r.y1 > r.y2) {
        return Err(Error::InvalidInterval(format!("{bad:?}")));
    }
    let rects: Vec<&Rect<C>> = rects
        .iter()
        .filter(|r| r.x1 < r.x2 && r.y1 < r.y2)
        .collect();

    let mut tree = CoverageTree::from_coordinates(rects.iter().flat_map(|r| [r.y1, r.y2]));
    // openings before closings at the same x
    let mut events: Vec<(C, i64, C, C)> = rects
        .iter()
        .flat_map(|r| [(r.x1, 1, r.y1, r.y2), (r.x2, -1, r.y1, r.y2)])
        .collect();
    events.sort_unstable_by_key(|&(x, delta, _, _)| (x, Reverse(delta)));

    let mut area = C::zero();
    let mut last_x = match events.first() {
        Some(&(x, ..)) => x,
        None => return Ok(area),
    };
    for (x, delta, y1, y2) in events {
        area = area + tree.query_all() * (x - last_x);
        tree.update_x(y1, y2, delta)?;
        last_x = x;
    }
    Ok(area)
}

/// The total length of the union of the half-open intervals `[start, end)`.
/// O(N log N)
pub fn union_length<C: Coordinate>(intervals: &[(C, C)]) -> Result<C> {
    if let Some(bad) = intervals.iter().find(|(start, end)| start > end) {
        return Err(Error::InvalidInterval(format!("{bad:?}")));
    }
    let mut tree = CoverageTree::from_coordinates(intervals.iter().flat_map(|&(s, e)| [s, e]));
    for &(start, end) in intervals {
        tree.update_x(start, end, 1)?;
    }
    Ok(tree.query_all())
}
