//! This module contains the range query structures themselves.
//!
//! They are independent of each other. [`accumulator`] and [`coverage`] are semi-static:
//! they accept updates, but some of their reads need `&mut self` or are only valid under
//! a caller contract. [`sparse_table`] and [`wavelet`] are fully immutable once built.

pub mod accumulator;
pub mod coverage;
pub mod sparse_table;
pub mod wavelet;

pub use accumulator::{Order, RangeAccumulator, RangeAccumulator2D};
pub use coverage::{union_area, union_length, CoverageTree, Rect};
pub use sparse_table::SparseTable;
pub use wavelet::WaveletTree;
