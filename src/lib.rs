//! Static and semi-static range query indexes.
//!
//! Each structure turns an array into something that answers range questions fast:
//!
//! - [`RangeAccumulator`]: inclusive range additions and range sums, switching lazily
//!   between difference, plain and prefix-sum encodings. Also in two dimensions.
//! - [`SparseTable`]: range minimum and arg-min in `O(1)`.
//! - [`WaveletTree`]: k-th smallest, rank and counting queries over any subrange.
//! - [`CoverageTree`]: interval coverage over compressed coordinates, with
//!   [`union_area`] built on top.
//!
//! ```
//! use rqtrees::{SparseTable, WaveletTree};
//!
//! let values = [7, 2, 3, 0, 5, 10, 3, 12, 18];
//! let table = SparseTable::new(&values)?;
//! assert_eq!(table.arg_min(4, 8)?, 6);
//!
//! let tree = WaveletTree::new(&values)?;
//! assert_eq!(tree.kth(0, 8, 2)?, 2);
//! # Ok::<(), rqtrees::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod methods;
pub mod trees;

pub use error::{Error, Result};
pub use methods::{sort_and_remove_dupes, stable_partition};
pub use trees::*;
