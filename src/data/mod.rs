//! Numeric capabilities required by the structures in [`crate::trees`].
//!
//! The structures don't care about the concrete number type. They only need to know
//! which operations they are allowed to perform on it.

use num_traits::PrimInt;
use std::ops::{Add, Sub};

/// Values that can be accumulated and un-accumulated.
///
/// `Default::default()` must be the identity of `+`, and `a + b - b == a` must hold.
/// Any signed integer, float or wrapping type fits.
///
/// Overflow is the caller's responsibility: pick a type wide enough that
/// `N * max|value|` over the whole array fits in it (e.g. `i64` or `i128` for `i32` inputs).
pub trait Group: Copy + Default + Add<Output = Self> + Sub<Output = Self> {}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T>> Group for T {}

/// Coordinates used by [`crate::CoverageTree`] and the sweep algorithms.
///
/// Differences of coordinates are lengths, and lengths are summed, so the same
/// overflow contract as [`Group`] applies to the total covered length (or area).
pub trait Coordinate: PrimInt + std::fmt::Debug {}

impl<T: PrimInt + std::fmt::Debug> Coordinate for T {}

/// The floored average of `lo` and `hi`, without overflowing.
/// Works for signed types as well, where `>>` is an arithmetic shift.
pub(crate) fn floor_mid<T: PrimInt>(lo: T, hi: T) -> T {
    (lo >> 1) + (hi >> 1) + (lo & hi & T::one())
}
