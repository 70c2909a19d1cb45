//! Range accumulators. A light-weight alternative to a fenwick tree for workloads that
//! come in batches: many range updates, then many range queries.
//!
//! The array is kept in one of three encodings (see [`Order`]) and converted on demand
//! to the one that makes the requested operation cheap. Repeating the same kind of
//! operation costs no conversion. Alternating kinds costs one `O(N)` conversion each time.
//!
//! See [`RangeAccumulator`] and [`RangeAccumulator2D`].

use crate::data::Group;
use crate::error::{check_index, check_range, Error, Result};

/// The encoding an accumulator's array is currently in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Order {
    /// `A[i] = f(i) - f(i - 1)`. Range additions are two point updates.
    Difference,
    /// `A[i] = f(i)`.
    Function,
    /// `A[i] = f(0) + ... + f(i)`. Range sums are two point lookups.
    Summation,
}

impl Order {
    /// The derivative order: `1` for [`Order::Difference`], `0` for [`Order::Function`]
    /// and `-1` for [`Order::Summation`].
    pub fn derivative(self) -> i8 {
        match self {
            Order::Difference => 1,
            Order::Function => 0,
            Order::Summation => -1,
        }
    }

    fn from_derivative(d: i8) -> Self {
        match d {
            1 => Order::Difference,
            0 => Order::Function,
            -1 => Order::Summation,
            _ => unreachable!("derivative order {d} out of range"),
        }
    }
}

/// Replaces every element by the sum of itself and everything before it.
/// Lowers the derivative order by one.
fn integrate<T: Group>(values: &mut [T]) {
    let mut acc = T::default();
    for value in values.iter_mut() {
        acc = acc + *value;
        *value = acc;
    }
}

/// The exact inverse of [`integrate`]. Raises the derivative order by one.
fn differentiate<T: Group>(values: &mut [T]) {
    for i in (1..values.len()).rev() {
        values[i] = values[i] - values[i - 1];
    }
}

/// An array supporting inclusive range additions and inclusive range sums.
///
/// The storage `A` can be an owned `Vec<T>` or a borrowed `&mut [T]`; in the latter case the
/// caller's slice is converted in place and is left in whatever order the last operation
/// needed. Use [`RangeAccumulator::convert_to`] before dropping it to pin the encoding.
///
/// Every operation takes `&mut self`, queries included, since they may convert the array.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RangeAccumulator<T, A = Vec<T>> {
    data: A,
    order: Order,
    phantom: std::marker::PhantomData<T>,
}

impl<T: Group> RangeAccumulator<T> {
    /// Creates an accumulator of `size` zeroes.
    pub fn new(size: usize) -> Self {
        Self::from_storage(vec![T::default(); size])
    }
}

impl<T: Group, A: AsRef<[T]> + AsMut<[T]>> RangeAccumulator<T, A> {
    /// Wraps an array of function values.
    pub fn from_storage(data: A) -> Self {
        Self::with_order(data, Order::Function)
    }

    /// Wraps an array that is already encoded in `order`.
    pub fn with_order(data: A, order: Order) -> Self {
        RangeAccumulator {
            data,
            order,
            phantom: std::marker::PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The encoding the array is currently in.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Converts the array to `target`, one derivative step at a time.
    /// Converting to the current order does nothing.
    /// O(N) per step.
    pub fn convert_to(&mut self, target: Order) {
        let mut current = self.order.derivative();
        let goal = target.derivative();
        while current != goal {
            if current < goal {
                differentiate(self.data.as_mut());
                current += 1;
            } else {
                integrate(self.data.as_mut());
                current -= 1;
            }
            log::trace!(
                "range accumulator of length {} converted to {:?}",
                self.len(),
                Order::from_derivative(current)
            );
        }
        self.order = target;
    }

    /// The value at `index`.
    /// O(1) in [`Order::Function`], O(N) otherwise.
    pub fn get(&mut self, index: usize) -> Result<T> {
        check_index(index, self.len())?;
        self.convert_to(Order::Function);
        Ok(self.data.as_ref()[index])
    }

    /// Sets the value at `index`.
    /// O(1) in [`Order::Function`], O(N) otherwise.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.len())?;
        self.convert_to(Order::Function);
        self.data.as_mut()[index] = value;
        Ok(())
    }

    /// Adds `value` to every element in `lo..=hi`.
    /// O(1) in [`Order::Difference`], O(N) otherwise.
    pub fn add_inclusive(&mut self, lo: usize, hi: usize, value: T) -> Result<()> {
        check_range(lo, hi, self.len())?;
        self.convert_to(Order::Difference);
        let data = self.data.as_mut();
        data[lo] = data[lo] + value;
        // past the end there is nothing to cancel
        if let Some(next) = data.get_mut(hi + 1) {
            *next = *next - value;
        }
        Ok(())
    }

    /// The sum of the elements in `lo..=hi`.
    /// O(1) in [`Order::Summation`], O(N) otherwise.
    pub fn query_inclusive(&mut self, lo: usize, hi: usize) -> Result<T> {
        check_range(lo, hi, self.len())?;
        self.convert_to(Order::Summation);
        let data = self.data.as_ref();
        let before = match lo {
            0 => T::default(),
            _ => data[lo - 1],
        };
        Ok(data[hi] - before)
    }

    /// A copy of the function values.
    /// O(N)
    pub fn to_vec(&mut self) -> Vec<T> {
        self.convert_to(Order::Function);
        self.data.as_ref().to_vec()
    }

    /// Returns the storage, converted back to function values.
    pub fn into_inner(mut self) -> A {
        self.convert_to(Order::Function);
        self.data
    }
}

impl<T: Group> From<Vec<T>> for RangeAccumulator<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_storage(values)
    }
}

impl<T: Group> FromIterator<T> for RangeAccumulator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_storage(iter.into_iter().collect())
    }
}

/// The two dimensional version of [`RangeAccumulator`]: rectangle additions and
/// rectangle sums over a `rows * cols` grid stored row-major.
///
/// Conversions apply along both axes. Integration takes row prefixes first and column
/// prefixes second; differentiation undoes them in the opposite order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RangeAccumulator2D<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    order: Order,
}

impl<T: Group> RangeAccumulator2D<T> {
    /// Creates a `rows * cols` grid of zeroes.
    pub fn new(rows: usize, cols: usize) -> Self {
        RangeAccumulator2D {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
            order: Order::Function,
        }
    }

    /// Creates a grid from its rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::RaggedRows {
                row,
                found: bad.len(),
                expected: cols,
            });
        }
        Ok(RangeAccumulator2D {
            data: rows.concat(),
            rows: rows.len(),
            cols,
            order: Order::Function,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn order(&self) -> Order {
        self.order
    }

    fn integrate(&mut self) {
        if self.cols == 0 {
            return;
        }
        for row in self.data.chunks_mut(self.cols) {
            integrate(row);
        }
        for r in 1..self.rows {
            for c in 0..self.cols {
                let above = self.data[(r - 1) * self.cols + c];
                self.data[r * self.cols + c] = self.data[r * self.cols + c] + above;
            }
        }
    }

    fn differentiate(&mut self) {
        if self.cols == 0 {
            return;
        }
        for r in (1..self.rows).rev() {
            for c in 0..self.cols {
                let above = self.data[(r - 1) * self.cols + c];
                self.data[r * self.cols + c] = self.data[r * self.cols + c] - above;
            }
        }
        for row in self.data.chunks_mut(self.cols) {
            differentiate(row);
        }
    }

    /// Converts the grid to `target`.
    /// O(rows * cols) per step.
    pub fn convert_to(&mut self, target: Order) {
        let mut current = self.order.derivative();
        let goal = target.derivative();
        while current != goal {
            if current < goal {
                self.differentiate();
                current += 1;
            } else {
                self.integrate();
                current -= 1;
            }
        }
        log::trace!(
            "{}x{} range accumulator converted to {:?}",
            self.rows,
            self.cols,
            target
        );
        self.order = target;
    }

    fn check_cell(&self, (r, c): (usize, usize)) -> Result<usize> {
        check_index(r, self.rows)?;
        check_index(c, self.cols)?;
        Ok(r * self.cols + c)
    }

    pub fn get(&mut self, cell: (usize, usize)) -> Result<T> {
        let at = self.check_cell(cell)?;
        self.convert_to(Order::Function);
        Ok(self.data[at])
    }

    pub fn set(&mut self, cell: (usize, usize), value: T) -> Result<()> {
        let at = self.check_cell(cell)?;
        self.convert_to(Order::Function);
        self.data[at] = value;
        Ok(())
    }

    /// Adds `value` to every cell of the rectangle with corners `from` and `to`, inclusive.
    pub fn add_inclusive(
        &mut self,
        (r1, c1): (usize, usize),
        (r2, c2): (usize, usize),
        value: T,
    ) -> Result<()> {
        check_range(r1, r2, self.rows)?;
        check_range(c1, c2, self.cols)?;
        self.convert_to(Order::Difference);

        let cols = self.cols;
        let in_rows = r2 + 1 < self.rows;
        let in_cols = c2 + 1 < self.cols;
        let data = &mut self.data;
        data[r1 * cols + c1] = data[r1 * cols + c1] + value;
        if in_cols {
            data[r1 * cols + c2 + 1] = data[r1 * cols + c2 + 1] - value;
        }
        if in_rows {
            data[(r2 + 1) * cols + c1] = data[(r2 + 1) * cols + c1] - value;
        }
        if in_rows && in_cols {
            data[(r2 + 1) * cols + c2 + 1] = data[(r2 + 1) * cols + c2 + 1] + value;
        }
        Ok(())
    }

    /// The sum of the rectangle with corners `from` and `to`, inclusive.
    pub fn query_inclusive(
        &mut self,
        (r1, c1): (usize, usize),
        (r2, c2): (usize, usize),
    ) -> Result<T> {
        check_range(r1, r2, self.rows)?;
        check_range(c1, c2, self.cols)?;
        self.convert_to(Order::Summation);

        // prefix sum of the rectangle `0..=r, 0..=c`, with `None` meaning "before the start"
        let prefix = |r: Option<usize>, c: Option<usize>| match (r, c) {
            (Some(r), Some(c)) => self.data[r * self.cols + c],
            _ => T::default(),
        };
        let above = r1.checked_sub(1);
        let left = c1.checked_sub(1);
        Ok(prefix(Some(r2), Some(c2)) - prefix(above, Some(c2)) - prefix(Some(r2), left)
            + prefix(above, left))
    }
}
