// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Dense Cost Matrix
//!
//! A square matrix of a numeric type with one designated "infinity"
//! sentinel value marking forbidden edges. The sentinel is a per-matrix
//! *value*, not a property of the type, so integer matrices can use
//! `i64::MAX` (or any other flag) while float matrices use the native
//! infinity.
//!
//! Every arithmetic operation (`row_add`, `row_subtract`, `set_row`, ...)
//! skips sentinel entries: a forbidden edge stays forbidden no matter how
//! the finite costs around it are shifted. This is the contract the
//! reduced-cost-matrix lower bound relies on.
//!
//! Candidates in a branch-and-bound tree each own their own clone of the
//! matrix; the problem's root matrix is never mutated.

use bramble_core::num::constants::Zero;
use num_traits::NumAssign;

/// The error type for checked [`CostMatrix`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The requested size was zero.
    EmptyMatrix,
    /// A row's length did not match the number of rows.
    NotSquare {
        /// The offending row.
        row: usize,
        /// The number of rows (and required row length).
        expected: usize,
        /// The actual length of the offending row.
        actual: usize,
    },
    /// A diagonal entry was neither zero nor the infinity sentinel.
    BadDiagonal {
        /// The index of the offending diagonal entry.
        index: usize,
    },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::EmptyMatrix => write!(f, "matrix size must be at least 1"),
            MatrixError::NotSquare {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {} has length {} but a square matrix of size {} was expected",
                row, actual, expected
            ),
            MatrixError::BadDiagonal { index } => write!(
                f,
                "diagonal entry ({}, {}) must be zero or infinity",
                index, index
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// A dense square matrix of edge costs with an infinity sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix<T> {
    values: Vec<T>,
    size: usize,
    infinity: T,
}

impl<T> CostMatrix<T>
where
    T: NumAssign + PartialOrd + Copy + Zero,
{
    /// Creates a zero-filled matrix of the given size.
    #[inline]
    pub fn new(size: usize, infinity: T) -> Result<Self, MatrixError> {
        if size == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        Ok(Self {
            values: vec![T::ZERO; size * size],
            size,
            infinity,
        })
    }

    /// Creates a matrix from row data, validating shape and diagonal.
    ///
    /// The data must be square and every diagonal entry must be zero or
    /// the infinity sentinel; anything else on the diagonal would be a
    /// self-loop with a real cost, which no caller means to express.
    pub fn from_rows(rows: Vec<Vec<T>>, infinity: T) -> Result<Self, MatrixError> {
        let matrix = Self::from_rows_unchecked(rows, infinity)?;
        for index in 0..matrix.size {
            let diagonal = matrix[(index, index)];
            if diagonal != T::ZERO && diagonal != infinity {
                return Err(MatrixError::BadDiagonal { index });
            }
        }
        Ok(matrix)
    }

    /// Creates a matrix from row data, validating only that it is square.
    pub fn from_rows_unchecked(rows: Vec<Vec<T>>, infinity: T) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        for (row, data) in rows.iter().enumerate() {
            if data.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: size,
                    actual: data.len(),
                });
            }
        }
        let mut values = Vec::with_capacity(size * size);
        for row in rows {
            values.extend(row);
        }
        Ok(Self {
            values,
            size,
            infinity,
        })
    }

    /// Returns the number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the infinity sentinel of this matrix.
    #[inline]
    pub fn infinity(&self) -> T {
        self.infinity
    }

    /// Returns `true` if the entry at the given position is the sentinel.
    #[inline]
    pub fn is_infinite(&self, row: usize, column: usize) -> bool {
        self[(row, column)] == self.infinity
    }

    /// Returns the minimum of the non-infinite entries in the given row,
    /// or zero if every entry in the row is infinite.
    pub fn row_min(&self, row: usize) -> T {
        let mut min = self.infinity;
        for &value in self.row(row) {
            if value != self.infinity && (min == self.infinity || value < min) {
                min = value;
            }
        }
        if min == self.infinity {
            return T::ZERO;
        }
        min
    }

    /// Returns the minimum of the non-infinite entries in the given column,
    /// or zero if every entry in the column is infinite.
    pub fn column_min(&self, column: usize) -> T {
        self.check_column(column);
        let mut min = self.infinity;
        for row in 0..self.size {
            let value = self.values[row * self.size + column];
            if value != self.infinity && (min == self.infinity || value < min) {
                min = value;
            }
        }
        if min == self.infinity {
            return T::ZERO;
        }
        min
    }

    /// Adds `value` to every non-infinite entry in the given row.
    pub fn row_add(&mut self, row: usize, value: T) {
        let infinity = self.infinity;
        for entry in self.row_mut(row) {
            if *entry != infinity {
                *entry += value;
            }
        }
    }

    /// Adds `value` to every non-infinite entry in the given column.
    pub fn column_add(&mut self, column: usize, value: T) {
        self.check_column(column);
        let infinity = self.infinity;
        for row in 0..self.size {
            let entry = &mut self.values[row * self.size + column];
            if *entry != infinity {
                *entry += value;
            }
        }
    }

    /// Subtracts `value` from every non-infinite entry in the given row.
    pub fn row_subtract(&mut self, row: usize, value: T) {
        let infinity = self.infinity;
        for entry in self.row_mut(row) {
            if *entry != infinity {
                *entry -= value;
            }
        }
    }

    /// Subtracts `value` from every non-infinite entry in the given column.
    pub fn column_subtract(&mut self, column: usize, value: T) {
        self.check_column(column);
        let infinity = self.infinity;
        for row in 0..self.size {
            let entry = &mut self.values[row * self.size + column];
            if *entry != infinity {
                *entry -= value;
            }
        }
    }

    /// Overwrites every non-infinite entry in the given row with `value`.
    ///
    /// Passing the sentinel closes the row out entirely, the operation a
    /// reduced-matrix bound performs after committing an outgoing edge.
    pub fn set_row(&mut self, row: usize, value: T) {
        let infinity = self.infinity;
        for entry in self.row_mut(row) {
            if *entry != infinity {
                *entry = value;
            }
        }
    }

    /// Overwrites every non-infinite entry in the given column with `value`.
    pub fn set_column(&mut self, column: usize, value: T) {
        self.check_column(column);
        let infinity = self.infinity;
        for row in 0..self.size {
            let entry = &mut self.values[row * self.size + column];
            if *entry != infinity {
                *entry = value;
            }
        }
    }

    /// Reduces the matrix in place and returns the total reduction cost.
    ///
    /// Subtracts each row's minimum finite value from the row, then each
    /// column's minimum finite value from the column. Afterwards every row
    /// and column either contains a zero or is entirely infinite, and the
    /// returned sum of subtracted minima lower-bounds the cost of any
    /// assignment that uses one entry per row and column.
    pub fn reduce(&mut self) -> T {
        let mut cost = T::ZERO;
        for row in 0..self.size {
            let min = self.row_min(row);
            self.row_subtract(row, min);
            cost += min;
        }
        for column in 0..self.size {
            let min = self.column_min(column);
            self.column_subtract(column, min);
            cost += min;
        }
        cost
    }

    #[inline]
    fn row(&self, row: usize) -> &[T] {
        self.check_row(row);
        &self.values[row * self.size..(row + 1) * self.size]
    }

    #[inline]
    fn row_mut(&mut self, row: usize) -> &mut [T] {
        self.check_row(row);
        &mut self.values[row * self.size..(row + 1) * self.size]
    }

    #[inline(always)]
    fn check_row(&self, row: usize) {
        assert!(
            row < self.size,
            "row out of bounds for `CostMatrix`: the size is {} but the row is {}",
            self.size,
            row
        );
    }

    #[inline(always)]
    fn check_column(&self, column: usize) {
        assert!(
            column < self.size,
            "column out of bounds for `CostMatrix`: the size is {} but the column is {}",
            self.size,
            column
        );
    }
}

impl<T> std::ops::Index<(usize, usize)> for CostMatrix<T>
where
    T: NumAssign + PartialOrd + Copy + Zero,
{
    type Output = T;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.check_row(row);
        self.check_column(column);
        &self.values[row * self.size + column]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for CostMatrix<T>
where
    T: NumAssign + PartialOrd + Copy + Zero,
{
    #[inline]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        self.check_row(row);
        self.check_column(column);
        &mut self.values[row * self.size + column]
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: NumAssign + PartialOrd + Copy + Zero + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .values
            .iter()
            .map(|&value| {
                if value == self.infinity {
                    "\u{221e}".to_string()
                } else {
                    value.to_string()
                }
            })
            .collect::<Vec<_>>();
        let width = cells.iter().map(|cell| cell.len()).max().unwrap_or(1);

        for row in 0..self.size {
            for column in 0..self.size {
                if column > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cells[row * self.size + column])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
