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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for the search and solver components.
//! `SolverNumeric` collects the capabilities a bound or objective value
//! must have — by-value arithmetic with assignment forms, total ordering
//! of the values actually produced, a `ZERO` constant, and formatting —
//! into a single alias, so generic signatures stay readable.
//!
//! Both integer and floating-point types qualify. Infinity is *not* part
//! of the trait: matrix-based algorithms designate a sentinel value per
//! matrix instead, which keeps integer instantiations first-class.

use bramble_core::num::constants::Zero;
use num_traits::NumAssign;

/// A trait alias for numeric types usable as bounds, objectives and
/// priorities in the solvers. These are usually `i32`, `i64`, `f32` or
/// `f64`.
pub trait SolverNumeric:
    NumAssign + Copy + PartialOrd + Zero + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> SolverNumeric for T where
    T: NumAssign + Copy + PartialOrd + Zero + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
