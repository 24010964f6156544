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

//! The immutable item description of a 0/1 knapsack instance.

use num_traits::Num;

/// A single selectable item: a name, the gain of taking it and the cost
/// it adds to the knapsack.
///
/// The gain/cost ratio drives both the branching order and the fractional
/// relaxation bound of the branch-and-bound solver, so the numeric type
/// should support exact division; use a floating-point type unless every
/// ratio in the instance happens to be integral.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackOption<T> {
    name: String,
    gain: T,
    cost: T,
}

impl<T> KnapsackOption<T>
where
    T: Num + Copy,
{
    /// Creates a new option.
    #[inline]
    pub fn new(name: impl Into<String>, gain: T, cost: T) -> Self {
        Self {
            name: name.into(),
            gain,
            cost,
        }
    }

    /// Returns the name of this option.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the gain of accepting this option.
    #[inline]
    pub fn gain(&self) -> T {
        self.gain
    }

    /// Returns the cost of accepting this option.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the gain per unit of cost.
    #[inline]
    pub fn relative_gain(&self) -> T {
        self.gain / self.cost
    }
}

impl<T> std::fmt::Display for KnapsackOption<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(gain: {}, cost: {})",
            self.name, self.gain, self.cost
        )
    }
}
