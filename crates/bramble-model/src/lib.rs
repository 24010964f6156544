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

//! # Bramble Model
//!
//! Problem-state data structures shared by the Bramble solvers:
//!
//! - `matrix`: A dense square cost matrix with a designated infinity
//!   sentinel, row/column arithmetic and the row/column reduction used by
//!   matrix-based lower bounds.
//! - `bimap`: An insertion-ordered bijective map between opaque labels and
//!   dense integer indices.
//! - `option`: The immutable item description of a knapsack instance.
//!
//! All types here are passive: they validate their own construction and
//! expose read/transform operations, but contain no search logic.

pub mod bimap;
pub mod matrix;
pub mod option;
