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

//! # Bramble Search
//!
//! Problem-agnostic search infrastructure shared by the Bramble solvers:
//!
//! - `num`: The `SolverNumeric` trait alias collecting the numeric bounds
//!   every generic search component needs.
//! - `queue`: The priority-ordered pruning queue driving best-first
//!   branch-and-bound (stable insertion, re-priority, bulk pruning).
//! - `stats`: Counters and timing for a single search run.
//! - `monitor`: Observation and termination hooks around the search loop.
//! - `outcome`: The result of a finished search.

pub mod monitor;
pub mod num;
pub mod outcome;
pub mod queue;
pub mod stats;
