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

//! # Search Monitors
//!
//! Pluggable observers and controllers for search lifecycle events.
//! Monitors can collect telemetry, enforce budgets (time, expanded nodes)
//! and issue termination commands without entangling those concerns in
//! the branch-and-bound loop itself.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor<T>`) and the
//!   `SearchCommand` enum defining lifecycle hooks and control flow.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `log`: Periodic progress table printed to stdout.
//! - `node_limit`: Budget on the number of expanded nodes.
//! - `time_limit`: Wall-clock time budget with step-filtered clock checks.

pub mod composite;
pub mod log;
pub mod node_limit;
pub mod search_monitor;
pub mod time_limit;
