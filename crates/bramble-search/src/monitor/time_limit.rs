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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the
//! search. It periodically checks elapsed time (using a bitmask-based step
//! filter) and requests termination once the configured `Duration` has
//! been exceeded.
//!
//! ## Highlights
//!
//! - Bitmask-driven clock checks: `(steps & clock_check_mask) == 0`
//!   triggers a check. The default mask (`0x3FFF`) checks approximately
//!   every 16,384 steps.
//! - `on_step()` uses `wrapping_add` to increment steps at minimal cost.
//! - `search_command()` returns `Terminate("time limit reached")` once
//!   elapsed time exceeds the limit at a check point; otherwise
//!   `Continue`.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SolverNumeric;

/// A monitor that terminates the search after a wall-clock time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
}

impl TimeLimitMonitor {
    /// Default mask: Check every 16,384 steps (2^14).
    /// 16384 - 1 = 16383 = 0x3FFF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    /// Creates a monitor that terminates the search after `time_limit`.
    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }

    /// Creates a monitor with a custom clock-check mask. A mask of zero
    /// checks the clock on every step.
    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_incumbent(&mut self, _objective: T) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
