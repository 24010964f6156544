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

//! # Log Monitor
//!
//! A monitor that prints a periodic progress table to stdout. It tracks
//! the incumbent objective through `on_incumbent` and emits a line at
//! most once per `log_interval`, with the clock only consulted on steps
//! passing a bitmask filter so the hot loop stays cheap.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SolverNumeric;
use std::time::{Duration, Instant};

/// A monitor that logs search progress as a `println!` table.
#[derive(Debug, Clone)]
pub struct LogSearchMonitor<T>
where
    T: SolverNumeric,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    incumbent_updates: u64,
    best_objective: Option<T>,
}

impl<T> LogSearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Default mask: Check every 4,096 steps (2^12).
    /// 4096 - 1 = 4095 = 0xFFF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0xFFF;

    const LINE_WIDTH: usize = 61;

    /// Creates a monitor that logs at most once per `log_interval`.
    #[inline]
    pub fn new(log_interval: Duration) -> Self {
        Self::with_clock_check_mask(log_interval, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    /// Creates a monitor with a custom clock-check mask. A mask of zero
    /// checks the clock on every step.
    #[inline]
    pub fn with_clock_check_mask(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            incumbent_updates: 0,
            best_objective: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<17} | {:<12}",
            "Elapsed", "Steps", "Incumbent", "Improvements"
        );
        println!("{}", "-".repeat(Self::LINE_WIDTH));
    }

    #[inline(always)]
    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed_field = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        let incumbent_field = match &self.best_objective {
            Some(objective) => format!("{}", objective),
            None => "-".to_string(),
        };

        println!(
            "{:<9} | {:<14} | {:<17} | {:<12}",
            elapsed_field, self.steps, incumbent_field, self.incumbent_updates
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl<T> std::fmt::Display for LogSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogSearchMonitor"
    }

    fn on_enter_search(&mut self) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.incumbent_updates = 0;
        self.best_objective = None;
        self.print_header();
    }

    fn on_exit_search(&mut self) {
        println!("{}", "-".repeat(Self::LINE_WIDTH));
        println!("Search finished.");
    }

    fn on_incumbent(&mut self, objective: T) {
        self.best_objective = Some(objective);
        self.incumbent_updates += 1;
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line();
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask_is_power_of_two_minus_one() {
        assert_eq!(LogSearchMonitor::<i64>::DEFAULT_STEP_CLOCK_CHECK_MASK, 0xFFF);
    }

    #[test]
    fn test_on_step_increments_steps_wrapping() {
        let mut mon = LogSearchMonitor::<i64>::new(Duration::from_secs(3600));
        mon.on_step();
        assert_eq!(mon.steps, 1);

        mon.steps = u64::MAX;
        mon.on_step();
        assert_eq!(mon.steps, 0);
    }

    #[test]
    fn test_on_incumbent_records_the_objective() {
        let mut mon = LogSearchMonitor::<i64>::default();
        assert_eq!(mon.best_objective, None);
        mon.on_incumbent(42);
        mon.on_incumbent(37);
        assert_eq!(mon.best_objective, Some(37));
        assert_eq!(mon.incumbent_updates, 2);
    }

    #[test]
    fn test_on_enter_search_resets_state() {
        let mut mon = LogSearchMonitor::<i64>::new(Duration::from_secs(3600));
        mon.steps = 99;
        mon.incumbent_updates = 3;
        mon.best_objective = Some(7);
        mon.on_enter_search();
        assert_eq!(mon.steps, 0);
        assert_eq!(mon.incumbent_updates, 0);
        assert_eq!(mon.best_objective, None);
    }

    #[test]
    fn test_never_terminates_the_search() {
        let mon = LogSearchMonitor::<i64>::default();
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_display_names_the_configuration() {
        let mon = LogSearchMonitor::<i64>::with_clock_check_mask(Duration::from_secs(2), 0);
        assert_eq!(
            format!("{}", mon),
            "LogSearchMonitor(log_interval: 2s, clock_check_mask: 0)"
        );
    }
}
