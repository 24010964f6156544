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

//! # Node Limit Monitor
//!
//! A monitor that caps the number of expanded nodes. Useful for bounding
//! worst-case work on adversarial instances where a wall-clock budget is
//! too coarse, or for reproducible truncated runs in tests.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SolverNumeric;

/// A monitor that terminates the search after a fixed number of node
/// expansions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    node_limit: u64,
    steps: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor that terminates the search after `node_limit`
    /// expansions.
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self {
            node_limit,
            steps: 0,
        }
    }

    /// Returns the number of expansions observed so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl<T> SearchMonitor<T> for NodeLimitMonitor
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self) {
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_incumbent(&mut self, _objective: T) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.steps >= self.node_limit {
            return SearchCommand::Terminate("node limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(mon: &NodeLimitMonitor) -> SearchCommand {
        SearchMonitor::<i64>::search_command(mon)
    }

    #[test]
    fn test_continues_below_the_limit() {
        let mut mon = NodeLimitMonitor::new(3);
        assert_eq!(command(&mon), SearchCommand::Continue);
        SearchMonitor::<i64>::on_step(&mut mon);
        SearchMonitor::<i64>::on_step(&mut mon);
        assert_eq!(command(&mon), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_at_the_limit() {
        let mut mon = NodeLimitMonitor::new(2);
        SearchMonitor::<i64>::on_step(&mut mon);
        SearchMonitor::<i64>::on_step(&mut mon);
        match command(&mon) {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("node limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_limit_terminates_immediately() {
        let mon = NodeLimitMonitor::new(0);
        assert!(matches!(command(&mon), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_on_enter_search_resets_counter() {
        let mut mon = NodeLimitMonitor::new(1);
        SearchMonitor::<i64>::on_step(&mut mon);
        assert!(matches!(command(&mon), SearchCommand::Terminate(_)));
        SearchMonitor::<i64>::on_enter_search(&mut mon);
        assert_eq!(mon.steps(), 0);
        assert_eq!(command(&mon), SearchCommand::Continue);
    }
}
