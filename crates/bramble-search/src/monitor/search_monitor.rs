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

use crate::num::SolverNumeric;

/// Control flow command issued by a monitor after each step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search. The string carries the reason for termination.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Lifecycle hooks around the branch-and-bound loop.
///
/// The loop calls `on_enter_search` once before the first expansion,
/// `on_step` after every expansion, `on_incumbent` whenever a complete
/// solution improves the incumbent (or, on tie-keeping problems, matches
/// it exactly), and `on_exit_search` once after the loop ends. Between steps the loop polls `search_command`; a
/// `Terminate` answer aborts the search with the given reason.
///
/// `T` is the objective type of the search being observed.
pub trait SearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Human-readable name of the monitor, used in diagnostics.
    fn name(&self) -> &str;
    /// Called once when the search starts.
    fn on_enter_search(&mut self);
    /// Called once when the search ends, regardless of the reason.
    fn on_exit_search(&mut self);
    /// Called whenever a complete solution is admitted as incumbent.
    fn on_incumbent(&mut self, objective: T);
    /// Called after each node expansion.
    fn on_step(&mut self);
    /// Polled between steps to decide whether the search may continue.
    fn search_command(&self) -> SearchCommand;
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// A monitor that observes nothing and never terminates the search.
///
/// The default choice when a solver is run without instrumentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> SearchMonitor<T> for NoOperationMonitor
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    fn on_enter_search(&mut self) {}

    fn on_exit_search(&mut self) {}

    fn on_incumbent(&mut self, _objective: T) {}

    #[inline(always)]
    fn on_step(&mut self) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
