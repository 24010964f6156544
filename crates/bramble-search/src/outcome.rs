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

use crate::stats::SearchStatistics;

/// Why the search loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The frontier ran empty: every candidate was either expanded or
    /// pruned, so the incumbents are proven optimal (or the instance is
    /// proven infeasible if there are none).
    FrontierExhausted,
    /// A monitor aborted the search. The string carries the monitor's
    /// reason; the incumbents, if any, are feasible but not proven
    /// optimal.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::FrontierExhausted => write!(f, "Frontier Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", *reason),
        }
    }
}

/// The result of a finished branch-and-bound run.
///
/// `S` is the solver's solution type. `incumbents` holds every solution
/// the solver retained; solvers that keep a single best solution store
/// one entry, solvers that keep all co-optimal solutions store several.
/// An empty list with [`TerminationReason::FrontierExhausted`] proves the
/// instance infeasible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<S> {
    pub incumbents: Vec<S>,
    pub reason: TerminationReason,
    pub statistics: SearchStatistics,
}

impl<S> SearchOutcome<S> {
    #[inline]
    pub fn new(incumbents: Vec<S>, reason: TerminationReason, statistics: SearchStatistics) -> Self {
        Self {
            incumbents,
            reason,
            statistics,
        }
    }

    /// Returns `true` if the search explored the whole frontier, so the
    /// incumbents are proven optimal.
    #[inline]
    pub fn is_proven(&self) -> bool {
        matches!(self.reason, TerminationReason::FrontierExhausted)
    }

    /// Returns `true` if the instance is proven infeasible: the frontier
    /// was exhausted without any incumbent.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.incumbents.is_empty() && self.is_proven()
    }

    /// Returns the first incumbent, if any.
    #[inline]
    pub fn best(&self) -> Option<&S> {
        self.incumbents.first()
    }

    /// Consumes the outcome and returns the incumbents.
    #[inline]
    pub fn into_incumbents(self) -> Vec<S> {
        self.incumbents
    }
}

impl<S> std::fmt::Display for SearchOutcome<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "SearchOutcome({} incumbent(s), {})",
            self.incumbents.len(),
            self.reason
        )?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchOutcome, TerminationReason};
    use crate::stats::SearchStatistics;

    #[test]
    fn test_proven_outcome_with_incumbents() {
        let outcome = SearchOutcome::new(
            vec![42],
            TerminationReason::FrontierExhausted,
            SearchStatistics::new(),
        );
        assert!(outcome.is_proven());
        assert!(!outcome.is_infeasible());
        assert_eq!(outcome.best(), Some(&42));
        assert_eq!(outcome.into_incumbents(), vec![42]);
    }

    #[test]
    fn test_empty_proven_outcome_is_infeasible() {
        let outcome = SearchOutcome::<i64>::new(
            Vec::new(),
            TerminationReason::FrontierExhausted,
            SearchStatistics::new(),
        );
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.best(), None);
    }

    #[test]
    fn test_aborted_outcome_is_not_proven() {
        let outcome = SearchOutcome::new(
            vec![1],
            TerminationReason::Aborted("time limit reached".to_string()),
            SearchStatistics::new(),
        );
        assert!(!outcome.is_proven());
        assert!(!outcome.is_infeasible());
        assert_eq!(outcome.best(), Some(&1));
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(
            format!("{}", TerminationReason::FrontierExhausted),
            "Frontier Exhausted"
        );
        assert_eq!(
            format!("{}", TerminationReason::Aborted("node limit reached".to_string())),
            "Aborted: node limit reached"
        );
    }
}
