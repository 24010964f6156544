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

//! # Best-First Branch-and-Bound Engine
//!
//! The generic search loop shared by the exact solvers. A problem plugs in
//! through the [`BoundedProblem`] trait: it supplies the root candidate,
//! enumerates children, and prices every candidate with an admissible
//! bound. The engine owns the frontier (a priority-ordered pruning queue),
//! the incumbent bookkeeping, and the monitor and statistics plumbing.
//!
//! ## Search loop
//!
//! Candidates are expanded best-bound-first. A child enters the frontier
//! only if it is feasible and its bound can still beat (or, for
//! tie-keeping problems, match) the incumbent objective. Whenever a
//! dequeued candidate is a complete solution the incumbent is updated and
//! every queued candidate with a strictly worse bound is pruned in one
//! pass. The loop ends when the frontier is exhausted — at which point the
//! incumbents are proven optimal — or when a monitor aborts the run.
//!
//! An exhausted frontier with no incumbent proves the instance infeasible;
//! that is a regular outcome, not an error.

use bramble_search::{
    monitor::search_monitor::{NoOperationMonitor, SearchCommand, SearchMonitor},
    num::SolverNumeric,
    outcome::{SearchOutcome, TerminationReason},
    queue::{PrunableQueue, SortOrder},
    stats::SearchStatistics,
};

/// A problem solvable by best-first branch-and-bound.
///
/// Implementations provide the search tree (root and children) and the
/// pricing of candidates. The bound must be admissible with respect to
/// the configured order: with [`SortOrder::Maximum`] no completion of a
/// candidate may gain more than `bound`, with [`SortOrder::Minimum`] no
/// completion may cost less. The engine never verifies admissibility; a
/// problem that overpromises gets wrong answers, not errors.
pub trait BoundedProblem {
    /// The objective and bound type.
    type Value: SolverNumeric;
    /// A node of the search tree. Two distinct nodes must compare
    /// unequal; the frontier uses equality to detect duplicates.
    type Candidate: PartialEq;

    /// Whether the problem maximizes or minimizes its objective.
    fn order(&self) -> SortOrder;

    /// Whether candidates matching the incumbent objective exactly are
    /// kept alongside it. Tie-keeping problems collect every co-optimal
    /// solution; the default keeps the first one found.
    fn keep_ties(&self) -> bool {
        false
    }

    /// The root candidate seeding the frontier.
    fn root(&self) -> Self::Candidate;

    /// The admissible bound of a candidate. Called for every frontier
    /// comparison, so implementations cache it in the candidate.
    fn bound(&self, candidate: &Self::Candidate) -> Self::Value;

    /// Whether the candidate is a complete solution.
    fn is_solution(&self, candidate: &Self::Candidate) -> bool;

    /// The objective value of a candidate for which `is_solution` holds.
    fn objective(&self, candidate: &Self::Candidate) -> Self::Value;

    /// The children of a candidate. A candidate without children is a
    /// dead end (or a complete solution).
    fn children(&self, candidate: &Self::Candidate) -> Vec<Self::Candidate>;

    /// A hard feasibility cut applied to every generated child before the
    /// bound test. The default accepts everything; problems whose child
    /// enumeration can produce infeasible candidates override this.
    fn is_feasible(&self, _parent: &Self::Candidate, _child: &Self::Candidate) -> bool {
        true
    }
}

/// Solves the problem to proven optimality without instrumentation.
#[inline]
pub fn solve<P>(problem: &P) -> SearchOutcome<P::Candidate>
where
    P: BoundedProblem,
{
    solve_with_monitor(problem, &mut NoOperationMonitor::new())
}

/// Solves the problem, reporting lifecycle events to the given monitor.
///
/// The monitor is polled between expansions and can abort the run; an
/// aborted outcome carries the incumbents found so far, feasible but not
/// proven optimal.
pub fn solve_with_monitor<P, M>(problem: &P, monitor: &mut M) -> SearchOutcome<P::Candidate>
where
    P: BoundedProblem,
    M: SearchMonitor<P::Value>,
{
    let start = std::time::Instant::now();
    let mut statistics = SearchStatistics::new();
    let order = problem.order();
    let keep_ties = problem.keep_ties();

    monitor.on_enter_search();

    let mut frontier = PrunableQueue::new(order, |candidate: &P::Candidate| {
        problem.bound(candidate)
    });
    frontier.enqueue(problem.root());
    statistics.on_node_enqueued();
    statistics.on_frontier_size(frontier.len());

    let mut incumbents: Vec<P::Candidate> = Vec::new();
    let mut best_value: Option<P::Value> = None;
    let mut reason = TerminationReason::FrontierExhausted;

    loop {
        // The monitor is polled before touching the frontier so an aborted
        // run only counts candidates that were actually expanded.
        if let SearchCommand::Terminate(why) = monitor.search_command() {
            reason = TerminationReason::Aborted(why);
            break;
        }
        let Some(candidate) = frontier.dequeue() else {
            break;
        };
        statistics.on_node_expanded();
        monitor.on_step();

        // Children are admitted against the incumbent as it stands before
        // this candidate is scored; the prune below catches the rest.
        for child in problem.children(&candidate) {
            if !problem.is_feasible(&candidate, &child) {
                statistics.on_node_cut();
                continue;
            }
            let admitted = match best_value {
                None => true,
                Some(best) => {
                    let bound = problem.bound(&child);
                    is_better(order, bound, best) || (keep_ties && bound == best)
                }
            };
            if admitted {
                frontier.enqueue(child);
                statistics.on_node_enqueued();
                statistics.on_frontier_size(frontier.len());
            } else {
                statistics.on_node_rejected();
            }
        }

        if problem.is_solution(&candidate) {
            statistics.on_solution_found();
            let value = problem.objective(&candidate);
            let improved = match best_value {
                None => true,
                Some(best) => is_better(order, value, best),
            };
            if improved {
                incumbents.clear();
                incumbents.push(candidate);
                best_value = Some(value);
                statistics.on_incumbent_update();
                monitor.on_incumbent(value);
                statistics.on_nodes_pruned(frontier.prune_worse_than(value));
            } else if keep_ties && best_value.is_some_and(|best| value == best) {
                incumbents.push(candidate);
                statistics.on_incumbent_update();
                monitor.on_incumbent(value);
                statistics.on_nodes_pruned(frontier.prune_worse_than(value));
            }
        }
    }

    monitor.on_exit_search();
    statistics.solve_duration = start.elapsed();
    SearchOutcome::new(incumbents, reason, statistics)
}

#[inline(always)]
fn is_better<T: SolverNumeric>(order: SortOrder, a: T, b: T) -> bool {
    match order {
        SortOrder::Minimum => a < b,
        SortOrder::Maximum => a > b,
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, solve_with_monitor, BoundedProblem};
    use bramble_search::monitor::node_limit::NodeLimitMonitor;
    use bramble_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use bramble_search::outcome::TerminationReason;
    use bramble_search::queue::SortOrder;

    /// A two-level tree: the root fans out into one leaf per entry of
    /// `leaves`, each a complete solution with its value as the exact
    /// bound. Leaves with a negative value are infeasible.
    struct LeafProblem {
        leaves: Vec<i64>,
        keep_ties: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct LeafCandidate {
        leaf: Option<usize>,
        bound: i64,
    }

    impl BoundedProblem for LeafProblem {
        type Value = i64;
        type Candidate = LeafCandidate;

        fn order(&self) -> SortOrder {
            SortOrder::Minimum
        }

        fn keep_ties(&self) -> bool {
            self.keep_ties
        }

        fn root(&self) -> LeafCandidate {
            LeafCandidate {
                leaf: None,
                bound: 0,
            }
        }

        fn bound(&self, candidate: &LeafCandidate) -> i64 {
            candidate.bound
        }

        fn is_solution(&self, candidate: &LeafCandidate) -> bool {
            candidate.leaf.is_some()
        }

        fn objective(&self, candidate: &LeafCandidate) -> i64 {
            candidate.bound
        }

        fn children(&self, candidate: &LeafCandidate) -> Vec<LeafCandidate> {
            if candidate.leaf.is_some() {
                return Vec::new();
            }
            self.leaves
                .iter()
                .enumerate()
                .map(|(index, &value)| LeafCandidate {
                    leaf: Some(index),
                    bound: value,
                })
                .collect()
        }

        fn is_feasible(&self, _parent: &LeafCandidate, child: &LeafCandidate) -> bool {
            child.bound >= 0
        }
    }

    /// Records every incumbent objective reported to it.
    #[derive(Default)]
    struct RecordingMonitor {
        incumbents: Vec<i64>,
    }

    impl SearchMonitor<i64> for RecordingMonitor {
        fn name(&self) -> &str {
            "RecordingMonitor"
        }

        fn on_enter_search(&mut self) {}

        fn on_exit_search(&mut self) {}

        fn on_incumbent(&mut self, objective: i64) {
            self.incumbents.push(objective);
        }

        fn on_step(&mut self) {}

        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_finds_the_minimum_leaf() {
        let problem = LeafProblem {
            leaves: vec![7, 3, 9, 5],
            keep_ties: false,
        };
        let outcome = solve(&problem);
        assert!(outcome.is_proven());
        assert_eq!(outcome.incumbents.len(), 1);
        assert_eq!(outcome.incumbents[0].bound, 3);
    }

    #[test]
    fn test_keep_ties_collects_all_minima() {
        let problem = LeafProblem {
            leaves: vec![4, 2, 7, 2, 2],
            keep_ties: true,
        };
        let outcome = solve(&problem);
        assert!(outcome.is_proven());
        let leaves: Vec<usize> = outcome
            .incumbents
            .iter()
            .filter_map(|c| c.leaf)
            .collect();
        assert_eq!(leaves.len(), 3);
        for candidate in &outcome.incumbents {
            assert_eq!(candidate.bound, 2);
        }
        assert!(leaves.contains(&1) && leaves.contains(&3) && leaves.contains(&4));
    }

    #[test]
    fn test_without_keep_ties_first_optimum_wins() {
        let problem = LeafProblem {
            leaves: vec![2, 2],
            keep_ties: false,
        };
        let outcome = solve(&problem);
        assert_eq!(outcome.incumbents.len(), 1);
    }

    #[test]
    fn test_no_solutions_is_infeasible() {
        let problem = LeafProblem {
            leaves: Vec::new(),
            keep_ties: false,
        };
        let outcome = solve(&problem);
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason, TerminationReason::FrontierExhausted);
    }

    #[test]
    fn test_node_limit_aborts_the_search() {
        let problem = LeafProblem {
            leaves: vec![1, 2, 3],
            keep_ties: false,
        };
        let mut monitor = NodeLimitMonitor::new(1);
        let outcome = solve_with_monitor(&problem, &mut monitor);
        assert!(!outcome.is_proven());
        match &outcome.reason {
            TerminationReason::Aborted(why) => {
                assert!(why.contains("node limit"), "unexpected reason: {why}");
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
    }

    #[test]
    fn test_statistics_are_recorded() {
        let problem = LeafProblem {
            leaves: vec![6, 1, 8],
            keep_ties: false,
        };
        let outcome = solve(&problem);
        let stats = &outcome.statistics;
        // Root plus three leaves enter the frontier; the best leaf's
        // incumbent update prunes the two worse ones.
        assert_eq!(stats.nodes_enqueued, 4);
        assert_eq!(stats.nodes_pruned, 2);
        assert_eq!(stats.nodes_expanded, 2);
        assert_eq!(stats.incumbent_updates, 1);
        assert_eq!(stats.solutions_found, 1);
        // The three leaves sit in the frontier together after the root
        // expansion.
        assert_eq!(stats.frontier_peak, 3);
        assert_eq!(stats.nodes_cut, 0);
        assert_eq!(stats.nodes_rejected, 0);
    }

    #[test]
    fn test_infeasible_children_are_cut() {
        let problem = LeafProblem {
            leaves: vec![5, -1, 7],
            keep_ties: false,
        };
        let outcome = solve(&problem);
        assert_eq!(outcome.incumbents.len(), 1);
        assert_eq!(outcome.incumbents[0].bound, 5);
        assert_eq!(outcome.statistics.nodes_cut, 1);
        assert_eq!(outcome.statistics.nodes_rejected, 0);
    }

    #[test]
    fn test_tie_incumbents_notify_the_monitor() {
        let problem = LeafProblem {
            leaves: vec![2, 2, 5],
            keep_ties: true,
        };
        let mut monitor = RecordingMonitor::default();
        let outcome = solve_with_monitor(&problem, &mut monitor);
        // Both co-optimal leaves are reported, the improvement and the tie.
        assert_eq!(outcome.incumbents.len(), 2);
        assert_eq!(monitor.incumbents, vec![2, 2]);
    }

    #[test]
    fn test_aborted_run_counts_only_expanded_nodes() {
        let problem = LeafProblem {
            leaves: vec![1, 2, 3],
            keep_ties: false,
        };
        let mut monitor = NodeLimitMonitor::new(1);
        let outcome = solve_with_monitor(&problem, &mut monitor);
        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
        // Only the root was expanded before the limit hit; the queued
        // leaves never count as expanded.
        assert_eq!(outcome.statistics.nodes_expanded, 1);
    }
}
