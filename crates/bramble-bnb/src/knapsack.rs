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

//! # 0/1 Knapsack Solver
//!
//! An exact branch-and-bound solver for the 0/1 knapsack problem. Options
//! are sorted once, descending by gain-per-cost ratio; a candidate is a
//! canonical prefix of accept/reject decisions over that order, priced by
//! the fractional-relaxation bound
//! `accepted_gain_before_last + remaining_capacity * last.relative_gain`.
//!
//! Child generation is canonical: from a prefix of length `k`, one child
//! per undecided option `i` rejects options `k..i` and accepts option `i`.
//! Every prefix generated this way is itself a feasible selection, so
//! every dequeued candidate competes for the incumbent — including the
//! empty root, which is why an instance where nothing fits yields the
//! empty selection rather than no solution.
//!
//! For integer value types the bound divides `gain / cost` with integer
//! truncation, exactly like the relative gain it is built from; instances
//! whose ratios are not integral should use a float value type.

use crate::bnb::{self, BoundedProblem};
use bramble_model::option::KnapsackOption;
use bramble_search::{
    monitor::search_monitor::SearchMonitor,
    num::SolverNumeric,
    outcome::SearchOutcome,
    queue::SortOrder,
};
use bramble_core::num::constants::Zero;

/// The error type for [`KnapsackProblem`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    /// No options were given.
    EmptyOptions,
    /// The capacity was zero or negative.
    NonPositiveCapacity,
    /// An option's cost was zero or negative, which would break the
    /// gain-per-cost ratio the bound is built on.
    NonPositiveCost {
        /// The name of the offending option.
        name: String,
    },
}

impl std::fmt::Display for KnapsackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnapsackError::EmptyOptions => write!(f, "at least one option is required"),
            KnapsackError::NonPositiveCapacity => write!(f, "the capacity must be positive"),
            KnapsackError::NonPositiveCost { name } => {
                write!(f, "option '{}' must have a positive cost", name)
            }
        }
    }
}

impl std::error::Error for KnapsackError {}

/// One decision of a candidate's prefix: option `option_index` of the
/// ratio-sorted order was accepted or rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub option_index: usize,
    pub accepted: bool,
}

/// A node of the knapsack search tree: a canonical decision prefix with
/// its accumulated gain, cost and cached relaxation bound.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackCandidate<T> {
    selections: Vec<Selection>,
    accepted_gain: T,
    accepted_cost: T,
    bound: T,
}

impl<T> KnapsackCandidate<T>
where
    T: SolverNumeric,
{
    /// Returns the accepted/rejected decisions, in option order.
    #[inline]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Returns the total gain of the accepted options.
    #[inline]
    pub fn accepted_gain(&self) -> T {
        self.accepted_gain
    }

    /// Returns the total cost of the accepted options.
    #[inline]
    pub fn accepted_cost(&self) -> T {
        self.accepted_cost
    }
}

/// An exact 0/1 knapsack instance.
///
/// Holds the capacity and the options, re-sorted descending by
/// [`KnapsackOption::relative_gain`]. Solving returns at most one
/// solution; an instance where no option fits yields the empty selection.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackProblem<T> {
    options: Vec<KnapsackOption<T>>,
    capacity: T,
}

impl<T> KnapsackProblem<T>
where
    T: SolverNumeric,
{
    /// Creates a knapsack instance from options and a capacity.
    ///
    /// The options are sorted descending by gain-per-cost ratio; ties keep
    /// their given order.
    pub fn new(options: Vec<KnapsackOption<T>>, capacity: T) -> Result<Self, KnapsackError> {
        if options.is_empty() {
            return Err(KnapsackError::EmptyOptions);
        }
        if capacity <= T::ZERO {
            return Err(KnapsackError::NonPositiveCapacity);
        }
        for option in &options {
            if option.cost() <= T::ZERO {
                return Err(KnapsackError::NonPositiveCost {
                    name: option.name().to_string(),
                });
            }
        }
        let mut options = options;
        options.sort_by(|a, b| {
            b.relative_gain()
                .partial_cmp(&a.relative_gain())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Self { options, capacity })
    }

    /// Returns the options in the solver's ratio-sorted order.
    #[inline]
    pub fn options(&self) -> &[KnapsackOption<T>] {
        &self.options
    }

    /// Returns the capacity of the instance.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Solves the instance to proven optimality.
    #[inline]
    pub fn solve(&self) -> SearchOutcome<KnapsackSolution<T>> {
        self.to_solutions(bnb::solve(self))
    }

    /// Solves the instance, reporting lifecycle events to the monitor.
    #[inline]
    pub fn solve_with_monitor<M>(&self, monitor: &mut M) -> SearchOutcome<KnapsackSolution<T>>
    where
        M: SearchMonitor<T>,
    {
        self.to_solutions(bnb::solve_with_monitor(self, monitor))
    }

    fn to_solutions(
        &self,
        outcome: SearchOutcome<KnapsackCandidate<T>>,
    ) -> SearchOutcome<KnapsackSolution<T>> {
        let SearchOutcome {
            incumbents,
            reason,
            statistics,
        } = outcome;
        let solutions = incumbents
            .into_iter()
            .map(|candidate| KnapsackSolution {
                selections: candidate
                    .selections
                    .iter()
                    .filter(|selection| selection.accepted)
                    .map(|selection| self.options[selection.option_index].clone())
                    .collect(),
                total_gain: candidate.accepted_gain,
                total_cost: candidate.accepted_cost,
            })
            .collect();
        SearchOutcome::new(solutions, reason, statistics)
    }
}

impl<T> BoundedProblem for KnapsackProblem<T>
where
    T: SolverNumeric,
{
    type Value = T;
    type Candidate = KnapsackCandidate<T>;

    fn order(&self) -> SortOrder {
        SortOrder::Maximum
    }

    fn root(&self) -> KnapsackCandidate<T> {
        // The root's bound is never compared: it is the sole entry of the
        // initial frontier and dequeued before any other exists.
        KnapsackCandidate {
            selections: Vec::new(),
            accepted_gain: T::ZERO,
            accepted_cost: T::ZERO,
            bound: T::ZERO,
        }
    }

    #[inline]
    fn bound(&self, candidate: &KnapsackCandidate<T>) -> T {
        candidate.bound
    }

    fn is_solution(&self, _candidate: &KnapsackCandidate<T>) -> bool {
        // Every canonical prefix is a feasible selection in its own right.
        true
    }

    #[inline]
    fn objective(&self, candidate: &KnapsackCandidate<T>) -> T {
        candidate.accepted_gain
    }

    fn children(&self, parent: &KnapsackCandidate<T>) -> Vec<KnapsackCandidate<T>> {
        let decided = parent.selections.len();
        let remaining = self.capacity - parent.accepted_cost;
        let mut children = Vec::with_capacity(self.options.len() - decided);
        for index in decided..self.options.len() {
            let option = &self.options[index];
            let mut selections = Vec::with_capacity(index + 1);
            selections.extend_from_slice(&parent.selections);
            for rejected in decided..index {
                selections.push(Selection {
                    option_index: rejected,
                    accepted: false,
                });
            }
            selections.push(Selection {
                option_index: index,
                accepted: true,
            });
            children.push(KnapsackCandidate {
                selections,
                accepted_gain: parent.accepted_gain + option.gain(),
                accepted_cost: parent.accepted_cost + option.cost(),
                bound: parent.accepted_gain + remaining * option.relative_gain(),
            });
        }
        children
    }

    #[inline]
    fn is_feasible(&self, _parent: &KnapsackCandidate<T>, child: &KnapsackCandidate<T>) -> bool {
        child.accepted_cost <= self.capacity
    }
}

/// A proven selection of options.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackSolution<T> {
    selections: Vec<KnapsackOption<T>>,
    total_gain: T,
    total_cost: T,
}

impl<T> KnapsackSolution<T>
where
    T: SolverNumeric,
{
    /// Returns the accepted options, in ratio-sorted order.
    #[inline]
    pub fn selections(&self) -> &[KnapsackOption<T>] {
        &self.selections
    }

    /// Returns the names of the accepted options.
    #[inline]
    pub fn names(&self) -> Vec<&str> {
        self.selections.iter().map(|option| option.name()).collect()
    }

    /// Returns the total gain of the selection.
    #[inline]
    pub fn total_gain(&self) -> T {
        self.total_gain
    }

    /// Returns the total cost of the selection.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }
}

impl<T> std::fmt::Display for KnapsackSolution<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (position, option) in self.selections.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", option.name())?;
        }
        write!(f, "}}(Gain: {}, Cost: {})", self.total_gain, self.total_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::{KnapsackError, KnapsackProblem, KnapsackSolution};
    use bramble_model::option::KnapsackOption;
    use bramble_search::monitor::node_limit::NodeLimitMonitor;
    use bramble_search::outcome::TerminationReason;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn classic_instance() -> KnapsackProblem<i64> {
        KnapsackProblem::new(
            vec![
                KnapsackOption::new("A", 60, 10),
                KnapsackOption::new("B", 100, 20),
                KnapsackOption::new("C", 120, 30),
            ],
            50,
        )
        .unwrap()
    }

    fn best(problem: &KnapsackProblem<i64>) -> KnapsackSolution<i64> {
        let outcome = problem.solve();
        assert!(outcome.is_proven());
        assert_eq!(outcome.incumbents.len(), 1);
        outcome.into_incumbents().remove(0)
    }

    #[test]
    fn test_classic_instance_selects_b_and_c() {
        let solution = best(&classic_instance());
        assert_eq!(solution.names(), vec!["B", "C"]);
        assert_eq!(solution.total_gain(), 220);
        assert_eq!(solution.total_cost(), 50);
    }

    #[test]
    fn test_options_are_ratio_sorted() {
        let problem = KnapsackProblem::new(
            vec![
                KnapsackOption::new("C", 120, 30),
                KnapsackOption::new("A", 60, 10),
                KnapsackOption::new("B", 100, 20),
            ],
            50,
        )
        .unwrap();
        let names: Vec<&str> = problem.options().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_nothing_fits_yields_the_empty_selection() {
        let problem = KnapsackProblem::new(
            vec![
                KnapsackOption::new("A", 10, 100),
                KnapsackOption::new("B", 20, 200),
            ],
            50,
        )
        .unwrap();
        let solution = best(&problem);
        assert!(solution.selections().is_empty());
        assert_eq!(solution.total_gain(), 0);
        assert_eq!(solution.total_cost(), 0);
    }

    #[test]
    fn test_single_option_fits_exactly() {
        let problem =
            KnapsackProblem::new(vec![KnapsackOption::new("A", 5, 50)], 50).unwrap();
        let solution = best(&problem);
        assert_eq!(solution.names(), vec!["A"]);
        assert_eq!(solution.total_cost(), 50);
    }

    #[test]
    fn test_construction_rejects_empty_options() {
        let result = KnapsackProblem::<i64>::new(Vec::new(), 50);
        assert_eq!(result, Err(KnapsackError::EmptyOptions));
    }

    #[test]
    fn test_construction_rejects_non_positive_capacity() {
        let options = vec![KnapsackOption::new("A", 60, 10)];
        assert_eq!(
            KnapsackProblem::new(options.clone(), 0),
            Err(KnapsackError::NonPositiveCapacity)
        );
        assert_eq!(
            KnapsackProblem::new(options, -5),
            Err(KnapsackError::NonPositiveCapacity)
        );
    }

    #[test]
    fn test_construction_rejects_non_positive_cost() {
        let result = KnapsackProblem::new(
            vec![
                KnapsackOption::new("A", 60, 10),
                KnapsackOption::new("Broken", 10, 0),
            ],
            50,
        );
        assert_eq!(
            result,
            Err(KnapsackError::NonPositiveCost {
                name: "Broken".to_string()
            })
        );
    }

    #[test]
    fn test_monitor_can_abort_the_search() {
        let problem = classic_instance();
        let mut monitor = NodeLimitMonitor::new(1);
        let outcome = problem.solve_with_monitor(&mut monitor);
        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
    }

    #[test]
    fn test_display() {
        let solution = best(&classic_instance());
        assert_eq!(format!("{}", solution), "{B, C}(Gain: 220, Cost: 50)");
    }

    fn random_instance(rng: &mut ChaCha8Rng, size: usize) -> (Vec<(f64, f64)>, f64) {
        let raw: Vec<(f64, f64)> = (0..size)
            .map(|_| {
                (
                    rng.gen_range(1..=30u32) as f64,
                    rng.gen_range(1..=20u32) as f64,
                )
            })
            .collect();
        let capacity = rng.gen_range(10..=60u32) as f64;
        (raw, capacity)
    }

    fn brute_force_best(options: &[(f64, f64)], capacity: f64) -> f64 {
        let mut best = 0.0f64;
        for mask in 0u32..(1 << options.len()) {
            let mut gain = 0.0;
            let mut cost = 0.0;
            for (index, &(g, c)) in options.iter().enumerate() {
                if mask & (1 << index) != 0 {
                    gain += g;
                    cost += c;
                }
            }
            if cost <= capacity && gain > best {
                best = gain;
            }
        }
        best
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB4A2);
        for _ in 0..25 {
            let size = rng.gen_range(1..=10usize);
            let (raw, capacity) = random_instance(&mut rng, size);
            let options = raw
                .iter()
                .enumerate()
                .map(|(index, &(gain, cost))| {
                    KnapsackOption::new(format!("O{index}"), gain, cost)
                })
                .collect();
            let problem = KnapsackProblem::new(options, capacity).unwrap();
            let solution = {
                let outcome = problem.solve();
                assert!(outcome.is_proven());
                outcome.into_incumbents().remove(0)
            };
            let expected = brute_force_best(&raw, capacity);
            // All inputs are whole numbers; objective sums are exact in f64.
            assert_eq!(
                solution.total_gain(),
                expected,
                "instance {raw:?} capacity {capacity}"
            );
            assert!(solution.total_cost() <= capacity);
        }
    }

    #[test]
    fn test_relaxation_bound_is_admissible() {
        use crate::bnb::BoundedProblem;

        let mut rng = ChaCha8Rng::seed_from_u64(0xC0DE);
        for _ in 0..10 {
            let size = rng.gen_range(2..=8usize);
            let (raw, capacity) = random_instance(&mut rng, size);
            let options = raw
                .iter()
                .enumerate()
                .map(|(index, &(gain, cost))| {
                    KnapsackOption::new(format!("O{index}"), gain, cost)
                })
                .collect();
            let problem = KnapsackProblem::new(options, capacity).unwrap();

            // Every child of the root must bound every completion of its
            // decision prefix from above.
            for child in problem.children(&problem.root()) {
                if !problem.is_feasible(&problem.root(), &child) {
                    continue;
                }
                let decided = child.selections().len();
                let free: Vec<(f64, f64)> = problem.options()[decided..]
                    .iter()
                    .map(|o| (o.gain(), o.cost()))
                    .collect();
                let completion = child.accepted_gain()
                    + brute_force_best(&free, capacity - child.accepted_cost());
                assert!(
                    problem.bound(&child) >= completion - 1e-9,
                    "bound {} below completion {}",
                    problem.bound(&child),
                    completion
                );
            }
        }
    }
}
