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

//! # Travelling-Salesman Solver
//!
//! An exact branch-and-bound solver for the (possibly asymmetric) TSP
//! over a dense [`CostMatrix`]. Candidates carry their own clone of the
//! matrix, row/column-reduced; the reduction cost accumulates into an
//! admissible lower bound while the true tour cost accumulates separately
//! from the original matrix.
//!
//! Committing an edge `current -> next` closes the departure row, the
//! arrival column and the reverse edge with the infinity sentinel before
//! re-reducing. Once every city is visited a single closing child returns
//! to the start, provided the closing edge is still finite.
//!
//! Unlike the knapsack solver this search keeps ties: the result is the
//! complete set of co-optimal tours, and on a symmetric instance that set
//! contains each optimal cycle in both directions.

use crate::bnb::{self, BoundedProblem};
use bramble_core::index_set::IndexSet;
use bramble_core::num::constants::Zero;
use bramble_model::bimap::BiMap;
use bramble_model::matrix::CostMatrix;
use bramble_search::{
    monitor::search_monitor::SearchMonitor,
    num::SolverNumeric,
    outcome::SearchOutcome,
    queue::SortOrder,
};

/// The error type for [`TspProblem`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TspError {
    /// The number of labels did not match the matrix size.
    SizeMismatch {
        /// The number of labels given.
        labels: usize,
        /// The number of cities in the matrix.
        cities: usize,
    },
    /// Two cities carried the same label.
    DuplicateLabel {
        /// The offending label.
        label: String,
    },
    /// The instance has more cities than the visited mask can hold.
    TooManyCities {
        /// The number of cities in the matrix.
        size: usize,
    },
}

impl std::fmt::Display for TspError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TspError::SizeMismatch { labels, cities } => write!(
                f,
                "{} labels were given for a matrix of {} cities",
                labels, cities
            ),
            TspError::DuplicateLabel { label } => {
                write!(f, "the label '{}' is used more than once", label)
            }
            TspError::TooManyCities { size } => write!(
                f,
                "the instance has {} cities but at most {} are supported",
                size,
                IndexSet::CAPACITY
            ),
        }
    }
}

impl std::error::Error for TspError {}

/// A node of the tour search tree.
///
/// Owns the partial tour (insertion-ordered label map plus a bitmask for
/// O(1) membership) and its own reduced matrix. `lower_bound` is the
/// admissible bound priced into the frontier; `total_cost` is the true
/// cost accumulated from the original matrix and only meaningful as an
/// objective once the tour is closed.
#[derive(Clone, Debug)]
pub struct TspCandidate<T> {
    current: usize,
    visited: BiMap<String, usize>,
    mask: IndexSet,
    reduced: CostMatrix<T>,
    lower_bound: T,
    total_cost: T,
    closed: bool,
}

impl<T> TspCandidate<T>
where
    T: SolverNumeric,
{
    /// Returns the admissible lower bound of every tour through this
    /// partial tour.
    #[inline]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    /// Returns the accumulated true cost of the partial tour.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns `true` once the tour has returned to its start.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<T> PartialEq for TspCandidate<T>
where
    T: SolverNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        // The visit order (plus the closed flag) identifies a node; the
        // matrices and bounds are derived from it.
        self.closed == other.closed
            && self.current == other.current
            && self.mask == other.mask
            && self.visited.iter().eq(other.visited.iter())
    }
}

/// An exact travelling-salesman instance: labelled cities over a checked
/// cost matrix.
///
/// Solving returns the complete set of co-optimal closed tours; an
/// instance without a finite closed tour yields an empty set.
#[derive(Clone, Debug)]
pub struct TspProblem<T> {
    labels: Vec<String>,
    index_of: BiMap<String, usize>,
    matrix: CostMatrix<T>,
}

impl<T> TspProblem<T>
where
    T: SolverNumeric,
{
    /// Creates a TSP instance from city labels and a cost matrix.
    ///
    /// The label at position `i` names the city of row and column `i`;
    /// the tour starts (and ends) at the first label.
    pub fn new(labels: Vec<String>, matrix: CostMatrix<T>) -> Result<Self, TspError> {
        if labels.len() != matrix.size() {
            return Err(TspError::SizeMismatch {
                labels: labels.len(),
                cities: matrix.size(),
            });
        }
        if matrix.size() > IndexSet::CAPACITY {
            return Err(TspError::TooManyCities {
                size: matrix.size(),
            });
        }
        let mut index_of = BiMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if index_of.try_insert(label.clone(), index).is_err() {
                return Err(TspError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        Ok(Self {
            labels,
            index_of,
            matrix,
        })
    }

    /// Returns the city labels in matrix order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the label/index bijection of the instance.
    #[inline]
    pub fn index_of(&self) -> &BiMap<String, usize> {
        &self.index_of
    }

    /// Returns the cost matrix of the instance.
    #[inline]
    pub fn matrix(&self) -> &CostMatrix<T> {
        &self.matrix
    }

    /// Solves the instance to proven optimality, returning every
    /// co-optimal tour.
    #[inline]
    pub fn solve(&self) -> SearchOutcome<TourSolution<T>> {
        self.to_solutions(bnb::solve(self))
    }

    /// Solves the instance, reporting lifecycle events to the monitor.
    #[inline]
    pub fn solve_with_monitor<M>(&self, monitor: &mut M) -> SearchOutcome<TourSolution<T>>
    where
        M: SearchMonitor<T>,
    {
        self.to_solutions(bnb::solve_with_monitor(self, monitor))
    }

    fn to_solutions(
        &self,
        outcome: SearchOutcome<TspCandidate<T>>,
    ) -> SearchOutcome<TourSolution<T>> {
        let SearchOutcome {
            incumbents,
            reason,
            statistics,
        } = outcome;
        let solutions = incumbents
            .into_iter()
            .map(|candidate| {
                let mut path: Vec<String> = candidate
                    .visited
                    .iter()
                    .map(|(label, _)| label.clone())
                    .collect();
                path.push(self.labels[0].clone());
                TourSolution {
                    path,
                    total_cost: candidate.total_cost,
                }
            })
            .collect();
        SearchOutcome::new(solutions, reason, statistics)
    }
}

impl<T> BoundedProblem for TspProblem<T>
where
    T: SolverNumeric,
{
    type Value = T;
    type Candidate = TspCandidate<T>;

    fn order(&self) -> SortOrder {
        SortOrder::Minimum
    }

    fn keep_ties(&self) -> bool {
        true
    }

    fn root(&self) -> TspCandidate<T> {
        let mut reduced = self.matrix.clone();
        let lower_bound = reduced.reduce();
        let mut visited = BiMap::with_capacity(1);
        visited.insert(self.labels[0].clone(), 0);
        TspCandidate {
            current: 0,
            visited,
            mask: IndexSet::of(&[0]),
            reduced,
            lower_bound,
            total_cost: T::ZERO,
            closed: false,
        }
    }

    #[inline]
    fn bound(&self, candidate: &TspCandidate<T>) -> T {
        candidate.lower_bound
    }

    fn is_solution(&self, candidate: &TspCandidate<T>) -> bool {
        candidate.closed
    }

    #[inline]
    fn objective(&self, candidate: &TspCandidate<T>) -> T {
        candidate.total_cost
    }

    fn children(&self, parent: &TspCandidate<T>) -> Vec<TspCandidate<T>> {
        if parent.closed {
            return Vec::new();
        }

        let size = self.matrix.size();
        let infinity = self.matrix.infinity();

        if parent.visited.len() == size {
            // Everything is visited; the only move left closes the tour.
            let close_cost = parent.reduced[(parent.current, 0)];
            if close_cost == infinity {
                return Vec::new();
            }
            let mut matrix = parent.reduced.clone();
            matrix.set_row(parent.current, infinity);
            matrix.set_column(0, infinity);
            matrix[(0, parent.current)] = infinity;
            let reduction = matrix.reduce();
            return vec![TspCandidate {
                current: 0,
                visited: parent.visited.clone(),
                mask: parent.mask,
                reduced: matrix,
                lower_bound: parent.lower_bound + close_cost + reduction,
                total_cost: parent.total_cost + self.matrix[(parent.current, 0)],
                closed: true,
            }];
        }

        let mut children = Vec::with_capacity(size - parent.visited.len());
        for city in 0..size {
            if parent.mask.contains(city) {
                continue;
            }
            let step_cost = parent.reduced[(parent.current, city)];
            if step_cost == infinity {
                // No edge left into this city from here.
                continue;
            }
            let mut matrix = parent.reduced.clone();
            matrix.set_row(parent.current, infinity);
            matrix.set_column(city, infinity);
            // Block the reverse edge so the new city cannot immediately
            // step back.
            matrix[(city, parent.current)] = infinity;
            let reduction = matrix.reduce();
            let mut visited = parent.visited.clone();
            visited.insert(self.labels[city].clone(), city);
            children.push(TspCandidate {
                current: city,
                visited,
                mask: parent.mask.with(city),
                reduced: matrix,
                lower_bound: parent.lower_bound + step_cost + reduction,
                total_cost: parent.total_cost + self.matrix[(parent.current, city)],
                closed: false,
            });
        }
        children
    }
}

/// A proven closed tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSolution<T> {
    path: Vec<String>,
    total_cost: T,
}

impl<T> TourSolution<T>
where
    T: SolverNumeric,
{
    /// Returns the tour as city labels in visit order, including the
    /// closing return to the start.
    #[inline]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Returns the total cost of the tour.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }
}

impl<T> std::fmt::Display for TourSolution<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, label) in self.path.iter().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, " (Cost: {})", self.total_cost)
    }
}
