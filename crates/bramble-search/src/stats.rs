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

/// Statistics collected over a single branch-and-bound run.
///
/// The counters are updated incrementally by the search loop through the
/// `on_*` methods and reported as part of the final outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Number of candidates taken off the frontier and expanded.
    pub nodes_expanded: u64,
    /// Number of candidates admitted to the frontier.
    pub nodes_enqueued: u64,
    /// Number of generated candidates discarded by the feasibility cut
    /// before the bound test.
    pub nodes_cut: u64,
    /// Number of generated candidates rejected by the bound test before
    /// ever entering the frontier.
    pub nodes_rejected: u64,
    /// Number of queued candidates removed by bulk pruning after an
    /// incumbent improvement.
    pub nodes_pruned: u64,
    /// Largest number of candidates held by the frontier at any point.
    pub frontier_peak: u64,
    /// Number of complete solutions taken off the frontier, improving or
    /// not.
    pub solutions_found: u64,
    /// Number of times the incumbent was replaced or extended.
    pub incumbent_updates: u64,
    /// Total duration of the search.
    pub solve_duration: std::time::Duration,
}

impl SearchStatistics {
    /// Creates a new statistics record with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded += 1;
    }

    #[inline(always)]
    pub fn on_node_enqueued(&mut self) {
        self.nodes_enqueued += 1;
    }

    #[inline(always)]
    pub fn on_node_cut(&mut self) {
        self.nodes_cut += 1;
    }

    #[inline(always)]
    pub fn on_node_rejected(&mut self) {
        self.nodes_rejected += 1;
    }

    #[inline(always)]
    pub fn on_nodes_pruned(&mut self, count: usize) {
        self.nodes_pruned += count as u64;
    }

    /// Records the current frontier size, keeping the peak.
    #[inline(always)]
    pub fn on_frontier_size(&mut self, len: usize) {
        self.frontier_peak = self.frontier_peak.max(len as u64);
    }

    #[inline(always)]
    pub fn on_solution_found(&mut self) {
        self.solutions_found += 1;
    }

    #[inline(always)]
    pub fn on_incumbent_update(&mut self) {
        self.incumbent_updates += 1;
    }

    /// Total number of candidates generated, admitted or not.
    #[inline]
    pub fn nodes_generated(&self) -> u64 {
        self.nodes_enqueued + self.nodes_cut + self.nodes_rejected
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes Enqueued: {}", self.nodes_enqueued)?;
        writeln!(f, "  Nodes Cut: {}", self.nodes_cut)?;
        writeln!(f, "  Nodes Rejected: {}", self.nodes_rejected)?;
        writeln!(f, "  Nodes Pruned: {}", self.nodes_pruned)?;
        writeln!(f, "  Frontier Peak: {}", self.frontier_peak)?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Incumbent Updates: {}", self.incumbent_updates)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStatistics;
    use std::time::Duration;

    #[test]
    fn test_new_starts_at_zero() {
        let stats = SearchStatistics::new();
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.nodes_enqueued, 0);
        assert_eq!(stats.nodes_cut, 0);
        assert_eq!(stats.nodes_rejected, 0);
        assert_eq!(stats.nodes_pruned, 0);
        assert_eq!(stats.frontier_peak, 0);
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.incumbent_updates, 0);
        assert_eq!(stats.solve_duration, Duration::ZERO);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = SearchStatistics::new();
        stats.on_node_expanded();
        stats.on_node_enqueued();
        stats.on_node_enqueued();
        stats.on_node_cut();
        stats.on_node_rejected();
        stats.on_nodes_pruned(5);
        stats.on_solution_found();
        stats.on_incumbent_update();

        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.nodes_enqueued, 2);
        assert_eq!(stats.nodes_cut, 1);
        assert_eq!(stats.nodes_rejected, 1);
        assert_eq!(stats.nodes_pruned, 5);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.incumbent_updates, 1);
        assert_eq!(stats.nodes_generated(), 4);
    }

    #[test]
    fn test_frontier_peak_keeps_the_maximum() {
        let mut stats = SearchStatistics::new();
        stats.on_frontier_size(3);
        stats.on_frontier_size(7);
        stats.on_frontier_size(2);
        assert_eq!(stats.frontier_peak, 7);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SearchStatistics {
            nodes_expanded: 10,
            nodes_enqueued: 20,
            nodes_cut: 4,
            nodes_rejected: 5,
            nodes_pruned: 3,
            frontier_peak: 8,
            solutions_found: 6,
            incumbent_updates: 2,
            solve_duration: Duration::from_millis(1234),
        };

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Search Statistics:"), "missing header");
        assert!(rendered.contains("Nodes Expanded: 10"));
        assert!(rendered.contains("Nodes Enqueued: 20"));
        assert!(rendered.contains("Nodes Cut: 4"));
        assert!(rendered.contains("Nodes Rejected: 5"));
        assert!(rendered.contains("Nodes Pruned: 3"));
        assert!(rendered.contains("Frontier Peak: 8"));
        assert!(rendered.contains("Solutions Found: 6"));
        assert!(rendered.contains("Incumbent Updates: 2"));
        assert!(rendered.contains("Solve Duration (secs): 1.234"));
    }
}
