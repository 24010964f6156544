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

//! # Priority-Ordered Pruning Queue
//!
//! The frontier data structure of best-first branch-and-bound. Entries are
//! kept sorted by a priority computed from the value on insertion; the
//! queue supports popping the best entry, re-computing the priority of an
//! entry already present (lazy decrease-key), and pruning every entry
//! that a newly found incumbent dominates, in one pass.
//!
//! ## Ordering contract
//!
//! With [`SortOrder::Minimum`] the smallest priority dequeues first, with
//! [`SortOrder::Maximum`] the largest. Insertion uses binary search for
//! the position *after* all entries of equal priority, so ties dequeue in
//! insertion order (stable, FIFO).
//!
//! ## Cost model
//!
//! The backing store is a dense `Vec`, not a linked structure: the binary
//! search is O(log n) and the shift on insert or removal is O(n), which
//! beats pointer-chasing for the frontier sizes exact search sustains.
//! The membership guard (`contains`, duplicate detection, `try_refresh`)
//! scans linearly; values are compared by `PartialEq` identity.

use std::fmt;

/// Whether smaller or larger priorities are considered better.
///
/// A minimizing search (lower bounds, costs) uses `Minimum`; a maximizing
/// search (upper bounds, gains) uses `Maximum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smaller priorities dequeue first.
    Minimum,
    /// Larger priorities dequeue first.
    Maximum,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Minimum => write!(f, "Minimum"),
            SortOrder::Maximum => write!(f, "Maximum"),
        }
    }
}

#[derive(Clone, Debug)]
struct Node<V, P> {
    value: V,
    priority: P,
}

/// A dense-array priority queue with stable ordering and bulk pruning.
///
/// The priority of a value is computed by the selector passed at
/// construction. A value may be enqueued at most once at a time; trying
/// to enqueue a value that is already present is a caller error.
pub struct PrunableQueue<V, P, F> {
    order: SortOrder,
    priority_of: F,
    nodes: Vec<Node<V, P>>,
}

impl<V, P, F> PrunableQueue<V, P, F>
where
    V: PartialEq,
    P: PartialOrd + Copy,
    F: Fn(&V) -> P,
{
    /// Creates a new, empty queue with the given order and priority selector.
    #[inline]
    pub fn new(order: SortOrder, priority_of: F) -> Self {
        Self {
            order,
            priority_of,
            nodes: Vec::new(),
        }
    }

    /// Creates a new, empty queue with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(order: SortOrder, priority_of: F, capacity: usize) -> Self {
        Self {
            order,
            priority_of,
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the configured sort order.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns the number of entries in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the queue contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all entries from the queue.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Returns `true` if an equal value is currently queued.
    #[inline]
    pub fn contains(&self, value: &V) -> bool {
        self.nodes.iter().any(|node| node.value == *value)
    }

    /// Returns the priority of the best entry without removing it.
    #[inline]
    pub fn peek_priority(&self) -> Option<P> {
        self.nodes.first().map(|node| node.priority)
    }

    /// Inserts a value at its sorted position.
    ///
    /// Ties are placed after existing entries of equal priority, so equal
    /// candidates dequeue in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if an equal value is already present in the queue.
    pub fn enqueue(&mut self, value: V) {
        assert!(
            !self.contains(&value),
            "called `PrunableQueue::enqueue` with a value that is already present in the queue"
        );
        let priority = (self.priority_of)(&value);
        let index = self.search_index(priority);
        self.nodes.insert(index, Node { value, priority });
    }

    /// Removes and returns the best entry, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<V> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes.remove(0).value)
    }

    /// Re-computes the priority of an entry equal to `value` and moves it
    /// to its new sorted position. Returns whether the entry was present.
    ///
    /// This is the lazy decrease-key path: when an algorithm discovers a
    /// better priority for a queued item, the item's own state changed and
    /// the selector will now report the new priority.
    pub fn try_refresh(&mut self, value: &V) -> bool {
        let Some(position) = self.nodes.iter().position(|node| node.value == *value) else {
            return false;
        };
        let node = self.nodes.remove(position);
        debug_assert!(
            node.value == *value,
            "called `PrunableQueue::try_refresh` and removed a non-matching entry"
        );
        self.enqueue(node.value);
        true
    }

    /// Removes every entry whose priority is strictly worse than the given
    /// one and returns how many entries were removed.
    ///
    /// "Worse" follows the configured order: larger priorities for
    /// [`SortOrder::Minimum`], smaller for [`SortOrder::Maximum`]. Entries
    /// exactly equal to `priority` survive; whether they are still useful
    /// is the caller's tie policy, not the queue's.
    pub fn prune_worse_than(&mut self, priority: P) -> usize {
        let cut = self.search_index(priority);
        let removed = self.nodes.len() - cut;
        self.nodes.truncate(cut);
        removed
    }

    /// Returns the insertion index for the given priority: the first
    /// position whose entry is strictly worse, which is also one past the
    /// last entry of equal priority (stable ties).
    fn search_index(&self, priority: P) -> usize {
        // Binary search over the dense backing array. Indexing is O(1) and
        // the shift on insert is O(n) regardless, so this is the sweet spot.
        let mut lower = 0;
        let mut upper = self.nodes.len();

        while lower < upper {
            let pivot = lower + (upper - lower) / 2;
            let pivot_priority = self.nodes[pivot].priority;
            if self.has_higher_priority(priority, pivot_priority) {
                upper = pivot;
            } else {
                // priority is not better than the pivot: go right, so that
                // equal priorities end up before the insertion point.
                lower = pivot + 1;
            }
        }

        lower
    }

    #[inline]
    fn has_higher_priority(&self, a: P, b: P) -> bool {
        match self.order {
            SortOrder::Minimum => a < b,
            SortOrder::Maximum => a > b,
        }
    }
}

impl<V, P, F> fmt::Debug for PrunableQueue<V, P, F>
where
    V: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrunableQueue")
            .field("order", &self.order)
            .field("len", &self.nodes.len())
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<V, P, F> fmt::Display for PrunableQueue<V, P, F>
where
    V: fmt::Display,
    P: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for node in &self.nodes {
            writeln!(f, "    ({}: {})", node.priority, node.value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::{PrunableQueue, SortOrder};
    use std::cell::Cell;
    use std::rc::Rc;

    fn drain<V: PartialEq, P: PartialOrd + Copy, F: Fn(&V) -> P>(
        mut queue: PrunableQueue<V, P, F>,
    ) -> Vec<V> {
        let mut out = Vec::new();
        while let Some(value) = queue.dequeue() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_minimum_order_dequeues_smallest_first() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        for value in [5, 1, 4, 2, 3] {
            queue.enqueue(value);
        }
        assert_eq!(drain(queue), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_maximum_order_dequeues_largest_first() {
        let mut queue = PrunableQueue::new(SortOrder::Maximum, |&v: &i64| v);
        for value in [5, 1, 4, 2, 3] {
            queue.enqueue(value);
        }
        assert_eq!(drain(queue), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_equal_priorities_dequeue_in_insertion_order() {
        // Value = (id, priority); only the priority feeds the ordering.
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |v: &(u32, i64)| v.1);
        queue.enqueue((1, 7));
        queue.enqueue((2, 3));
        queue.enqueue((3, 7));
        queue.enqueue((4, 7));
        queue.enqueue((5, 3));

        let ids = drain(queue).into_iter().map(|v| v.0).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_dequeue_on_empty_queue() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        assert_eq!(queue.dequeue(), None);
        queue.enqueue(1);
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_contains_and_len() {
        let mut queue = PrunableQueue::new(SortOrder::Maximum, |&v: &i64| v);
        assert!(queue.is_empty());
        queue.enqueue(10);
        queue.enqueue(20);
        assert_eq!(queue.len(), 2);
        assert!(queue.contains(&10));
        assert!(!queue.contains(&30));
        queue.dequeue();
        assert!(!queue.contains(&20));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn test_enqueue_duplicate_panics() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        queue.enqueue(1);
        queue.enqueue(1);
    }

    #[test]
    fn test_peek_priority() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v * 10);
        assert_eq!(queue.peek_priority(), None);
        queue.enqueue(3);
        queue.enqueue(1);
        assert_eq!(queue.peek_priority(), Some(10));
    }

    /// A handle whose priority lives in shared mutable state, so a queued
    /// entry's priority can change and `try_refresh` has work to do.
    #[derive(Clone)]
    struct Handle {
        id: u32,
        priority: Rc<Cell<i64>>,
    }

    impl Handle {
        fn new(id: u32, priority: i64) -> Self {
            Self {
                id,
                priority: Rc::new(Cell::new(priority)),
            }
        }
    }

    impl PartialEq for Handle {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    #[test]
    fn test_try_refresh_repositions_entry() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |h: &Handle| h.priority.get());
        let a = Handle::new(1, 10);
        let b = Handle::new(2, 20);
        let c = Handle::new(3, 30);
        queue.enqueue(a.clone());
        queue.enqueue(b.clone());
        queue.enqueue(c);

        // b discovers a better priority and moves to the front.
        b.priority.set(5);
        assert!(queue.try_refresh(&b));
        let ids = drain(queue).into_iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_try_refresh_missing_value_returns_false() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |h: &Handle| h.priority.get());
        queue.enqueue(Handle::new(1, 10));
        assert!(!queue.try_refresh(&Handle::new(2, 20)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_prune_worse_than_minimum_order() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        for value in [4, 8, 2, 6, 10] {
            queue.enqueue(value);
        }
        // Entries strictly greater than 6 are dominated; 6 itself survives.
        let removed = queue.prune_worse_than(6);
        assert_eq!(removed, 2);
        assert_eq!(drain(queue), vec![2, 4, 6]);
    }

    #[test]
    fn test_prune_worse_than_maximum_order() {
        let mut queue = PrunableQueue::new(SortOrder::Maximum, |&v: &i64| v);
        for value in [4, 8, 2, 6, 10] {
            queue.enqueue(value);
        }
        // Entries strictly smaller than 6 are dominated; 6 itself survives.
        let removed = queue.prune_worse_than(6);
        assert_eq!(removed, 2);
        assert_eq!(drain(queue), vec![10, 8, 6]);
    }

    #[test]
    fn test_prune_with_no_dominated_entries_is_a_noop() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.prune_worse_than(5), 0);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_prune_can_empty_the_queue() {
        let mut queue = PrunableQueue::new(SortOrder::Maximum, |&v: &i64| v);
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.prune_worse_than(100), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ordering_invariant_under_mixed_operations() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |v: &(u32, i64)| v.1);
        queue.enqueue((1, 50));
        queue.enqueue((2, 10));
        queue.enqueue((3, 30));
        assert_eq!(queue.dequeue(), Some((2, 10)));
        queue.enqueue((4, 20));
        queue.enqueue((5, 40));
        queue.prune_worse_than(40);
        queue.enqueue((6, 25));

        let remaining = drain(queue);
        assert_eq!(remaining, vec![(4, 20), (6, 25), (3, 30), (5, 40)]);
    }

    #[test]
    fn test_clear() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        queue.enqueue(1);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_display_lists_entries_best_first() {
        let mut queue = PrunableQueue::new(SortOrder::Minimum, |&v: &i64| v);
        queue.enqueue(2);
        queue.enqueue(1);
        assert_eq!(format!("{}", queue), "[\n    (1: 1)\n    (2: 2)\n]");
    }
}
