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

//! # Fixed-Capacity Index Set (Zero-Cost)
//!
//! An immutable set of small integers in `[0, 64)` packed into a single
//! `u64` mask. All operations are branch-free bit arithmetic, and the type
//! is `Copy`, so cloning a set per search branch costs nothing.
//!
//! ## Motivation
//!
//! Matrix-based search algorithms track which rows/columns (cities,
//! vertices, components) have already been consumed. A dense bitmask is
//! both the fastest and the smallest representation for the instance sizes
//! exact search can handle; 64 elements is a hard capacity, and any index
//! at or above it is a caller error.
//!
//! ## Highlights
//!
//! - Set algebra: `union`, `intersect`, `is_subset_of`.
//! - Element operations: `contains`, `with`, `without`.
//! - Constructors: `EMPTY`, `of`, `full`.
//! - Iteration yields set bits in descending order.

/// An immutable set of integers in `[0, 64)` backed by a `u64` bitmask.
///
/// Adding or removing an element produces a new set; the original is left
/// untouched. This matches the clone-per-branch discipline of the search
/// candidates that embed it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexSet {
    bits: u64,
}

impl IndexSet {
    /// The maximum number of distinct elements an `IndexSet` can hold.
    pub const CAPACITY: usize = 64;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates a set from a raw bitmask. Bit `i` set means element `i` is present.
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Returns the raw bitmask backing this set.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Creates a set containing exactly the given indices.
    ///
    /// # Panics
    ///
    /// Panics if any index is not within `0..64`.
    #[inline]
    pub fn of(indices: &[usize]) -> Self {
        let mut bits = 0u64;
        for &index in indices {
            bits |= 1u64 << validate_index(index);
        }
        Self { bits }
    }

    /// Creates the set `{0, 1, ..., size - 1}`.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds [`IndexSet::CAPACITY`].
    #[inline]
    pub fn full(size: usize) -> Self {
        assert!(
            size <= Self::CAPACITY,
            "called `IndexSet::full` with size out of bounds: the capacity is {} but the size is {}",
            Self::CAPACITY,
            size
        );
        if size == Self::CAPACITY {
            Self { bits: u64::MAX }
        } else {
            Self {
                bits: (1u64 << size) - 1,
            }
        }
    }

    /// Returns `true` if the given index is an element of this set.
    ///
    /// # Panics
    ///
    /// Panics if the index is not within `0..64`.
    #[inline]
    pub fn contains(self, index: usize) -> bool {
        self.bits & (1u64 << validate_index(index)) != 0
    }

    /// Returns a copy of this set with the given index added.
    ///
    /// # Panics
    ///
    /// Panics if the index is not within `0..64`.
    #[inline]
    pub fn with(self, index: usize) -> Self {
        Self {
            bits: self.bits | (1u64 << validate_index(index)),
        }
    }

    /// Returns a copy of this set with the given index removed.
    ///
    /// # Panics
    ///
    /// Panics if the index is not within `0..64`.
    #[inline]
    pub fn without(self, index: usize) -> Self {
        Self {
            bits: self.bits & !(1u64 << validate_index(index)),
        }
    }

    /// Returns the union of this set and `other`.
    #[inline(always)]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of this set and `other`.
    #[inline(always)]
    pub const fn intersect(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns `true` if every element of this set is also in `other`.
    #[inline(always)]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.bits & other.bits == self.bits
    }

    /// Returns the number of elements in this set.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if this set contains no elements.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns an iterator over the elements of this set in descending order.
    #[inline]
    pub fn iter(self) -> IndexSetIter {
        IndexSetIter { bits: self.bits }
    }
}

#[inline(always)]
fn validate_index(index: usize) -> usize {
    assert!(
        index < IndexSet::CAPACITY,
        "index out of bounds for `IndexSet`: the capacity is {} but the index is {}",
        IndexSet::CAPACITY,
        index
    );
    index
}

impl IntoIterator for IndexSet {
    type Item = usize;
    type IntoIter = IndexSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the elements of an [`IndexSet`], highest index first.
#[derive(Clone, Debug)]
pub struct IndexSetIter {
    bits: u64,
}

impl Iterator for IndexSetIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let index = 63 - self.bits.leading_zeros() as usize;
        self.bits &= !(1u64 << index);
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for IndexSetIter {}
impl std::iter::FusedIterator for IndexSetIter {}

impl std::fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IndexSet({:#018x})", self.bits)
    }
}

impl std::fmt::Display for IndexSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for index in 0..Self::CAPACITY {
            if self.bits & (1u64 << index) != 0 {
                write!(f, "{} ", index)?;
            }
        }
        write!(f, "}}")
    }
}
