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

//! # Insertion-Ordered Bijective Map
//!
//! A bidirectional map that keeps keys and values each unique and
//! remembers insertion order. Matrix-based algorithms use it to translate
//! between opaque labels (city names) and the dense integer indices the
//! matrices are addressed with; the insertion order doubles as the partial
//! path of a search candidate, which is why deep, independent cloning is
//! part of the contract — sibling branches grow diverging visited sets and
//! must never alias.
//!
//! Lookups in both directions are hash-based (`rustc_hash`); iteration
//! follows insertion order.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// The error type for fallible [`BiMap`] insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiMapError {
    /// The key is already registered in the map.
    DuplicateKey,
    /// The value is already registered in the map.
    DuplicateValue,
}

impl std::fmt::Display for BiMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiMapError::DuplicateKey => write!(f, "key already exists in the map"),
            BiMapError::DuplicateValue => write!(f, "value already exists in the map"),
        }
    }
}

impl std::error::Error for BiMapError {}

/// An insertion-ordered bijective map between keys and values.
///
/// Both directions are unique: inserting a key that is already present,
/// or a value that is already present, is rejected. Entries are stored in
/// insertion order and iterated in that order.
#[derive(Debug, Clone, Default)]
pub struct BiMap<K, V> {
    entries: Vec<(K, V)>,
    forward: FxHashMap<K, usize>,
    backward: FxHashMap<V, usize>,
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Creates a new, empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            forward: FxHashMap::default(),
            backward: FxHashMap::default(),
        }
    }

    /// Creates a new, empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            forward: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            backward: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts a key/value pair, maintaining the bijection.
    ///
    /// # Panics
    ///
    /// Panics if the key or the value is already registered. Use
    /// [`BiMap::try_insert`] when duplicates are an expected input error
    /// rather than a caller bug.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(error) = self.try_insert(key, value) {
            panic!("called `BiMap::insert` with a duplicate entry: {}", error);
        }
    }

    /// Inserts a key/value pair, rejecting duplicates on either side.
    #[inline]
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), BiMapError> {
        if self.forward.contains_key(&key) {
            return Err(BiMapError::DuplicateKey);
        }
        if self.backward.contains_key(&value) {
            return Err(BiMapError::DuplicateValue);
        }
        let slot = self.entries.len();
        self.forward.insert(key.clone(), slot);
        self.backward.insert(value.clone(), slot);
        self.entries.push((key, value));
        Ok(())
    }

    /// Returns the value registered for the given key, if any.
    #[inline]
    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Returns the key registered for the given value, if any.
    #[inline]
    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.backward.get(value).map(|&slot| &self.entries[slot].0)
    }

    /// Returns `true` if the given key is registered.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Returns `true` if the given value is registered.
    #[inline]
    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains_key(value)
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries from the map.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.forward.clear();
        self.backward.clear();
    }

    /// Returns an iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<K, V> std::fmt::Display for BiMap<K, V>
where
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (position, (key, value)) in self.entries.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} <-> {}", key, value)?;
        }
        write!(f, "}}")
    }
}
