//! Binary heap with switchable min/max ordering
//!
//! [`ToggleHeap`] keeps key/value [`Entry`] records in an
//! [`ExpandableArray`] laid out as an implicit binary tree: the root is at
//! index 0 and the children of `i` are at `2i + 1` and `2i + 2`. A single
//! comparator, chosen by the current [`HeapMode`], drives every sift, so
//! flipping the mode with [`toggle`](ToggleHeap::toggle) only needs one
//! bottom-up rebuild.
//!
//! Stored entries are never addressed by index from outside. `remove`,
//! `replace_key` and `replace_value` take an entry template and act on the
//! first stored entry equal to it (same key and same value) in array order.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `insert`        | O(log n)   |
//! | `top`           | O(1)       |
//! | `remove_top`    | O(log n)   |
//! | `remove`        | O(n)       |
//! | `replace_key`   | O(n)       |
//! | `replace_value` | O(n)       |
//! | `toggle`        | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use rust_toggle_heap::{Entry, HeapMode, ToggleHeap};
//!
//! let mut heap = ToggleHeap::new();
//! heap.insert(10, "A");
//! heap.insert(5, "B");
//! heap.insert(20, "C");
//!
//! assert_eq!(heap.top().map(Entry::key), Some(&5));
//! assert_eq!(heap.replace_key(&Entry::new(20, "C"), 1), Some(20));
//! assert_eq!(heap.top(), Some(&Entry::new(1, "C")));
//!
//! heap.toggle();
//! assert_eq!(heap.state(), HeapMode::Max);
//! assert_eq!(heap.remove_top(), Some(Entry::new(10, "A")));
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::entry::Entry;
use crate::expandable::{ExpandableArray, DEFAULT_CAPACITY};
use crate::traits::{Heap, InvariantError};

/// Which end of the key order sits at the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeapMode {
    /// Smallest key at the root
    #[default]
    Min,
    /// Largest key at the root
    Max,
}

impl HeapMode {
    /// Returns the opposite mode
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            HeapMode::Min => HeapMode::Max,
            HeapMode::Max => HeapMode::Min,
        }
    }
}

impl fmt::Display for HeapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapMode::Min => f.write_str("Min"),
            HeapMode::Max => f.write_str("Max"),
        }
    }
}

/// How [`ToggleHeap::remove`] restores order after filling the hole
///
/// The hole left by a removed entry is filled with the last entry in the
/// array. That entry can be better than its new parent as well as worse than
/// its new children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovePolicy {
    /// Only sift down from the hole
    ///
    /// Heap order can be left violated when the moved entry beats its new
    /// parent. [`check_invariants`](ToggleHeap::check_invariants) reports it.
    #[default]
    SiftDown,
    /// Sift up when the moved entry beats its new parent, otherwise sift down
    Restore,
}

/// Construction parameters for a [`ToggleHeap`]
///
/// # Example
///
/// ```rust
/// use rust_toggle_heap::{HeapConfig, HeapMode, RemovePolicy, ToggleHeap};
///
/// let config = HeapConfig::default()
///     .with_mode(HeapMode::Max)
///     .with_initial_capacity(64)
///     .with_remove_policy(RemovePolicy::Restore);
/// let heap: ToggleHeap<u32, &str> = ToggleHeap::with_config(config);
/// assert_eq!(heap.state(), HeapMode::Max);
/// assert_eq!(heap.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeapConfig {
    /// Initial ordering mode
    pub mode: HeapMode,
    /// Initial capacity of the backing array
    pub initial_capacity: usize,
    /// Order restoration used by `remove`
    pub remove_policy: RemovePolicy,
}

impl HeapConfig {
    /// Sets the initial ordering mode
    pub fn with_mode(mut self, mode: HeapMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial capacity of the backing array
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the order restoration used by `remove`
    pub fn with_remove_policy(mut self, remove_policy: RemovePolicy) -> Self {
        self.remove_policy = remove_policy;
        self
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            mode: HeapMode::Min,
            initial_capacity: DEFAULT_CAPACITY,
            remove_policy: RemovePolicy::SiftDown,
        }
    }
}

/// A binary heap of key/value entries that can switch between min and max order
///
/// Entries with equal keys are allowed. Entries that are equal in both key and
/// value are allowed too, but lookups always resolve to the first one in
/// array order.
#[derive(Clone)]
pub struct ToggleHeap<K, V> {
    data: ExpandableArray<Entry<K, V>>,
    mode: HeapMode,
    remove_policy: RemovePolicy,
}

impl<K: Ord, V> ToggleHeap<K, V> {
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Creates an empty heap in the given mode
    pub fn with_mode(mode: HeapMode) -> Self {
        Self::with_config(HeapConfig::default().with_mode(mode))
    }

    /// Creates an empty heap from a [`HeapConfig`]
    pub fn with_config(config: HeapConfig) -> Self {
        Self {
            data: ExpandableArray::with_capacity(config.initial_capacity),
            mode: config.mode,
            remove_policy: config.remove_policy,
        }
    }

    /// Returns the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the backing array
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the current ordering mode
    #[inline]
    pub fn state(&self) -> HeapMode {
        self.mode
    }

    /// Returns the policy used by [`remove`](Self::remove)
    #[inline]
    pub fn remove_policy(&self) -> RemovePolicy {
        self.remove_policy
    }

    /// Inserts a new entry and returns a reference to it
    ///
    /// Clone the returned entry to keep a template for later `remove` or
    /// `replace_*` calls.
    pub fn insert(&mut self, key: K, value: V) -> &Entry<K, V> {
        self.data.add(Entry::new(key, value));
        let index = self.sift_up(self.data.len() - 1);
        &self.data[index]
    }

    /// Returns the root entry without removing it
    pub fn top(&self) -> Option<&Entry<K, V>> {
        self.data.get(0).ok()
    }

    /// Removes and returns the root entry
    pub fn remove_top(&mut self) -> Option<Entry<K, V>> {
        if self.data.is_empty() {
            return None;
        }

        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.remove(last).ok()?;
        // No-op when the heap just became empty
        self.sift_down(0);
        Some(top)
    }

    /// Flips between min and max order and rebuilds the heap
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
        trace!("toggle: now {} with {} entries", self.mode, self.data.len());
        for index in (0..self.data.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Iterates over the entries in backing-array order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.data.iter()
    }

    /// Removes every entry, keeping the mode and capacity
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Checks that no parent compares worse than its children
    ///
    /// # Errors
    /// Returns the first violating parent/child pair in array order, or a
    /// backing array inconsistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.data.check_invariants()?;
        for child in 1..self.data.len() {
            let parent = Self::parent(child);
            if self.compare(self.key(parent), self.key(child)) == Ordering::Greater {
                return Err(InvariantError::new(format!(
                    "{}-heap order violated: parent {} is worse than child {}",
                    self.mode, parent, child
                )));
            }
        }
        Ok(())
    }

    /// Natural key order in min mode, reversed in max mode
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        match self.mode {
            HeapMode::Min => a.cmp(b),
            HeapMode::Max => b.cmp(a),
        }
    }

    #[inline]
    fn key(&self, index: usize) -> &K {
        self.data[index].key()
    }

    #[inline]
    fn parent(index: usize) -> usize {
        (index - 1) / 2
    }

    /// Move entry at index up while it beats its parent; returns its final index
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = Self::parent(index);
            if self.compare(self.key(index), self.key(parent)) == Ordering::Less {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Move entry at index down while a child beats it
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut best = index;

            if left < len && self.compare(self.key(left), self.key(best)) == Ordering::Less {
                best = left;
            }
            if right < len && self.compare(self.key(right), self.key(best)) == Ordering::Less {
                best = right;
            }

            if best != index {
                self.data.swap(index, best);
                index = best;
            } else {
                break;
            }
        }
    }
}

impl<K: Ord, V: PartialEq> ToggleHeap<K, V> {
    /// Returns true if an entry equal to `template` is stored
    pub fn contains(&self, template: &Entry<K, V>) -> bool {
        self.find_entry(template).is_some()
    }

    /// Removes the first entry equal to `template`
    ///
    /// Returns `None` and leaves the heap untouched when nothing matches.
    /// The hole is filled with the last entry and then repaired according to
    /// the heap's [`RemovePolicy`].
    pub fn remove(&mut self, template: &Entry<K, V>) -> Option<Entry<K, V>> {
        let Some(index) = self.find_entry(template) else {
            debug!("remove: no matching entry among {} entries", self.data.len());
            return None;
        };

        let last = self.data.len() - 1;
        self.data.swap(index, last);
        let removed = self.data.remove(last).ok()?;
        match self.remove_policy {
            RemovePolicy::SiftDown => self.sift_down(index),
            RemovePolicy::Restore => {
                if index < self.data.len() && self.sift_up(index) == index {
                    self.sift_down(index);
                }
            }
        }
        Some(removed)
    }

    /// Changes the key of the first entry equal to `template`
    ///
    /// Returns the previous key, or `None` if nothing matches. The entry is
    /// sifted down when the new key is worse than the old one under the
    /// current mode, and up otherwise.
    pub fn replace_key(&mut self, template: &Entry<K, V>, new_key: K) -> Option<K> {
        let Some(index) = self.find_entry(template) else {
            debug!("replace_key: no matching entry among {} entries", self.data.len());
            return None;
        };

        let old_key = self.data[index].replace_key(new_key);
        if self.compare(self.key(index), &old_key) == Ordering::Greater {
            self.sift_down(index);
        } else {
            self.sift_up(index);
        }
        Some(old_key)
    }

    /// Changes the value of the first entry equal to `template`
    ///
    /// Returns the previous value, or `None` if nothing matches. Order is
    /// key-based so nothing moves.
    pub fn replace_value(&mut self, template: &Entry<K, V>, new_value: V) -> Option<V> {
        let Some(index) = self.find_entry(template) else {
            debug!(
                "replace_value: no matching entry among {} entries",
                self.data.len()
            );
            return None;
        };

        Some(self.data[index].replace_value(new_value))
    }

    fn find_entry(&self, template: &Entry<K, V>) -> Option<usize> {
        self.data.iter().position(|entry| entry == template)
    }
}

impl<K: Ord, V> Heap<V, K> for ToggleHeap<K, V> {
    fn new() -> Self {
        ToggleHeap::new()
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: K, item: V) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&K, &V)> {
        self.top().map(|entry| (entry.key(), entry.value()))
    }

    fn pop(&mut self) -> Option<(K, V)> {
        self.remove_top().map(Entry::into_parts)
    }

    fn merge(&mut self, mut other: Self) {
        while let Some(entry) = other.remove_top() {
            let (key, value) = entry.into_parts();
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> Default for ToggleHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for ToggleHeap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ToggleHeap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ToggleHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleHeap")
            .field("mode", &self.mode)
            .field("remove_policy", &self.remove_policy)
            .field("data", &self.data)
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for ToggleHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{{key={}, value={}}}", entry.key(), entry.value())?;
        }
        Ok(())
    }
}
