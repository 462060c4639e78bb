//! Key/value entries stored by the heap
//!
//! An [`Entry`] is identified by value, not by position: two entries are
//! equal when both their keys and their values are equal. Callers locate a
//! stored entry for removal or replacement by passing an equal entry as a
//! lookup template.

use std::fmt;

/// A key/value pair held by a [`ToggleHeap`](crate::toggle::ToggleHeap)
///
/// The key determines heap order; the value is an opaque payload.
///
/// # Example
///
/// ```rust
/// use rust_toggle_heap::Entry;
///
/// let entry = Entry::new(7, "seven");
/// assert_eq!(entry.key(), &7);
/// assert_eq!(entry.to_string(), "Entry{key=7, value=seven}");
/// assert_eq!(entry, Entry::from((7, "seven")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry, typically used as a lookup template
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Splits the entry into its key and value
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    // Key changes must go through the heap so it can restore order.
    pub(crate) fn replace_key(&mut self, key: K) -> K {
        std::mem::replace(&mut self.key, key)
    }

    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry{{key={}, value={}}}", self.key, self.value)
    }
}
