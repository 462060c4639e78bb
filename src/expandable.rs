//! Growable backing array for the binary heap
//!
//! [`ExpandableArray`] is a zero-indexed, randomly accessible sequence that
//! owns a fixed-length backing store of slots. Appending to a full array
//! allocates a store of double the length and moves every element across;
//! the store never shrinks.
//!
//! # Time Complexity
//!
//! | Operation | Complexity     |
//! |-----------|----------------|
//! | `add`     | O(1) amortized |
//! | `get`     | O(1)           |
//! | `set`     | O(1)           |
//! | `remove`  | O(n - index)   |
//!
//! # Example
//!
//! ```rust
//! use rust_toggle_heap::expandable::ExpandableArray;
//!
//! let mut array = ExpandableArray::with_capacity(2);
//! array.add("a");
//! array.add("b");
//! array.add("c");
//!
//! assert_eq!(array.capacity(), 4);
//! assert_eq!(array.remove(0), Ok("a"));
//! assert_eq!(array.to_string(), "[b, c]");
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use log::trace;

use crate::traits::{ArrayError, InvariantError};

/// Capacity used by [`ExpandableArray::new`]
pub const DEFAULT_CAPACITY: usize = 10;

/// A resizable array with capacity doubling and shift-on-remove
///
/// Slots `[0, len)` always hold live elements and slots `[len, capacity)`
/// are always empty, so removed elements are dropped immediately rather than
/// lingering in the backing store.
#[derive(Clone)]
pub struct ExpandableArray<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T> ExpandableArray<T> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Self::allocate(capacity),
            len: 0,
        }
    }

    fn allocate(capacity: usize) -> Box<[Option<T>]> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    /// Returns the number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the backing store
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.len {
            Ok(())
        } else {
            Err(ArrayError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns a reference to the element at `index`
    ///
    /// # Errors
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, ArrayError> {
        self.check_index(index)?;
        Ok(self.slot(index))
    }

    /// Returns a mutable reference to the element at `index`
    ///
    /// # Errors
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        self.check_index(index)?;
        Ok(self.slot_mut(index))
    }

    /// Overwrites the element at `index`, returning the previous one
    ///
    /// # Errors
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, ArrayError> {
        self.check_index(index)?;
        Ok(std::mem::replace(self.slot_mut(index), value))
    }

    /// Appends an element, doubling the backing store when it is full
    pub fn add(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Removes the element at `index`, shifting every later element left
    ///
    /// # Errors
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, ArrayError> {
        self.check_index(index)?;
        // Rotating the removed slot to the end shifts [index+1, len) left by one
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        match self.slots[self.len].take() {
            Some(value) => Ok(value),
            None => unreachable!("live slot {} was empty", self.len),
        }
    }

    /// Swaps the elements at `a` and `b`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        if let Err(err) = self.check_index(a.max(b)) {
            panic!("{}", err);
        }
        self.slots.swap(a, b);
    }

    /// Iterates over the live elements in index order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().flatten()
    }

    /// Drops every element, keeping the backing store
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }

    /// Verifies that exactly the slots below `len` are occupied
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len > self.slots.len() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len,
                self.slots.len()
            )));
        }
        if let Some(i) = self.slots[..self.len].iter().position(Option::is_none) {
            return Err(InvariantError::new(format!("live slot {} is empty", i)));
        }
        if let Some(i) = self.slots[self.len..].iter().position(Option::is_some) {
            return Err(InvariantError::new(format!(
                "slot {} past len {} still holds an element",
                self.len + i,
                self.len
            )));
        }
        Ok(())
    }

    fn grow(&mut self) {
        let new_capacity = (self.slots.len() * 2).max(1);
        trace!(
            "expandable array growing: {} -> {} slots",
            self.slots.len(),
            new_capacity
        );
        let mut slots = Self::allocate(new_capacity);
        for (dst, src) in slots.iter_mut().zip(self.slots.iter_mut()) {
            *dst = src.take();
        }
        self.slots = slots;
    }

    #[inline]
    fn slot(&self, index: usize) -> &T {
        match &self.slots[index] {
            Some(value) => value,
            None => unreachable!("live slot {} was empty", index),
        }
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut T {
        match &mut self.slots[index] {
            Some(value) => value,
            None => unreachable!("live slot {} was empty", index),
        }
    }
}

impl<T> Default for ExpandableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for ExpandableArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for ExpandableArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ExpandableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ExpandableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}
