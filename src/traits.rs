//! Common traits and error types
//!
//! - [`Heap`]: the priority-queue interface implemented by
//!   [`ToggleHeap`](crate::toggle::ToggleHeap)
//! - [`ArrayError`]: out-of-range access on the backing array
//! - [`InvariantError`]: reported by the `check_invariants` methods

use thiserror::Error;

/// Error type for backing array access
///
/// An out-of-range index is a caller bug, not a recoverable condition; the
/// heap never produces one for indices it has already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// The index is not below the current length
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The requested index
        index: usize,
        /// The array length at the time of the request
        len: usize,
    },
}

/// Error returned when an internal structural invariant is violated
///
/// Carries a human-readable description of the first violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Base trait for heap/priority queue data structures
///
/// The API follows Rust's `BinaryHeap` naming:
/// - `push` inserts an element
/// - `pop` removes and returns the top element
/// - `peek` returns the top element without removing it
///
/// Unlike `BinaryHeap`, entries are (priority, item) pairs so the ordering
/// key is kept separate from the payload. Which end counts as the "top"
/// depends on the implementation.
///
/// # Example
///
/// ```rust
/// use rust_toggle_heap::Heap;
/// use rust_toggle_heap::toggle::ToggleHeap;
///
/// let mut heap = ToggleHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, priority: P, item: T);

    /// Returns the top priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the top priority and associated item
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}
