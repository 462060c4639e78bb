//! Toggleable Binary Heap for Rust
//!
//! This crate provides a binary heap of key/value entries whose ordering can
//! be switched between min-heap and max-heap at run time.
//!
//! # Features
//!
//! - **Toggleable order**: [`ToggleHeap::toggle`] flips between min and max and rebuilds in O(n)
//! - **Lookup by equality**: entries are removed or updated by passing an equal [`Entry`]
//!   as a template; array positions are never exposed
//! - **In-place updates**: `replace_key` re-sifts the entry, `replace_value` leaves order untouched
//! - **Own backing store**: [`ExpandableArray`](expandable::ExpandableArray) doubles its capacity
//!   when full and never shrinks
//!
//! # Example
//!
//! ```rust
//! use rust_toggle_heap::{Entry, ToggleHeap};
//!
//! let mut heap = ToggleHeap::new();
//! heap.insert(10, "A");
//! heap.insert(5, "B");
//! heap.insert(3, "D");
//!
//! assert_eq!(heap.top(), Some(&Entry::new(3, "D")));
//! assert_eq!(heap.remove(&Entry::new(5, "B")), Some(Entry::new(5, "B")));
//!
//! heap.toggle();
//! assert_eq!(heap.state().to_string(), "Max");
//! assert_eq!(heap.remove_top().map(Entry::into_parts), Some((10, "A")));
//! ```

pub mod entry;
pub mod expandable;
pub mod toggle;
pub mod traits;

pub use entry::Entry;
pub use toggle::{HeapConfig, HeapMode, RemovePolicy, ToggleHeap};
pub use traits::{ArrayError, Heap, InvariantError};
