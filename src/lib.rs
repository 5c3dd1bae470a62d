//! Adaptable priority queue over a linked complete binary tree
//!
//! This crate provides an adaptable (locator-based) binary min-heap: a
//! priority queue of (key, value) entries where *any* entry — not just the
//! minimum — can be removed or re-keyed in O(log n) through the opaque handle
//! returned at insertion.
//!
//! Two layers, built bottom-up:
//!
//! - [`complete_tree::CompleteTree`]: a binary tree kept *complete* (every
//!   level full except the last, filled left to right), realized as linked
//!   slots in an arena. A deque of candidate parents keeps insertion and
//!   last-slot removal O(1) worst-case, with no recomputation of the shape.
//! - [`adaptable::AdaptableHeap`]: heap order on top, maintained by
//!   sift-up/sift-down through an injected [`Comparator`]. Entries are
//!   relocated by swapping slot payloads; each entry's locator is repointed
//!   after every swap so handles stay live across arbitrary reshuffling.
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::AdaptableHeap;
//!
//! let mut heap = AdaptableHeap::natural();
//! let handle = heap.insert(5, "item").unwrap();
//! heap.insert(3, "other").unwrap();
//! heap.replace_key(handle, 1).unwrap();
//! assert_eq!(heap.peek_min(), Ok((&1, &"item")));
//! ```

pub mod adaptable;
pub mod complete_tree;
pub mod pathfinding;
pub mod traits;

pub use adaptable::{AdaptableHeap, EntryId, HeapEntry};
pub use complete_tree::{CompleteTree, SlotKey};
pub use traits::{Comparator, HeapError, NaturalOrder, PartialNaturalOrder};
