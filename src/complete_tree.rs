//! Complete binary tree with O(1) last-slot tracking
//!
//! A [`CompleteTree`] is a binary tree constrained to stay *complete*: every
//! level full except possibly the last, which fills left to right. The tree is
//! realized as linked slots inside a slotmap arena, so slot references stay
//! stable while elements move between slots via [`CompleteTree::swap`].
//!
//! The shape invariant is maintained incrementally, not recomputed. A deque of
//! candidate parents (slots with room for another child, ordered front-to-back
//! by level-order index) makes both [`add`](CompleteTree::add) and
//! [`remove_last`](CompleteTree::remove_last) O(1) worst-case:
//!
//! - every new slot is a leaf and joins the back of the deque;
//! - the front of the deque is the attachment point for the next add, and is
//!   popped once it gains its right child;
//! - the back of the deque is always the last slot in level-order, so removal
//!   never has to search for it.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `add`         | O(1)       |
//! | `remove_last` | O(1)       |
//! | `last`        | O(1)       |
//! | `swap`        | O(1)       |
//! | navigation    | O(1)       |
//!
//! The tree never inspects its elements; payload semantics (heap order,
//! in particular) belong to the layer above.

use crate::traits::HeapError;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;
use std::mem;

new_key_type! {
    /// Stable reference to a slot in a [`CompleteTree`]
    ///
    /// Keys are generational: a key detached by `remove_last` never aliases a
    /// slot created later.
    pub struct SlotKey;
}

#[derive(Debug)]
struct Slot<E> {
    element: E,
    parent: Option<SlotKey>,
    left: Option<SlotKey>,
    right: Option<SlotKey>,
}

impl<E> Slot<E> {
    fn leaf(element: E, parent: Option<SlotKey>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }
}

/// A complete binary tree of linked slots over an arena
///
/// # Example
///
/// ```rust
/// use adaptable_heap::complete_tree::CompleteTree;
///
/// let mut tree = CompleteTree::new();
/// let a = tree.add('a');
/// let b = tree.add('b');
/// assert_eq!(tree.root(), Some(a));
/// assert_eq!(tree.left(a), Some(b));
/// assert_eq!(tree.remove_last(), Ok('b'));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Debug)]
pub struct CompleteTree<E> {
    slots: SlotMap<SlotKey, Slot<E>>,
    root: Option<SlotKey>,
    /// Slots with room for another child, in level-order index order.
    /// Front = next attachment point, back = last slot of the tree.
    open: VecDeque<SlotKey>,
}

impl<E> CompleteTree<E> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            root: None,
            open: VecDeque::new(),
        }
    }

    /// Returns the number of slots in the tree
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the tree has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Inserts an element just after the current last slot, keeping the tree
    /// complete, and returns the new slot
    ///
    /// O(1) worst-case: the attachment point is the front candidate.
    pub fn add(&mut self, element: E) -> SlotKey {
        match self.open.front().copied() {
            None => {
                let key = self.slots.insert(Slot::leaf(element, None));
                self.root = Some(key);
                self.open.push_back(key);
                key
            }
            Some(parent) => {
                let key = self.slots.insert(Slot::leaf(element, Some(parent)));
                if self.slots[parent].left.is_none() {
                    self.slots[parent].left = Some(key);
                } else {
                    self.slots[parent].right = Some(key);
                    // Parent is now full and stops being a candidate.
                    self.open.pop_front();
                }
                self.open.push_back(key);
                key
            }
        }
    }

    /// Detaches the last slot (highest level-order index) and returns its
    /// element
    ///
    /// O(1) worst-case. When the detached slot was a right child, its parent
    /// regains room and re-enters the candidate deque at the *front*: it has
    /// the lowest level-order index of any slot with room.
    pub fn remove_last(&mut self) -> Result<E, HeapError> {
        let last = self.open.pop_back().ok_or(HeapError::EmptyStructure)?;
        let slot = self
            .slots
            .remove(last)
            .ok_or(HeapError::EmptyStructure)?;

        match slot.parent {
            Some(parent) => {
                let p = &mut self.slots[parent];
                if p.right == Some(last) {
                    p.right = None;
                    self.open.push_front(parent);
                } else {
                    p.left = None;
                }
            }
            None => {
                self.root = None;
            }
        }
        Ok(slot.element)
    }

    /// Returns the last slot without detaching it
    pub fn last(&self) -> Option<SlotKey> {
        self.open.back().copied()
    }

    /// Exchanges the elements of two distinct live slots in place
    ///
    /// Tree shape and parent/child links are untouched; only the payloads
    /// move. No-op if the keys are equal or stale.
    pub fn swap(&mut self, a: SlotKey, b: SlotKey) {
        if let Some([sa, sb]) = self.slots.get_disjoint_mut([a, b]) {
            mem::swap(&mut sa.element, &mut sb.element);
        }
    }

    /// Returns the root slot, if any
    pub fn root(&self) -> Option<SlotKey> {
        self.root
    }

    /// Returns true if the slot is the root
    pub fn is_root(&self, slot: SlotKey) -> bool {
        self.root == Some(slot)
    }

    /// Returns the parent of a slot, or None for the root or a stale key
    pub fn parent(&self, slot: SlotKey) -> Option<SlotKey> {
        self.slots.get(slot).and_then(|s| s.parent)
    }

    /// Returns the left child of a slot, if it has one
    pub fn left(&self, slot: SlotKey) -> Option<SlotKey> {
        self.slots.get(slot).and_then(|s| s.left)
    }

    /// Returns the right child of a slot, if it has one
    pub fn right(&self, slot: SlotKey) -> Option<SlotKey> {
        self.slots.get(slot).and_then(|s| s.right)
    }

    /// Returns true if the slot has a left child
    pub fn has_left(&self, slot: SlotKey) -> bool {
        self.left(slot).is_some()
    }

    /// Returns true if the slot has a right child
    pub fn has_right(&self, slot: SlotKey) -> bool {
        self.right(slot).is_some()
    }

    /// Returns the element stored in a slot
    pub fn get(&self, slot: SlotKey) -> Option<&E> {
        self.slots.get(slot).map(|s| &s.element)
    }

    /// Returns the element stored in a slot, mutably
    pub fn get_mut(&mut self, slot: SlotKey) -> Option<&mut E> {
        self.slots.get_mut(slot).map(|s| &mut s.element)
    }
}

impl<E> Default for CompleteTree<E> {
    fn default() -> Self {
        Self::new()
    }
}
