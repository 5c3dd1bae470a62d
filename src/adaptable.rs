//! Adaptable priority queue over a [`CompleteTree`]
//!
//! An [`AdaptableHeap`] is a min-heap of (key, value) entries that supports
//! O(log n) removal and key replacement for *any* entry, not just the minimum.
//! Every insert hands back an [`EntryId`] locator; the heap keeps each
//! locator pointed at the tree slot currently holding its entry, repointing
//! after every element swap, so an arbitrary entry can be found, detached, or
//! re-keyed without searching.
//!
//! Ordering is delegated to an injected [`Comparator`]; the heap itself never
//! compares keys directly.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `insert`        | O(log n)   |
//! | `peek_min`      | O(1)       |
//! | `extract_min`   | O(log n)   |
//! | `remove_entry`  | O(log n)   |
//! | `replace_key`   | O(log n)   |
//! | `replace_value` | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::AdaptableHeap;
//!
//! let mut heap = AdaptableHeap::natural();
//! heap.insert(5, "five").unwrap();
//! let three = heap.insert(3, "three").unwrap();
//! heap.insert(1, "one").unwrap();
//!
//! assert_eq!(heap.peek_min(), Ok((&1, &"one")));
//! heap.remove_entry(three).unwrap();
//! assert_eq!(heap.extract_min(), Ok((1, "one")));
//! assert_eq!(heap.extract_min(), Ok((5, "five")));
//! ```

use crate::complete_tree::{CompleteTree, SlotKey};
use crate::traits::{Comparator, HeapError, NaturalOrder};
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;
use std::fmt;
use std::mem;

new_key_type! {
    /// Opaque handle to one entry of an [`AdaptableHeap`]
    ///
    /// Returned by [`AdaptableHeap::insert`] and accepted by the arbitrary
    /// entry operations. Handles are `Copy` and generational: once the entry
    /// is removed, every copy of its handle is permanently stale and any use
    /// fails with [`HeapError::InvalidEntry`].
    pub struct EntryId;
}

/// One (key, value) entry as stored in the tree
///
/// Exposed read-only through [`AdaptableHeap::tree`] so a renderer can walk
/// the structure; there is no public way to mutate an entry in place.
pub struct HeapEntry<K, V> {
    key: K,
    value: V,
    id: EntryId,
}

impl<K, V> HeapEntry<K, V> {
    /// The entry's key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The handle identifying this entry
    pub fn id(&self) -> EntryId {
        self.id
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HeapEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

/// An adaptable (locator-based) min-heap
///
/// Entries live inside the slots of a [`CompleteTree`]; the `locs` map is the
/// private back-reference from each live [`EntryId`] to the slot currently
/// holding its entry. Invariant after every public operation: for every live
/// id, `tree[locs[id]].id == id`.
pub struct AdaptableHeap<K, V> {
    tree: CompleteTree<HeapEntry<K, V>>,
    locs: SlotMap<EntryId, SlotKey>,
    cmp: Box<dyn Comparator<K>>,
}

impl<K: Ord, V> AdaptableHeap<K, V> {
    /// Creates an empty heap ordered by the key type's natural order
    pub fn natural() -> Self {
        Self::new(NaturalOrder)
    }
}

impl<K, V> AdaptableHeap<K, V> {
    /// Creates an empty heap with the given comparator
    pub fn new(comparator: impl Comparator<K> + 'static) -> Self {
        Self {
            tree: CompleteTree::new(),
            locs: SlotMap::with_key(),
            cmp: Box::new(comparator),
        }
    }

    /// Replaces the comparator
    ///
    /// # Errors
    /// [`HeapError::InvalidState`] if the heap is non-empty: re-ordering
    /// existing entries under a new comparator would silently break heap
    /// order, so the swap is only allowed while there is nothing to order.
    pub fn set_comparator(
        &mut self,
        comparator: impl Comparator<K> + 'static,
    ) -> Result<(), HeapError> {
        if !self.is_empty() {
            return Err(HeapError::InvalidState);
        }
        self.cmp = Box::new(comparator);
        Ok(())
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the heap has no entries
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns true if the handle refers to a live entry of this heap
    pub fn contains(&self, id: EntryId) -> bool {
        self.locs.contains_key(id)
    }

    /// Inserts a key-value pair and returns the new entry's handle
    ///
    /// O(log n).
    ///
    /// # Errors
    /// [`HeapError::InvalidKey`] if the comparator rejects the key; the heap
    /// is unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<EntryId, HeapError> {
        if !self.cmp.is_valid_key(&key) {
            return Err(HeapError::InvalidKey);
        }
        let tree = &mut self.tree;
        let id = self
            .locs
            .insert_with_key(|id| tree.add(HeapEntry { key, value, id }));
        let slot = self.locs[id];
        self.sift_up(slot);
        Ok(id)
    }

    /// Returns the handle of the minimum entry without removing it
    ///
    /// O(1).
    ///
    /// # Errors
    /// [`HeapError::EmptyStructure`] if the heap is empty.
    pub fn min_entry(&self) -> Result<EntryId, HeapError> {
        let root = self.tree.root().ok_or(HeapError::EmptyStructure)?;
        let entry = self.tree.get(root).ok_or(HeapError::EmptyStructure)?;
        Ok(entry.id)
    }

    /// Returns the minimum entry's key and value without removing it
    ///
    /// O(1).
    ///
    /// # Errors
    /// [`HeapError::EmptyStructure`] if the heap is empty.
    pub fn peek_min(&self) -> Result<(&K, &V), HeapError> {
        let root = self.tree.root().ok_or(HeapError::EmptyStructure)?;
        let entry = self.tree.get(root).ok_or(HeapError::EmptyStructure)?;
        Ok((&entry.key, &entry.value))
    }

    /// Removes and returns the minimum entry
    ///
    /// O(log n). The returned pair is owned; the minimum's handle is stale
    /// from this point on.
    ///
    /// # Errors
    /// [`HeapError::EmptyStructure`] if the heap is empty.
    pub fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let root = self.tree.root().ok_or(HeapError::EmptyStructure)?;
        let last = self.tree.last().ok_or(HeapError::EmptyStructure)?;
        if root == last {
            return self.detach_last();
        }

        // Relocate the last entry to the root, detach the old minimum from
        // the now-last slot, then repair downward from the root.
        self.swap_slots(root, last);
        let min = self.detach_last()?;
        self.sift_down(root);
        Ok(min)
    }

    /// Removes and returns the entry identified by the handle
    ///
    /// O(log n). The handle (and every copy of it) is stale afterwards.
    ///
    /// # Errors
    /// [`HeapError::InvalidEntry`] if the handle is stale or foreign; the
    /// heap is unchanged.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<(K, V), HeapError> {
        let slot = self.slot_of(id)?;
        let last = self.tree.last().ok_or(HeapError::EmptyStructure)?;
        if slot == last {
            // Covers both the single-entry heap and a target that already
            // sits in the last slot: no relocation, no repair.
            return self.detach_last();
        }

        self.swap_slots(slot, last);
        let removed = self.detach_last()?;
        // The formerly-last entry now sits at `slot`. It satisfied heap order
        // against its old neighbors, so at most one direction of repair fires
        // against the new ones.
        self.restore(slot);
        Ok(removed)
    }

    /// Replaces the key of the entry identified by the handle, returning the
    /// old key
    ///
    /// O(log n). The entry keeps its handle and value; it is re-sifted up or
    /// down as the new key requires.
    ///
    /// # Errors
    /// [`HeapError::InvalidEntry`] if the handle is stale or foreign,
    /// [`HeapError::InvalidKey`] if the comparator rejects the new key. Both
    /// are detected before any mutation.
    pub fn replace_key(&mut self, id: EntryId, key: K) -> Result<K, HeapError> {
        let slot = self.slot_of(id)?;
        if !self.cmp.is_valid_key(&key) {
            return Err(HeapError::InvalidKey);
        }
        let entry = self.tree.get_mut(slot).ok_or(HeapError::InvalidEntry)?;
        let old = mem::replace(&mut entry.key, key);
        self.restore(slot);
        Ok(old)
    }

    /// Replaces the value of the entry identified by the handle, returning
    /// the old value
    ///
    /// O(1); ordering and positions are untouched.
    ///
    /// # Errors
    /// [`HeapError::InvalidEntry`] if the handle is stale or foreign.
    pub fn replace_value(&mut self, id: EntryId, value: V) -> Result<V, HeapError> {
        let slot = self.slot_of(id)?;
        let entry = self.tree.get_mut(slot).ok_or(HeapError::InvalidEntry)?;
        Ok(mem::replace(&mut entry.value, value))
    }

    /// Returns the key of a live entry
    pub fn key(&self, id: EntryId) -> Result<&K, HeapError> {
        let slot = self.slot_of(id)?;
        let entry = self.tree.get(slot).ok_or(HeapError::InvalidEntry)?;
        Ok(&entry.key)
    }

    /// Returns the value of a live entry
    pub fn value(&self, id: EntryId) -> Result<&V, HeapError> {
        let slot = self.slot_of(id)?;
        let entry = self.tree.get(slot).ok_or(HeapError::InvalidEntry)?;
        Ok(&entry.value)
    }

    /// Read-only access to the underlying tree, for visualization
    ///
    /// The shared reference permits traversal (root, parent, children) and
    /// reading entries, but no mutation of slots or entries.
    pub fn tree(&self) -> &CompleteTree<HeapEntry<K, V>> {
        &self.tree
    }

    /// Resolves a handle to the slot currently holding its entry
    fn slot_of(&self, id: EntryId) -> Result<SlotKey, HeapError> {
        self.locs.get(id).copied().ok_or(HeapError::InvalidEntry)
    }

    /// Detaches the last slot's entry, retiring its handle
    fn detach_last(&mut self) -> Result<(K, V), HeapError> {
        let entry = self.tree.remove_last()?;
        self.locs.remove(entry.id);
        Ok((entry.key, entry.value))
    }

    /// Exchanges the entries of two distinct slots and repoints both locators
    fn swap_slots(&mut self, a: SlotKey, b: SlotKey) {
        self.tree.swap(a, b);
        for slot in [a, b] {
            if let Some(entry) = self.tree.get(slot) {
                self.locs[entry.id] = slot;
            }
        }
    }

    fn order(&self, a: SlotKey, b: SlotKey) -> Option<Ordering> {
        let ka = &self.tree.get(a)?.key;
        let kb = &self.tree.get(b)?.key;
        Some(self.cmp.compare(ka, kb))
    }

    /// Repairs heap order at a slot whose entry may have become misplaced in
    /// either direction; at most one of the two sifts actually moves it
    fn restore(&mut self, slot: SlotKey) {
        if self.above_parent(slot) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    /// True if the slot's key is strictly smaller than its parent's
    fn above_parent(&self, slot: SlotKey) -> bool {
        match self.tree.parent(slot) {
            Some(parent) => self.order(slot, parent) == Some(Ordering::Less),
            None => false,
        }
    }

    /// Moves the entry at `slot` up until its parent's key is no greater
    fn sift_up(&mut self, mut slot: SlotKey) {
        while let Some(parent) = self.tree.parent(slot) {
            if self.order(parent, slot) != Some(Ordering::Greater) {
                break;
            }
            self.swap_slots(parent, slot);
            slot = parent;
        }
    }

    /// Moves the entry at `slot` down, always toward the smaller child, until
    /// no child's key is smaller
    ///
    /// Ties between equal-key children go to the left child; either choice
    /// preserves heap order.
    fn sift_down(&mut self, mut slot: SlotKey) {
        while let Some(left) = self.tree.left(slot) {
            let child = match self.tree.right(slot) {
                Some(right) if self.order(right, left) == Some(Ordering::Less) => right,
                _ => left,
            };
            if self.order(child, slot) != Some(Ordering::Less) {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }
}

impl<K: Ord, V> Default for AdaptableHeap<K, V> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AdaptableHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptableHeap")
            .field("len", &self.len())
            .field("tree", &self.tree)
            .finish()
    }
}
