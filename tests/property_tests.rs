//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! structural invariants hold after every step:
//!
//! - heap order: every non-root entry's key is >= its parent's key;
//! - completeness: the occupied slots form a contiguous level-order range;
//! - back-reference consistency: every live handle resolves to an entry that
//!   carries that same handle;
//! - drain order: extracting everything yields the model's keys in sorted
//!   order.

use proptest::prelude::*;

use adaptable_heap::complete_tree::CompleteTree;
use adaptable_heap::{AdaptableHeap, EntryId, HeapEntry};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    ExtractMin,
    RemoveEntry(usize),
    ReplaceKey(usize, i32),
    ReplaceValue(usize, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Insert),
        2 => Just(Op::ExtractMin),
        1 => any::<usize>().prop_map(Op::RemoveEntry),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(i, k)| Op::ReplaceKey(i, k)),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(i, k)| Op::ReplaceValue(i, k)),
    ]
}

/// Checks completeness: a breadth-first walk visits exactly `len` slots, no
/// slot has only a right child, and once a slot is not full every later slot
/// is a leaf.
fn check_completeness<K, V>(tree: &CompleteTree<HeapEntry<K, V>>) -> Result<(), TestCaseError> {
    let mut queue: VecDeque<_> = tree.root().into_iter().collect();
    let mut visited = 0usize;
    let mut frontier = false;
    while let Some(slot) = queue.pop_front() {
        visited += 1;
        let left = tree.left(slot);
        let right = tree.right(slot);
        prop_assert!(
            left.is_some() || right.is_none(),
            "slot with a right child but no left child"
        );
        if frontier {
            prop_assert!(
                left.is_none() && right.is_none(),
                "interior slot after the first open slot in level order"
            );
        }
        frontier |= left.is_none() || right.is_none();
        queue.extend(left);
        queue.extend(right);
    }
    prop_assert_eq!(visited, tree.len());
    Ok(())
}

/// Checks heap order along every parent/child edge
fn check_heap_order<V>(tree: &CompleteTree<HeapEntry<i32, V>>) -> Result<(), TestCaseError> {
    let mut queue: VecDeque<_> = tree.root().into_iter().collect();
    while let Some(slot) = queue.pop_front() {
        let key = tree.get(slot).map(|e| *e.key());
        for child in [tree.left(slot), tree.right(slot)].into_iter().flatten() {
            let child_key = tree.get(child).map(|e| *e.key());
            prop_assert!(key <= child_key, "heap order violated: {:?} > {:?}", key, child_key);
            queue.push_back(child);
        }
    }
    Ok(())
}

/// Checks that every model handle resolves to the entry holding that handle
fn check_back_references<V>(
    heap: &AdaptableHeap<i32, V>,
    model: &[(EntryId, i32)],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(heap.len(), model.len());
    for &(id, key) in model {
        prop_assert!(heap.contains(id));
        prop_assert_eq!(heap.key(id), Ok(&key));
    }
    let mut queue: VecDeque<_> = heap.tree().root().into_iter().collect();
    while let Some(slot) = queue.pop_front() {
        if let Some(entry) = heap.tree().get(slot) {
            prop_assert!(heap.contains(entry.id()), "entry carries a dead handle");
        }
        queue.extend(heap.tree().left(slot));
        queue.extend(heap.tree().right(slot));
    }
    Ok(())
}

fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap: AdaptableHeap<i32, i32> = AdaptableHeap::natural();
    // Live entries as (handle, current key); values mirror insertion order.
    let mut model: Vec<(EntryId, i32)> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(key) => {
                let id = heap.insert(key, key).unwrap();
                model.push((id, key));
            }
            Op::ExtractMin => {
                if model.is_empty() {
                    prop_assert!(heap.extract_min().is_err());
                } else {
                    let (key, _) = heap.extract_min().unwrap();
                    let min = model.iter().map(|&(_, k)| k).min();
                    prop_assert_eq!(Some(key), min);
                    let pos = model.iter().position(|&(_, k)| k == key);
                    model.remove(pos.unwrap());
                }
            }
            Op::RemoveEntry(raw) => {
                if model.is_empty() {
                    continue;
                }
                let (id, key) = model.remove(raw % model.len().max(1));
                let (removed_key, _) = heap.remove_entry(id).unwrap();
                prop_assert_eq!(removed_key, key);
            }
            Op::ReplaceKey(raw, new_key) => {
                if model.is_empty() {
                    continue;
                }
                let index = raw % model.len();
                let (id, old_key) = model[index];
                prop_assert_eq!(heap.replace_key(id, new_key), Ok(old_key));
                model[index].1 = new_key;
            }
            Op::ReplaceValue(raw, new_value) => {
                if model.is_empty() {
                    continue;
                }
                let (id, _) = model[raw % model.len()];
                heap.replace_value(id, new_value).unwrap();
            }
        }

        check_completeness(heap.tree())?;
        check_heap_order(heap.tree())?;
        check_back_references(&heap, &model)?;
    }

    // Drain: extraction order is the model's keys, sorted.
    let mut expected: Vec<i32> = model.iter().map(|&(_, k)| k).collect();
    expected.sort_unstable();
    let mut drained = Vec::new();
    while let Ok((key, _)) = heap.extract_min() {
        drained.push(key);
    }
    prop_assert_eq!(drained, expected);
    prop_assert!(heap.is_empty());

    Ok(())
}

proptest! {
    #[test]
    fn random_operation_sequences_keep_invariants(
        ops in proptest::collection::vec(op_strategy(), 0..200)
    ) {
        run_ops(ops)?;
    }

    #[test]
    fn insert_then_drain_sorts(values in proptest::collection::vec(any::<i32>(), 0..300)) {
        let mut heap = AdaptableHeap::natural();
        for &value in &values {
            heap.insert(value, ()).unwrap();
        }

        let mut drained = Vec::with_capacity(values.len());
        while let Ok((key, ())) = heap.extract_min() {
            drained.push(key);
        }

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn peek_always_tracks_model_minimum(
        ops in proptest::collection::vec((any::<bool>(), any::<i32>()), 1..150)
    ) {
        let mut heap = AdaptableHeap::natural();
        let mut model: Vec<i32> = Vec::new();

        for (pop, key) in ops {
            if pop && !model.is_empty() {
                let (extracted, _) = heap.extract_min().unwrap();
                let pos = model.iter().position(|&k| k == extracted).unwrap();
                prop_assert_eq!(Some(&extracted), model.iter().min());
                model.remove(pos);
            } else {
                heap.insert(key, key).unwrap();
                model.push(key);
            }

            match model.iter().min() {
                Some(min) => prop_assert_eq!(heap.peek_min().map(|(k, _)| k), Ok(min)),
                None => prop_assert!(heap.peek_min().is_err()),
            }
        }
    }

    #[test]
    fn rekeying_to_extremes_moves_entries(keys in proptest::collection::vec(-1000i32..1000, 2..50)) {
        let mut heap = AdaptableHeap::natural();
        let ids: Vec<_> = keys.iter().map(|&k| heap.insert(k, k).unwrap()).collect();

        // Force the first entry to the top, then to the bottom.
        let first = ids[0];
        heap.replace_key(first, i32::MIN).unwrap();
        prop_assert_eq!(heap.min_entry(), Ok(first));

        heap.replace_key(first, i32::MAX).unwrap();
        let mut last_key = i32::MIN;
        let mut last_value = None;
        while let Ok((key, value)) = heap.extract_min() {
            prop_assert!(key >= last_key);
            last_key = key;
            last_value = Some(value);
        }
        // The re-keyed entry drains last, still carrying its original value.
        prop_assert_eq!(last_value, Some(keys[0]));
    }
}
