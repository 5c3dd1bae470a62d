//! Common contract surface for the heap: error type and the injected comparator
//!
//! The heap never orders keys itself; every ordering decision goes through a
//! [`Comparator`] supplied at construction. Keys are *admitted* once, at the
//! point they enter the heap (insert or key replacement), via
//! [`Comparator::is_valid_key`]; rejection surfaces as
//! [`HeapError::InvalidKey`] before any mutation takes place.

use std::cmp::Ordering;
use std::fmt;

/// Error type for heap and tree operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// peek/extract/remove-last was called on an empty structure
    EmptyStructure,
    /// The key was rejected by the comparator
    InvalidKey,
    /// The entry handle is stale, foreign, or was already removed
    InvalidEntry,
    /// The comparator cannot be replaced while the heap is non-empty
    InvalidState,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyStructure => write!(f, "structure is empty"),
            HeapError::InvalidKey => write!(f, "key was rejected by the comparator"),
            HeapError::InvalidEntry => {
                write!(f, "entry handle is no longer valid (element was removed)")
            }
            HeapError::InvalidState => {
                write!(f, "comparator cannot be replaced while the heap is non-empty")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A total order over keys, injected into the heap at construction
///
/// `compare` must be a total order over all keys for which `is_valid_key`
/// returns true. The heap calls `is_valid_key` exactly once per key, when the
/// key enters the structure; `compare` is only ever invoked on admitted keys.
///
/// Any closure `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```rust
/// use adaptable_heap::AdaptableHeap;
/// use std::cmp::Ordering;
///
/// // A max-heap comparator: reverse the natural order.
/// let mut heap = AdaptableHeap::new(|a: &i32, b: &i32| b.cmp(a));
/// heap.insert(1, "low").unwrap();
/// heap.insert(9, "high").unwrap();
/// assert_eq!(heap.peek_min().unwrap(), (&9, &"high"));
/// ```
pub trait Comparator<K> {
    /// Compares two admitted keys
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Whether this ordering admits the key at all
    ///
    /// Called before a key is stored; returning false makes the operation
    /// fail with [`HeapError::InvalidKey`] and leaves the heap untouched.
    fn is_valid_key(&self, _key: &K) -> bool {
        true
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// The natural order of a totally ordered key type
///
/// Every key is admissible; `compare` is `Ord::cmp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// The natural order of a partially ordered key type
///
/// Keys that do not compare equal to themselves (e.g. floating-point NaN) are
/// rejected at admission time, so `compare` only ever sees mutually comparable
/// keys.
///
/// ```rust
/// use adaptable_heap::{AdaptableHeap, HeapError, PartialNaturalOrder};
///
/// let mut heap = AdaptableHeap::new(PartialNaturalOrder);
/// heap.insert(1.5, "ok").unwrap();
/// assert_eq!(heap.insert(f64::NAN, "bad"), Err(HeapError::InvalidKey));
/// assert_eq!(heap.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialNaturalOrder;

impl<K: PartialOrd> Comparator<K> for PartialNaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        // Admitted keys are self-comparable; two such keys are only
        // incomparable if the caller's PartialOrd breaks its own contract.
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    fn is_valid_key(&self, key: &K) -> bool {
        key.partial_cmp(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_compares() {
        assert_eq!(Comparator::<i32>::compare(&NaturalOrder, &1, &2), Ordering::Less);
        assert_eq!(Comparator::<i32>::compare(&NaturalOrder, &2, &2), Ordering::Equal);
        assert!(Comparator::<i32>::is_valid_key(&NaturalOrder, &7));
    }

    #[test]
    fn partial_order_rejects_nan() {
        assert!(Comparator::<f64>::is_valid_key(&PartialNaturalOrder, &1.0));
        assert!(!Comparator::<f64>::is_valid_key(&PartialNaturalOrder, &f64::NAN));
        assert_eq!(
            Comparator::<f64>::compare(&PartialNaturalOrder, &1.0, &2.0),
            Ordering::Less
        );
    }

    #[test]
    fn closures_are_comparators() {
        let reversed = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert!(reversed.is_valid_key(&0));
    }

    #[test]
    fn errors_display() {
        assert_eq!(HeapError::EmptyStructure.to_string(), "structure is empty");
        assert!(HeapError::InvalidEntry.to_string().contains("no longer valid"));
    }
}
