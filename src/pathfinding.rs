//! Dijkstra's shortest path using the adaptable heap
//!
//! A generic Dijkstra implementation that leverages [`AdaptableHeap`]'s
//! `replace_key` as its decrease-key operation: each frontier node keeps its
//! entry handle in a fast hash map (FxHash), and a cheaper route to a node
//! re-keys its existing entry instead of inserting a duplicate, so the heap
//! never holds more than one entry per node.
//!
//! The node type carries its own goal context and implements `is_goal()` to
//! determine when the search should terminate.
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::pathfinding::{dijkstra, SearchNode};
//!
//! // Node carries its goal coordinates.
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         [(1, 0), (-1, 0), (0, 1), (0, -1)]
//!             .iter()
//!             .map(|(dx, dy)| (GridPos { x: self.x + dx, y: self.y + dy, ..*self }, 1))
//!             .collect()
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::adaptable::{AdaptableHeap, EntryId};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding
///
/// Orderable, copyable, addable, with a zero value (`Default`) for the start
/// node.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph
///
/// The node carries all context needed to generate successors and to decide
/// whether it is a goal state.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state
    fn is_goal(&self) -> bool;
}

/// Finds the cheapest path from `start` to a goal node
///
/// Returns the path (start and goal inclusive) and its total cost, or None if
/// no goal is reachable.
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    let mut heap: AdaptableHeap<N::Cost, N> = AdaptableHeap::natural();
    let mut best: FxHashMap<N, N::Cost> = FxHashMap::default();
    let mut prev: FxHashMap<N, N> = FxHashMap::default();
    // Frontier nodes only: handles are dropped once a node is settled.
    let mut handles: FxHashMap<N, EntryId> = FxHashMap::default();

    let origin = N::Cost::default();
    let handle = heap.insert(origin, start.clone()).ok()?;
    best.insert(start.clone(), origin);
    handles.insert(start.clone(), handle);

    while let Ok((cost, node)) = heap.extract_min() {
        handles.remove(&node);

        if node.is_goal() {
            return Some((reconstruct(&prev, node), cost));
        }

        for (succ, weight) in node.successors() {
            let tentative = cost + weight;
            if let Some(&known) = best.get(&succ) {
                if known <= tentative {
                    continue;
                }
            }
            best.insert(succ.clone(), tentative);
            prev.insert(succ.clone(), node.clone());

            match handles.get(&succ) {
                // Already on the frontier with a worse cost: decrease-key.
                Some(&handle) => {
                    heap.replace_key(handle, tentative).ok()?;
                }
                None => {
                    let handle = heap.insert(tentative, succ.clone()).ok()?;
                    handles.insert(succ, handle);
                }
            }
        }
    }

    None
}

fn reconstruct<N: SearchNode>(prev: &FxHashMap<N, N>, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    while let Some(parent) = path.last().and_then(|n| prev.get(n)) {
        path.push(parent.clone());
    }
    path.reverse();
    path
}
