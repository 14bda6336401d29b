//! Best-first search node and its frontier ordering.

use std::cmp::Ordering;

use waymark_kernel::contract::PackedState;

use crate::frontier::{QueueElement, INDEX_SLOTS};

/// One distinct packed state known to a best-first run.
///
/// Nodes live in an arena for the whole run and are referred to by their
/// arena index. The closed set and the open list both hold that index, so an
/// improved path is written into the node in place.
#[derive(Debug, Clone)]
pub struct SearchNode<O> {
    /// Path cost from the initial state.
    pub g: f64,
    /// `g + weight * h`.
    pub f: f64,
    /// Fingerprint of the node's state.
    pub packed: PackedState,
    /// Operator that generated this node (`None` for the root).
    pub op: Option<O>,
    /// Operator that undoes `op`; never applied when expanding this node.
    pub pop: Option<O>,
    /// Arena index of the generating node (`None` for the root).
    pub parent: Option<usize>,
    queue_index: [Option<usize>; INDEX_SLOTS],
}

impl<O> SearchNode<O> {
    /// The root node of a run.
    #[must_use]
    pub fn root(packed: PackedState, f: f64) -> Self {
        Self {
            g: 0.0,
            f,
            packed,
            op: None,
            pop: None,
            parent: None,
            queue_index: [None; INDEX_SLOTS],
        }
    }

    /// A node reached from `parent` by `op`.
    #[must_use]
    pub fn child(packed: PackedState, g: f64, f: f64, op: O, pop: O, parent: usize) -> Self {
        Self {
            g,
            f,
            packed,
            op: Some(op),
            pop: Some(pop),
            parent: Some(parent),
            queue_index: [None; INDEX_SLOTS],
        }
    }

    /// Overwrite the path fields with those of a cheaper duplicate.
    ///
    /// Queue bookkeeping is left untouched.
    pub fn adopt_path(&mut self, other: Self) {
        self.g = other.g;
        self.f = other.f;
        self.op = other.op;
        self.pop = other.pop;
        self.parent = other.parent;
    }
}

impl<O> QueueElement for SearchNode<O> {
    fn rank(&self, level: usize) -> f64 {
        if level == 0 {
            self.f
        } else {
            self.g
        }
    }

    fn queue_index(&self, slot: usize) -> Option<usize> {
        self.queue_index[slot]
    }

    fn set_queue_index(&mut self, slot: usize, index: Option<usize>) {
        self.queue_index[slot] = index;
    }
}

/// Frontier order: lower `f` first; on equal `f`, higher `g` first.
///
/// Written with explicit strict comparisons so that equal keys (and NaN)
/// compare `Equal`, which the heap treats as "do not move".
pub fn compare<O>(a: &SearchNode<O>, b: &SearchNode<O>) -> Ordering {
    if a.f < b.f {
        return Ordering::Less;
    }
    if a.f > b.f {
        return Ordering::Greater;
    }
    if a.g > b.g {
        return Ordering::Less;
    }
    if a.g < b.g {
        return Ordering::Greater;
    }
    Ordering::Equal
}

/// Operators on the path from the root to `goal`, in application order.
#[must_use]
pub fn reconstruct_path<O: Clone>(nodes: &[SearchNode<O>], goal: usize) -> Vec<O> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(i) = cursor {
        let node = &nodes[i];
        if let Some(op) = &node.op {
            path.push(op.clone());
        }
        cursor = node.parent;
    }
    path.reverse();
    path
}
