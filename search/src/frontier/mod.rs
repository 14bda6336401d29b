//! Open lists: index-aware priority queues over an element arena.
//!
//! Elements live in a caller-owned slice (the node arena) and are referred to
//! by their index in that slice, the *handle*. Each element records where it
//! currently sits inside the queue in one or two position slots; a queue
//! clears the slots when the element leaves, so "is this element open" is a
//! slot check rather than a scan.
//!
//! Two implementations share the [`OpenList`] contract:
//!
//! - [`binary::BinaryHeap`] -- comparator-ordered array heap, `O(log n)`
//! - [`bucket::BucketHeap`] -- two-level rank buckets, near `O(1)` for small
//!   non-negative integer ranks

pub mod binary;
pub mod bucket;

use std::cmp::Ordering;

use crate::error::SearchError;

/// Position slot shared by every open list: `Some` while the element is queued.
pub const POSITION_SLOT: usize = 0;

/// Secondary slot used by the bucket heap (bin within the primary bucket).
pub const BIN_SLOT: usize = 1;

/// Number of position slots an element must provide.
pub const INDEX_SLOTS: usize = 2;

/// Orders two elements; `Less` means the first is extracted earlier.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// An element that can sit in an open list.
pub trait QueueElement {
    /// Integer-valued rank at `level` (0 = primary, 1 = secondary).
    fn rank(&self, level: usize) -> f64;

    /// Current position recorded in `slot`, `None` when absent.
    fn queue_index(&self, slot: usize) -> Option<usize>;

    /// Record the element's position in `slot`.
    fn set_queue_index(&mut self, slot: usize, index: Option<usize>);
}

/// Priority queue contract over handles into an element arena.
pub trait OpenList<T: QueueElement> {
    /// Queue the element at `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::RankOutOfRange`] if the element's ranks do not
    /// fit the queue.
    fn insert(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError>;

    /// Remove and return the best element. Its position slots are cleared.
    fn extract_min(&mut self, elements: &mut [T]) -> Option<usize>;

    /// Restore queue order after the element's rank changed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotQueued`] if the element is not in this queue,
    /// or [`SearchError::RankOutOfRange`] if its new ranks do not fit.
    fn update(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError>;

    /// Drop every queued element, clearing their position slots.
    fn clear(&mut self, elements: &mut [T]);

    /// Number of queued elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the element at `handle` is currently queued.
    fn contains(&self, elements: &[T], handle: usize) -> bool {
        elements
            .get(handle)
            .is_some_and(|e| e.queue_index(POSITION_SLOT).is_some())
    }
}

/// Open-list flavour, selected once per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapKind {
    /// Comparator-based binary heap.
    #[default]
    Binary,
    /// Rank-bucketed heap.
    Bucket,
}

impl std::fmt::Display for HeapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Bucket => f.write_str("bucket"),
        }
    }
}

/// Build the open list for `kind`.
///
/// `cmp` orders the binary heap; `bucket_capacity` bounds both rank levels of
/// the bucket heap; `initial_capacity` presizes the binary heap's array.
#[must_use]
pub fn build_open_list<'a, T>(
    kind: HeapKind,
    cmp: Comparator<T>,
    bucket_capacity: usize,
    initial_capacity: usize,
) -> Box<dyn OpenList<T> + 'a>
where
    T: QueueElement + 'a,
{
    match kind {
        HeapKind::Binary => Box::new(binary::BinaryHeap::with_capacity(cmp, initial_capacity)),
        HeapKind::Bucket => Box::new(bucket::BucketHeap::new(bucket_capacity)),
    }
}
