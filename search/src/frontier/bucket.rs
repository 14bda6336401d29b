//! Two-level rank-bucketed heap.
//!
//! The primary rank (truncated to an integer) selects a bucket; the
//! secondary rank selects a bin inside it. Extraction takes the lowest
//! non-empty bucket and, inside it, the highest non-empty bin, most recent
//! insertion first. Both cursors only move when they have to, which keeps
//! insert and extract close to constant time for small integer ranks.

use std::marker::PhantomData;

use super::{OpenList, QueueElement, BIN_SLOT, POSITION_SLOT};
use crate::error::SearchError;

/// Bins of one primary bucket, indexed by secondary rank.
#[derive(Debug)]
struct Bucket {
    bins: Vec<Vec<usize>>,
    /// Upper bound on the highest non-empty bin.
    max: usize,
    len: usize,
}

impl Bucket {
    fn new(capacity: usize) -> Self {
        Self {
            bins: vec![Vec::new(); capacity],
            max: 0,
            len: 0,
        }
    }

    fn push(&mut self, handle: usize, bin: usize) {
        if bin > self.max {
            self.max = bin;
        }
        self.bins[bin].push(handle);
        self.len += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        while self.max > 0 && self.bins[self.max].is_empty() {
            self.max -= 1;
        }
        let handle = self.bins[self.max].pop()?;
        self.len -= 1;
        Some(handle)
    }

    fn remove(&mut self, handle: usize, bin: usize) -> bool {
        let Some(at) = self.bins[bin].iter().position(|&h| h == handle) else {
            return false;
        };
        self.bins[bin].remove(at);
        self.len -= 1;
        true
    }
}

/// Open list for non-negative, integer-valued ranks below `capacity`.
///
/// Fractional ranks are truncated. A rank that is negative, non-finite, or
/// not below the capacity is rejected with [`SearchError::RankOutOfRange`];
/// it is never clamped.
pub struct BucketHeap<T> {
    buckets: Vec<Option<Bucket>>,
    capacity: usize,
    /// Lower bound on the lowest non-empty bucket.
    min: usize,
    len: usize,
    _elements: PhantomData<fn(&T)>,
}

impl<T: QueueElement> BucketHeap<T> {
    /// Heap with `capacity` buckets, each holding `capacity` bins.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(capacity).collect(),
            capacity,
            min: usize::MAX,
            len: 0,
            _elements: PhantomData,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn rank_index(&self, element: &T, level: usize) -> Result<usize, SearchError> {
        let rank = element.rank(level);
        let out_of_range = SearchError::RankOutOfRange {
            level,
            rank,
            capacity: self.capacity,
        };
        if !rank.is_finite() || rank < 0.0 {
            return Err(out_of_range);
        }
        #[allow(clippy::cast_precision_loss)]
        let limit = self.capacity as f64;
        if rank.trunc() >= limit {
            return Err(out_of_range);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = rank as usize;
        Ok(index)
    }

    fn has_entries(&self, p0: usize) -> bool {
        matches!(&self.buckets[p0], Some(bucket) if bucket.len > 0)
    }

    fn place(&mut self, elements: &mut [T], handle: usize, p0: usize, p1: usize) {
        if p0 < self.min {
            self.min = p0;
        }
        let capacity = self.capacity;
        self.buckets[p0]
            .get_or_insert_with(|| Bucket::new(capacity))
            .push(handle, p1);
        elements[handle].set_queue_index(POSITION_SLOT, Some(p0));
        elements[handle].set_queue_index(BIN_SLOT, Some(p1));
        self.len += 1;
    }
}

impl<T: QueueElement> OpenList<T> for BucketHeap<T> {
    fn insert(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError> {
        let p0 = self.rank_index(&elements[handle], 0)?;
        let p1 = self.rank_index(&elements[handle], 1)?;
        self.place(elements, handle, p0, p1);
        Ok(())
    }

    fn extract_min(&mut self, elements: &mut [T]) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        while self.min < self.capacity && !self.has_entries(self.min) {
            self.min += 1;
        }
        let handle = self.buckets.get_mut(self.min)?.as_mut()?.pop()?;
        self.len -= 1;
        elements[handle].set_queue_index(POSITION_SLOT, None);
        elements[handle].set_queue_index(BIN_SLOT, None);
        Some(handle)
    }

    fn update(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError> {
        let not_queued = SearchError::NotQueued { handle };
        let element = elements.get(handle).ok_or_else(|| not_queued.clone())?;
        let (Some(p0), Some(p1)) = (
            element.queue_index(POSITION_SLOT),
            element.queue_index(BIN_SLOT),
        ) else {
            return Err(not_queued);
        };
        let new_p0 = self.rank_index(element, 0)?;
        let new_p1 = self.rank_index(element, 1)?;
        let removed = self
            .buckets
            .get_mut(p0)
            .and_then(Option::as_mut)
            .filter(|b| p1 < b.bins.len())
            .is_some_and(|b| b.remove(handle, p1));
        if !removed {
            return Err(not_queued);
        }
        self.len -= 1;
        self.place(elements, handle, new_p0, new_p1);
        Ok(())
    }

    fn clear(&mut self, elements: &mut [T]) {
        for bucket in self.buckets.iter_mut().filter_map(Option::take) {
            for handle in bucket.bins.into_iter().flatten() {
                elements[handle].set_queue_index(POSITION_SLOT, None);
                elements[handle].set_queue_index(BIN_SLOT, None);
            }
        }
        self.min = usize::MAX;
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }
}
