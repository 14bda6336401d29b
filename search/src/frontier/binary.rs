//! Array-backed binary min-heap whose elements know their own position.
//!
//! Each queued element records its array index in [`POSITION_SLOT`], so
//! `update` starts sifting from the element directly instead of scanning.

use std::marker::PhantomData;

use super::{Comparator, OpenList, QueueElement, POSITION_SLOT};
use crate::error::SearchError;

/// Comparator-ordered binary heap of element handles.
///
/// Sifting uses strict comparisons only: an element moves past another only
/// when the comparator says it is strictly better. Equal elements keep their
/// relative placement, which keeps extraction order reproducible.
pub struct BinaryHeap<T> {
    heap: Vec<usize>,
    cmp: Comparator<T>,
    _elements: PhantomData<fn(&T)>,
}

impl<T: QueueElement> BinaryHeap<T> {
    #[must_use]
    pub fn new(cmp: Comparator<T>) -> Self {
        Self::with_capacity(cmp, 0)
    }

    #[must_use]
    pub fn with_capacity(cmp: Comparator<T>, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            cmp,
            _elements: PhantomData,
        }
    }

    fn less(&self, elements: &[T], i: usize, j: usize) -> bool {
        (self.cmp)(&elements[self.heap[i]], &elements[self.heap[j]]).is_lt()
    }

    fn swap(&mut self, elements: &mut [T], i: usize, j: usize) {
        self.heap.swap(i, j);
        elements[self.heap[i]].set_queue_index(POSITION_SLOT, Some(i));
        elements[self.heap[j]].set_queue_index(POSITION_SLOT, Some(j));
    }

    /// Move the entry at `i` towards the root; returns its final index.
    fn sift_up(&mut self, elements: &mut [T], mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(elements, i, parent) {
                break;
            }
            self.swap(elements, i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, elements: &mut [T], mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < self.heap.len() && self.less(elements, left, i) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(elements, right, smallest) {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.swap(elements, i, smallest);
            i = smallest;
        }
    }
}

impl<T: QueueElement> OpenList<T> for BinaryHeap<T> {
    fn insert(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError> {
        let i = self.heap.len();
        self.heap.push(handle);
        elements[handle].set_queue_index(POSITION_SLOT, Some(i));
        self.sift_up(elements, i);
        Ok(())
    }

    fn extract_min(&mut self, elements: &mut [T]) -> Option<usize> {
        let top = *self.heap.first()?;
        elements[top].set_queue_index(POSITION_SLOT, None);
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            elements[last].set_queue_index(POSITION_SLOT, Some(0));
            self.sift_down(elements, 0);
        }
        Some(top)
    }

    fn update(&mut self, elements: &mut [T], handle: usize) -> Result<(), SearchError> {
        let i = elements
            .get(handle)
            .and_then(|e| e.queue_index(POSITION_SLOT))
            .filter(|&i| self.heap.get(i) == Some(&handle))
            .ok_or(SearchError::NotQueued { handle })?;
        let i = self.sift_up(elements, i);
        self.sift_down(elements, i);
        Ok(())
    }

    fn clear(&mut self, elements: &mut [T]) {
        for &handle in &self.heap {
            elements[handle].set_queue_index(POSITION_SLOT, None);
        }
        self.heap.clear();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
