//! Open-list properties under seeded random operation sequences.
//!
//! Both flavours must extract in non-decreasing primary rank, keep position
//! slots consistent with membership, and survive rank decreases through
//! `update`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use waymark_search::frontier::{build_open_list, OpenList, QueueElement, INDEX_SLOTS, POSITION_SLOT};
use waymark_search::{HeapKind, SearchError};

const CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Entry {
    f: f64,
    g: f64,
    slots: [Option<usize>; INDEX_SLOTS],
}

impl Entry {
    fn new(f: f64, g: f64) -> Self {
        Self {
            f,
            g,
            slots: [None; INDEX_SLOTS],
        }
    }
}

impl QueueElement for Entry {
    fn rank(&self, level: usize) -> f64 {
        if level == 0 {
            self.f
        } else {
            self.g
        }
    }

    fn queue_index(&self, slot: usize) -> Option<usize> {
        self.slots[slot]
    }

    fn set_queue_index(&mut self, slot: usize, index: Option<usize>) {
        self.slots[slot] = index;
    }
}

fn by_f_then_high_g(a: &Entry, b: &Entry) -> Ordering {
    a.f.total_cmp(&b.f).then_with(|| b.g.total_cmp(&a.g))
}

fn random_entry(rng: &mut StdRng) -> Entry {
    let f = f64::from(rng.gen_range(0u32..40));
    let g = f64::from(rng.gen_range(0u32..40));
    Entry::new(f, g)
}

fn open_list(kind: HeapKind) -> Box<dyn OpenList<Entry>> {
    build_open_list(kind, by_f_then_high_g, CAPACITY, 16)
}

#[test]
fn extraction_order_is_non_decreasing_in_f() {
    for kind in [HeapKind::Binary, HeapKind::Bucket] {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut entries: Vec<Entry> = (0..300).map(|_| random_entry(&mut rng)).collect();
            let mut open = open_list(kind);
            for handle in 0..entries.len() {
                open.insert(&mut entries, handle).unwrap();
            }
            assert_eq!(open.len(), entries.len());

            let mut last: Option<&Entry> = None;
            let mut drained = Vec::new();
            while let Some(handle) = open.extract_min(&mut entries) {
                drained.push(handle);
            }
            for &handle in &drained {
                let entry = &entries[handle];
                if let Some(prev) = last {
                    assert!(prev.f <= entry.f, "{kind}, seed {seed}: f went down");
                    if prev.f == entry.f {
                        assert!(prev.g >= entry.g, "{kind}, seed {seed}: g tie broken low");
                    }
                }
                assert_eq!(entry.queue_index(POSITION_SLOT), None);
                last = Some(entry);
            }
            assert_eq!(drained.len(), entries.len());
            assert!(open.is_empty());
        }
    }
}

#[test]
fn interleaved_inserts_updates_and_extractions() {
    for kind in [HeapKind::Binary, HeapKind::Bucket] {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(1_000 + seed);
            let mut entries: Vec<Entry> = Vec::new();
            let mut open = open_list(kind);
            let mut floor = 0.0;

            for _ in 0..2_000 {
                match rng.gen_range(0..10) {
                    0..=4 => {
                        let mut entry = random_entry(&mut rng);
                        entry.f = entry.f.max(floor);
                        let handle = entries.len();
                        entries.push(entry);
                        open.insert(&mut entries, handle).unwrap();
                    }
                    5..=6 => {
                        let queued: Vec<usize> =
                            (0..entries.len()).filter(|&h| open.contains(&entries, h)).collect();
                        if queued.is_empty() {
                            continue;
                        }
                        let handle = queued[rng.gen_range(0..queued.len())];
                        let entry = &mut entries[handle];
                        entry.f = (entry.f - f64::from(rng.gen_range(0u32..5))).max(floor);
                        open.update(&mut entries, handle).unwrap();
                    }
                    _ => {
                        if let Some(handle) = open.extract_min(&mut entries) {
                            let f = entries[handle].f;
                            assert!(f >= floor, "{kind}, seed {seed}: extracted {f} below {floor}");
                            let best_left = (0..entries.len())
                                .filter(|&h| open.contains(&entries, h))
                                .map(|h| entries[h].f)
                                .fold(f64::INFINITY, f64::min);
                            assert!(f <= best_left, "{kind}, seed {seed}: skipped a smaller f");
                            floor = f;
                        }
                    }
                }
                let queued = (0..entries.len())
                    .filter(|&h| open.contains(&entries, h))
                    .count();
                assert_eq!(queued, open.len(), "{kind}, seed {seed}: slots out of sync");
            }

            open.clear(&mut entries);
            assert!(open.is_empty());
            assert!(entries.iter().all(|e| e.slots == [None; INDEX_SLOTS]));
        }
    }
}

#[test]
fn update_of_extracted_element_is_rejected() {
    for kind in [HeapKind::Binary, HeapKind::Bucket] {
        let mut entries = vec![Entry::new(3.0, 1.0), Entry::new(5.0, 1.0)];
        let mut open = open_list(kind);
        open.insert(&mut entries, 0).unwrap();
        open.insert(&mut entries, 1).unwrap();
        let first = open.extract_min(&mut entries).unwrap();
        assert_eq!(first, 0);
        let err = open.update(&mut entries, 0).unwrap_err();
        assert_eq!(err, SearchError::NotQueued { handle: 0 });
        assert_eq!(open.len(), 1);
    }
}

#[test]
fn bucket_heap_rejects_unrepresentable_ranks() {
    for bad in [-1.0, CAPACITY as f64, f64::NAN, f64::INFINITY] {
        let mut entries = vec![Entry::new(bad, 0.0)];
        let mut open = open_list(HeapKind::Bucket);
        assert!(
            matches!(
                open.insert(&mut entries, 0),
                Err(SearchError::RankOutOfRange { level: 0, .. })
            ),
            "rank {bad} accepted"
        );
        assert!(open.is_empty());
    }
}
