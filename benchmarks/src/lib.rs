//! Shared helpers for waymark benchmark suites.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use waymark_harness::runner::{run_search, SearchReport};
use waymark_harness::worlds::fifteen_puzzle::{FifteenPuzzle, TileCost};
use waymark_harness::worlds::pancakes::{PancakeCost, Pancakes};
use waymark_search::frontier::{QueueElement, INDEX_SLOTS};
use waymark_search::{Algorithm, HeapKind, SearchPolicy};

/// Korf instance 12; optimal unit cost 45.
pub const KORF_12: [u8; 16] = [14, 1, 9, 6, 4, 8, 12, 5, 7, 2, 3, 0, 10, 11, 13, 15];

/// Ten-pancake stack used by the IDA* regimes.
pub const STACK_10: [u8; 10] = [4, 9, 2, 7, 0, 5, 8, 1, 6, 3];

/// A problem instance of either bundled domain.
pub enum Instance {
    Tiles(FifteenPuzzle),
    Pancakes(Pancakes),
}

/// One benchmarked configuration: an instance and the policy that solves it.
pub struct Regime {
    pub instance: Instance,
    pub policy: SearchPolicy,
}

impl Regime {
    /// Search and report, as the CLI does.
    ///
    /// # Panics
    ///
    /// Panics if the search fails. Benchmark setup failures are fatal.
    #[must_use]
    pub fn run(&self) -> SearchReport {
        match &self.instance {
            Instance::Tiles(puzzle) => run_search(puzzle, "tiles", &self.policy),
            Instance::Pancakes(stack) => run_search(stack, "pancakes", &self.policy),
        }
        .expect("benchmark regime search")
    }
}

fn policy(algorithm: Algorithm, heap: HeapKind, weight: f64) -> SearchPolicy {
    SearchPolicy {
        algorithm,
        heap,
        weight,
        ..SearchPolicy::default()
    }
}

/// The regimes the macro suite times.
///
/// # Panics
///
/// Panics if a built-in instance is invalid.
#[must_use]
pub fn regimes() -> Vec<(&'static str, Regime)> {
    let korf = || Instance::Tiles(FifteenPuzzle::new(KORF_12, TileCost::Unit).expect("korf 12"));
    let stack = |cost: PancakeCost| Instance::Pancakes(Pancakes::new(STACK_10.to_vec(), cost).expect("stack"));
    vec![
        (
            "tiles_astar_binary",
            Regime {
                instance: korf(),
                policy: policy(Algorithm::Astar, HeapKind::Binary, 1.0),
            },
        ),
        (
            "tiles_astar_bucket",
            Regime {
                instance: korf(),
                policy: policy(Algorithm::Astar, HeapKind::Bucket, 1.0),
            },
        ),
        (
            "tiles_wastar_2",
            Regime {
                instance: korf(),
                policy: policy(Algorithm::Astar, HeapKind::Binary, 2.0),
            },
        ),
        (
            "tiles_idastar",
            Regime {
                instance: korf(),
                policy: policy(Algorithm::IdaStar, HeapKind::Binary, 1.0),
            },
        ),
        (
            "pancakes_astar_heavy",
            Regime {
                instance: stack(PancakeCost::Heavy),
                policy: policy(Algorithm::Astar, HeapKind::Binary, 1.0),
            },
        ),
        (
            "pancakes_idastar_unit",
            Regime {
                instance: stack(PancakeCost::Unit),
                policy: policy(Algorithm::IdaStar, HeapKind::Binary, 1.0),
            },
        ),
    ]
}

/// Bare queue element for open-list microbenchmarks.
#[derive(Debug, Clone)]
pub struct BenchEntry {
    pub f: f64,
    pub g: f64,
    slots: [Option<usize>; INDEX_SLOTS],
}

impl BenchEntry {
    #[must_use]
    pub fn new(f: f64, g: f64) -> Self {
        Self {
            f,
            g,
            slots: [None; INDEX_SLOTS],
        }
    }
}

impl QueueElement for BenchEntry {
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

/// Lower `f` first, then higher `g`.
#[must_use]
pub fn by_f_then_high_g(a: &BenchEntry, b: &BenchEntry) -> std::cmp::Ordering {
    a.f.total_cmp(&b.f).then_with(|| b.g.total_cmp(&a.g))
}

/// Seeded pseudo-random entries with ranks below `range`.
#[must_use]
pub fn entries(n: usize, range: u32) -> Vec<BenchEntry> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..n)
        .map(|_| {
            BenchEntry::new(
                f64::from(rng.gen_range(0..range)),
                f64::from(rng.gen_range(0..range)),
            )
        })
        .collect()
}
