//! Reference scenario: Korf instance 12, unit costs.
//!
//! Node counts are exact and depend on the open list's tie-breaking, so a
//! change to either heap or to the expansion loop shows up here first.

use lock_tests::fixtures::{korf_text, KORF_12};
use waymark_harness::instance::load_korf;
use waymark_harness::worlds::fifteen_puzzle::{FifteenPuzzle, TileCost};
use waymark_kernel::contract::SearchDomain;
use waymark_search::{Astar, HeapKind, IdaStar};

fn korf_12() -> FifteenPuzzle {
    FifteenPuzzle::new(KORF_12, TileCost::Unit).unwrap()
}

#[test]
fn astar_binary_heap_counts() {
    let result = Astar::with_heap(HeapKind::Binary).search(&korf_12()).unwrap();
    let solution = result.solution().expect("instance 12 is solvable");
    assert_eq!(solution.cost(), 45.0);
    assert_eq!(solution.length(), 46);
    assert_eq!(result.expanded(), 32_470);
    assert_eq!(result.generated(), 65_271);
    assert_eq!(result.duplicates(), 2_570);
    assert_eq!(result.reopened(), 0);
}

#[test]
fn astar_bucket_heap_counts() {
    let result = Astar::with_heap(HeapKind::Bucket).search(&korf_12()).unwrap();
    let solution = result.solution().expect("instance 12 is solvable");
    assert_eq!(solution.cost(), 45.0);
    assert_eq!(solution.length(), 46);
    assert_eq!(result.expanded(), 32_334);
    assert_eq!(result.generated(), 64_963);
    assert_eq!(result.duplicates(), 2_562);
    assert_eq!(result.reopened(), 0);
}

#[test]
fn instance_file_gives_the_same_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("12.korf");
    std::fs::write(&path, korf_text(&KORF_12)).unwrap();
    let from_file = load_korf(&path, TileCost::Unit).unwrap();
    assert_eq!(from_file.initial_state(), korf_12().initial_state());
    let result = Astar::new().search(&from_file).unwrap();
    assert_eq!(result.expanded(), 32_470);
    assert_eq!(result.generated(), 65_271);
}

#[test]
fn idastar_deepens_by_parity_to_the_optimum() {
    let result = IdaStar::new().search(&korf_12()).unwrap();
    let solution = result.solution().expect("instance 12 is solvable");
    assert_eq!(solution.cost(), 45.0);
    assert_eq!(solution.length(), 46);

    let bounds: Vec<f64> = result.iterations().iter().map(|it| it.bound).collect();
    assert_eq!(bounds, vec![35.0, 37.0, 39.0, 41.0, 43.0, 45.0]);

    let expanded: u64 = result.iterations().iter().map(|it| it.expanded).sum();
    let generated: u64 = result.iterations().iter().map(|it| it.generated).sum();
    assert_eq!(result.expanded(), expanded);
    assert_eq!(result.generated(), generated);
}
