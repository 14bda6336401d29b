//! How the searches drive a domain: operator accounting, reverse-move
//! pruning, domain-error propagation, and instances without a solution.

use lock_tests::fixtures::{scrambled_pancakes, scrambled_tiles, KORF_12};
use lock_tests::probe::Probe;
use waymark_harness::worlds::fifteen_puzzle::{FifteenPuzzle, TileCost};
use waymark_harness::worlds::pancakes::{PancakeCost, Pancakes};
use waymark_kernel::error::DomainError;
use waymark_search::{search, Algorithm, Astar, HeapKind, IdaStar, SearchError, SearchPolicy};

/// Every expansion after the root skips exactly the reverse of the move
/// that produced it, and every generated node costs exactly one `apply`.
#[test]
fn astar_skips_one_reverse_move_per_non_root_expansion() {
    for heap in [HeapKind::Binary, HeapKind::Bucket] {
        let probe = Probe::new(FifteenPuzzle::new(scrambled_tiles(9, 30), TileCost::Unit).unwrap());
        let result = Astar::with_heap(heap).search(&probe).unwrap();
        assert!(result.solution().is_some());
        assert_eq!(probe.expansions(), result.expanded());
        assert_eq!(probe.applied(), result.generated());
        assert_eq!(result.generated(), probe.offered() - (result.expanded() - 1));
    }
}

/// Passes that find no goal walk every operator of every expanded node, so
/// the accounting is exact: one skipped reverse per non-root expansion.
#[test]
fn idastar_skips_one_reverse_move_per_non_root_expansion() {
    // Korf 12 needs bound 45; stopping after 35 and 37 leaves only full passes.
    let probe = Probe::new(FifteenPuzzle::new(KORF_12, TileCost::Unit).unwrap());
    let result = IdaStar::new().with_max_iterations(2).search(&probe).unwrap();
    assert!(result.solutions().is_empty());
    let passes = result.iterations().len() as u64;
    assert_eq!(passes, 2);
    assert_eq!(probe.expansions(), result.expanded());
    assert_eq!(probe.applied(), result.generated());
    assert_eq!(probe.handed_out(), probe.offered());
    assert_eq!(result.generated(), probe.offered() - (result.expanded() - passes));
}

/// The goal pass stops early, so some nodes on the solution path never reach
/// their reverse move; every other expansion still skips exactly one.
#[test]
fn idastar_goal_pass_skips_at_most_one_reverse_per_expansion() {
    let probe = Probe::new(Pancakes::new(scrambled_pancakes(21, 8), PancakeCost::Unit).unwrap());
    let result = IdaStar::new().search(&probe).unwrap();
    let solution = result.solution().unwrap();
    let passes = result.iterations().len() as u64;
    assert_eq!(probe.expansions(), result.expanded());
    assert_eq!(probe.applied(), result.generated());

    let skipped = probe.handed_out() - result.generated();
    let non_root = result.expanded() - passes;
    let cut_short = (solution.operators().len() as u64).saturating_sub(1);
    assert!(skipped <= non_root, "{skipped} skipped > {non_root}");
    assert!(skipped + cut_short >= non_root, "{skipped} + {cut_short} < {non_root}");
}

#[test]
fn domain_failure_aborts_best_first_search() {
    for (algorithm, heap) in [
        (Algorithm::Astar, HeapKind::Binary),
        (Algorithm::Astar, HeapKind::Bucket),
    ] {
        let probe = Probe::new(FifteenPuzzle::new(KORF_12, TileCost::Unit).unwrap()).failing_after(100);
        let policy = SearchPolicy {
            algorithm,
            heap,
            ..SearchPolicy::default()
        };
        let err = search(&probe, &policy).unwrap_err();
        assert!(
            matches!(err, SearchError::Domain(DomainError::Invalid { .. })),
            "{algorithm}/{heap}: {err:?}"
        );
    }
}

#[test]
fn idastar_never_packs() {
    let probe = Probe::new(Pancakes::new(scrambled_pancakes(4, 7), PancakeCost::Unit).unwrap())
        .failing_after(0);
    let policy = SearchPolicy {
        algorithm: Algorithm::IdaStar,
        ..SearchPolicy::default()
    };
    assert!(search(&probe, &policy).unwrap().solution().is_some());
}

#[test]
fn unsolvable_tiles_exhaust_without_error_under_iteration_limit() {
    // Swapping two tiles flips the permutation parity.
    let mut tiles = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14];
    let puzzle = FifteenPuzzle::new(tiles, TileCost::Unit).unwrap();
    let policy = SearchPolicy {
        algorithm: Algorithm::IdaStar,
        max_iterations: Some(3),
        ..SearchPolicy::default()
    };
    let result = search(&puzzle, &policy).unwrap();
    assert!(result.solutions().is_empty());
    assert_eq!(result.iterations().len(), 3);
    let bounds: Vec<f64> = result.iterations().iter().map(|it| it.bound).collect();
    assert_eq!(bounds, vec![2.0, 4.0, 6.0]);

    tiles.swap(14, 15);
    let solved = FifteenPuzzle::new(tiles, TileCost::Unit).unwrap();
    assert_eq!(search(&solved, &policy).unwrap().solution().map(|s| s.cost()), Some(0.0));
}

#[test]
fn fully_reversed_stack_takes_one_flip() {
    let stack = Pancakes::new((0..8).rev().collect(), PancakeCost::Unit).unwrap();
    let result = Astar::new().search(&stack).unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.cost(), 1.0);
    assert_eq!(result.expanded(), 1);
}
