//! Solution quality against a brute-force oracle, and path validity.
//!
//! With an admissible heuristic and weight 1, A* (either heap) and IDA*
//! return the optimal cost. With weight `w`, the cost stays within `w` times
//! the optimum. Every returned path replays to a goal at the reported cost.

use lock_tests::fixtures::{scrambled_pancakes, scrambled_tiles};
use lock_tests::oracle::optimal_cost;
use waymark_harness::worlds::fifteen_puzzle::{FifteenPuzzle, TileCost};
use waymark_harness::worlds::pancakes::{PancakeCost, Pancakes};
use waymark_kernel::contract::{DomainOperator, SearchDomain};
use waymark_kernel::result::{SearchResult, Solution};
use waymark_search::{Astar, HeapKind, IdaStar};

const EPS: f64 = 1e-9;

/// Replay `solution` from the initial state; returns the summed move cost.
fn replay<D: SearchDomain>(domain: &D, solution: &Solution<D::Operator>) -> f64 {
    let mut state = domain.initial_state();
    let mut cost = 0.0;
    for op in solution.operators() {
        cost += op.cost(&state);
        state = domain.apply(&state, op).expect("every path operator applies");
    }
    assert!(domain.is_goal(&state), "path does not end at a goal");
    assert_eq!(solution.length(), solution.operators().len() + 1);
    cost
}

/// Reported cost of the run's solution, after checking its path.
///
/// A weighted search may return a node whose ancestors were improved after
/// it was generated, so the replayed cost can undercut the reported one but
/// never exceed it.
fn solved<D: SearchDomain>(domain: &D, result: &SearchResult<D::Operator>) -> f64 {
    let solution = result.solution().expect("instance is solvable");
    let replayed = replay(domain, solution);
    assert!(
        replayed <= solution.cost() + EPS,
        "replayed cost {replayed} exceeds reported {}",
        solution.cost()
    );
    solution.cost()
}

fn pancake_instances(cost: PancakeCost) -> Vec<Pancakes> {
    (0..6)
        .map(|seed| {
            let n = 6 + u8::try_from(seed % 3).unwrap();
            Pancakes::new(scrambled_pancakes(seed, n), cost).unwrap()
        })
        .collect()
}

fn tile_instances(cost: TileCost) -> Vec<FifteenPuzzle> {
    (0..4)
        .map(|seed| FifteenPuzzle::new(scrambled_tiles(100 + seed, 12), cost).unwrap())
        .collect()
}

#[test]
fn astar_is_optimal_on_pancakes() {
    for cost in [PancakeCost::Unit, PancakeCost::Heavy] {
        for stack in pancake_instances(cost) {
            let optimum = optimal_cost(&stack).unwrap();
            for heap in [HeapKind::Binary, HeapKind::Bucket] {
                let astar = Astar::with_heap(heap).with_bucket_capacity(256);
                let found = solved(&stack, &astar.search(&stack).unwrap());
                assert!((found - optimum).abs() < EPS, "{cost} {heap}: {found} vs {optimum}");
            }
        }
    }
}

#[test]
fn idastar_is_optimal_on_pancakes() {
    for cost in [PancakeCost::Unit, PancakeCost::Heavy] {
        for stack in pancake_instances(cost) {
            let optimum = optimal_cost(&stack).unwrap();
            let result = IdaStar::new().search(&stack).unwrap();
            let found = solved(&stack, &result);
            assert!((found - optimum).abs() < EPS, "{cost}: {found} vs {optimum}");
            let last = result.iterations().last().unwrap();
            assert!((last.bound - found).abs() < EPS);
        }
    }
}

#[test]
fn astar_and_idastar_are_optimal_on_short_tile_scrambles() {
    for puzzle in tile_instances(TileCost::Unit) {
        let optimum = optimal_cost(&puzzle).unwrap();
        assert!(optimum <= 12.0);
        for heap in [HeapKind::Binary, HeapKind::Bucket] {
            let found = solved(&puzzle, &Astar::with_heap(heap).search(&puzzle).unwrap());
            assert!((found - optimum).abs() < EPS);
        }
        let found = solved(&puzzle, &IdaStar::new().search(&puzzle).unwrap());
        assert!((found - optimum).abs() < EPS);
    }
}

#[test]
fn weighted_costs_stay_within_bound() {
    for weight in [1.5, 2.0, 5.0] {
        for stack in pancake_instances(PancakeCost::Heavy) {
            let optimum = optimal_cost(&stack).unwrap();
            let astar = Astar::weighted(weight, HeapKind::Binary).unwrap();
            let found = solved(&stack, &astar.search(&stack).unwrap());
            assert!(found <= weight * optimum + EPS, "w={weight}: {found} > {optimum}");
            let ida = IdaStar::weighted(weight).unwrap();
            let found = solved(&stack, &ida.search(&stack).unwrap());
            assert!(found <= weight * optimum + EPS, "w={weight}: {found} > {optimum}");
        }
        for puzzle in tile_instances(TileCost::Unit) {
            let optimum = optimal_cost(&puzzle).unwrap();
            let astar = Astar::weighted(weight, HeapKind::Binary).unwrap();
            let found = solved(&puzzle, &astar.search(&puzzle).unwrap());
            assert!(found <= weight * optimum + EPS);
        }
    }
}

#[test]
fn weighted_tiles_paths_replay_under_every_cost_function() {
    for cost in [TileCost::Heavy, TileCost::Sqrt, TileCost::Inverse] {
        let puzzle = FifteenPuzzle::new(scrambled_tiles(42, 24), cost).unwrap();
        let result = Astar::weighted(3.0, HeapKind::Binary)
            .unwrap()
            .search(&puzzle)
            .unwrap();
        solved(&puzzle, &result);
    }
}
