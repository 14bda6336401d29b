//! Reference instances and seeded scrambles.

use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use waymark_harness::worlds::fifteen_puzzle::{TILES, WIDTH};

/// Korf's 100-instance set, instance 12, as `tiles[position] = tile`.
/// Optimal unit cost 45; Manhattan distance 35.
pub const KORF_12: [u8; TILES] = [14, 1, 9, 6, 4, 8, 12, 5, 7, 2, 3, 0, 10, 11, 13, 15];

/// Canonical goal layout.
#[must_use]
pub fn goal_tiles() -> [u8; TILES] {
    std::array::from_fn(|p| u8::try_from(p).unwrap())
}

/// Render a layout in Korf instance-file form (one position per tile).
///
/// # Panics
///
/// Panics if `tiles` is not a permutation of `0..16`.
#[must_use]
pub fn korf_text(tiles: &[u8; TILES]) -> String {
    let mut text = format!("{WIDTH} {WIDTH}\nstarting positions for each tile:\n");
    for tile in 0..TILES {
        let position = tiles
            .iter()
            .position(|&t| usize::from(t) == tile)
            .expect("layout is a permutation");
        writeln!(text, "{position}").unwrap();
    }
    text.push_str("goal positions:\n");
    for position in 0..TILES {
        writeln!(text, "{position}").unwrap();
    }
    text
}

/// Random walk of `moves` blank moves from the goal, never undoing the
/// previous move. The optimal cost is at most `moves`.
#[must_use]
pub fn scrambled_tiles(seed: u64, moves: usize) -> [u8; TILES] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tiles = goal_tiles();
    let mut blank = 0usize;
    let mut previous = usize::MAX;
    for _ in 0..moves {
        let mut options = Vec::with_capacity(4);
        if blank >= WIDTH {
            options.push(blank - WIDTH);
        }
        if blank % WIDTH > 0 {
            options.push(blank - 1);
        }
        if blank % WIDTH < WIDTH - 1 {
            options.push(blank + 1);
        }
        if blank < TILES - WIDTH {
            options.push(blank + WIDTH);
        }
        options.retain(|&p| p != previous);
        let to = options[rng.gen_range(0..options.len())];
        tiles.swap(blank, to);
        previous = blank;
        blank = to;
    }
    tiles
}

/// Uniformly shuffled stack of `n` pancakes.
#[must_use]
pub fn scrambled_pancakes(seed: u64, n: u8) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cakes: Vec<u8> = (0..n).collect();
    cakes.shuffle(&mut rng);
    cakes
}
