//! The 4×4 sliding-tile puzzle.
//!
//! Positions are numbered row-major from the top-left corner. Tile 0 is the
//! blank; the goal places tile `t` at position `t`. An operator names the
//! position the blank moves to, so the tile at that position slides into the
//! old blank position.

use std::fmt;

use waymark_kernel::contract::{DomainOperator, DomainState, PackedState, SearchDomain};
use waymark_kernel::error::DomainError;

/// Board width.
pub const WIDTH: usize = 4;
/// Number of positions (and tiles, counting the blank).
pub const TILES: usize = WIDTH * WIDTH;

/// How much sliding a tile costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCost {
    /// Every move costs 1.
    #[default]
    Unit,
    /// Moving tile `t` costs `t`.
    Heavy,
    /// Moving tile `t` costs `sqrt(t)`.
    Sqrt,
    /// Moving tile `t` costs `1 / t`.
    Inverse,
}

impl TileCost {
    /// Cost of moving `tile`.
    #[must_use]
    pub fn of(self, tile: u8) -> f64 {
        let t = f64::from(tile);
        match self {
            Self::Unit => 1.0,
            Self::Heavy => t,
            Self::Sqrt => t.sqrt(),
            Self::Inverse => 1.0 / t,
        }
    }
}

impl fmt::Display for TileCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unit => "unit",
            Self::Heavy => "heavy",
            Self::Sqrt => "sqrt",
            Self::Inverse => "inverse",
        })
    }
}

/// A board configuration with its heuristic values.
#[derive(Debug, Clone, PartialEq)]
pub struct TileState {
    tiles: [u8; TILES],
    blank: usize,
    h: f64,
    d: f64,
    cost: TileCost,
}

impl TileState {
    /// `tiles[position]` is the tile at `position`.
    #[must_use]
    pub fn tiles(&self) -> &[u8; TILES] {
        &self.tiles
    }

    #[must_use]
    pub fn blank(&self) -> usize {
        self.blank
    }
}

impl DomainState for TileState {
    fn h(&self) -> f64 {
        self.h
    }

    fn d(&self) -> f64 {
        self.d
    }
}

/// Move the blank to position `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMove {
    to: u8,
}

impl TileMove {
    /// Destination of the blank.
    #[must_use]
    pub fn to(self) -> usize {
        usize::from(self.to)
    }
}

/// Moves are drawn from a fixed table, so positions always fit in a `u8`.
#[allow(clippy::cast_possible_truncation)]
fn move_to(position: usize) -> TileMove {
    TileMove { to: position as u8 }
}

impl DomainOperator<TileState> for TileMove {
    /// Cost of the tile that slides into the blank.
    fn cost(&self, state: &TileState) -> f64 {
        state.cost.of(state.tiles[self.to()])
    }

    fn reverse(&self, state: &TileState) -> Self {
        move_to(state.blank)
    }

    fn label(&self) -> String {
        format!("blank->{}", self.to)
    }
}

/// Sliding-tile domain instance: an initial layout plus a cost function.
#[derive(Debug, Clone)]
pub struct FifteenPuzzle {
    init: [u8; TILES],
    cost: TileCost,
    /// `md[tile][position]`: cost-weighted Manhattan distance of `tile` at
    /// `position` from its goal position.
    md: [[f64; TILES]; TILES],
    /// Unit Manhattan distance, same layout as `md`.
    md_unit: [[u8; TILES]; TILES],
    /// Blank destinations per blank position: up, left, right, down.
    moves: [Vec<usize>; TILES],
}

fn manhattan(tile: usize, position: usize) -> u8 {
    let (row, col) = (position / WIDTH, position % WIDTH);
    let (goal_row, goal_col) = (tile / WIDTH, tile % WIDTH);
    let distance = row.abs_diff(goal_row) + col.abs_diff(goal_col);
    u8::try_from(distance).unwrap_or(u8::MAX)
}

fn neighbours(position: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(4);
    if position >= WIDTH {
        out.push(position - WIDTH);
    }
    if position % WIDTH > 0 {
        out.push(position - 1);
    }
    if position % WIDTH < WIDTH - 1 {
        out.push(position + 1);
    }
    if position < TILES - WIDTH {
        out.push(position + WIDTH);
    }
    out
}

/// Ensure `tiles` is a permutation of `0..16`; returns the blank position.
fn check_permutation(tiles: &[u8; TILES]) -> Result<usize, String> {
    let mut seen = [false; TILES];
    for &t in tiles {
        let t = usize::from(t);
        if t >= TILES {
            return Err(format!("tile {t} out of range"));
        }
        if seen[t] {
            return Err(format!("tile {t} appears twice"));
        }
        seen[t] = true;
    }
    tiles
        .iter()
        .position(|&t| t == 0)
        .ok_or_else(|| "no blank".to_string())
}

impl FifteenPuzzle {
    /// Instance starting from `tiles`, where `tiles[position]` is the tile at
    /// `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Invalid`] unless `tiles` is a permutation of
    /// `0..16`.
    pub fn new(tiles: [u8; TILES], cost: TileCost) -> Result<Self, DomainError> {
        check_permutation(&tiles).map_err(|detail| DomainError::Invalid { detail })?;
        let mut md = [[0.0; TILES]; TILES];
        let mut md_unit = [[0; TILES]; TILES];
        for tile in 1..TILES {
            #[allow(clippy::cast_possible_truncation)]
            let weight = cost.of(tile as u8);
            for position in 0..TILES {
                let distance = manhattan(tile, position);
                md_unit[tile][position] = distance;
                md[tile][position] = f64::from(distance) * weight;
            }
        }
        Ok(Self {
            init: tiles,
            cost,
            md,
            md_unit,
            moves: std::array::from_fn(neighbours),
        })
    }

    #[must_use]
    pub fn cost(&self) -> TileCost {
        self.cost
    }

    /// Build a state from a layout, computing the heuristics from scratch.
    fn state_from(&self, tiles: [u8; TILES], blank: usize, reverse_sum: bool) -> TileState {
        let mut h = 0.0;
        let mut d = 0.0;
        let mut add = |position: usize| {
            let tile = usize::from(tiles[position]);
            if tile != 0 {
                h += self.md[tile][position];
                d += f64::from(self.md_unit[tile][position]);
            }
        };
        if reverse_sum {
            (0..TILES).rev().for_each(&mut add);
        } else {
            (0..TILES).for_each(&mut add);
        }
        TileState {
            tiles,
            blank,
            h,
            d,
            cost: self.cost,
        }
    }
}

impl SearchDomain for FifteenPuzzle {
    type State = TileState;
    type Operator = TileMove;

    fn initial_state(&self) -> TileState {
        let blank = self.init.iter().position(|&t| t == 0).unwrap_or(0);
        self.state_from(self.init, blank, false)
    }

    fn is_goal(&self, state: &TileState) -> bool {
        state.d == 0.0
    }

    fn num_operators(&self, state: &TileState) -> usize {
        self.moves[state.blank].len()
    }

    fn operator(&self, state: &TileState, index: usize) -> TileMove {
        move_to(self.moves[state.blank][index])
    }

    fn apply(&self, state: &TileState, op: &TileMove) -> Result<TileState, DomainError> {
        let new_blank = op.to();
        if !self.moves[state.blank].contains(&new_blank) {
            return Err(DomainError::InapplicableOperator {
                detail: format!("blank at {} cannot move to {new_blank}", state.blank),
            });
        }
        let mut next = state.clone();
        let tile = usize::from(state.tiles[new_blank]);
        next.tiles[state.blank] = state.tiles[new_blank];
        next.tiles[new_blank] = 0;
        next.h += self.md[tile][state.blank] - self.md[tile][new_blank];
        next.d += f64::from(self.md_unit[tile][state.blank]) - f64::from(self.md_unit[tile][new_blank]);
        next.blank = new_blank;
        Ok(next)
    }

    fn pack(&self, state: &TileState) -> Result<PackedState, DomainError> {
        Ok(state
            .tiles
            .iter()
            .fold(0, |word, &t| (word << 4) | PackedState::from(t)))
    }

    fn unpack(&self, packed: PackedState) -> Result<TileState, DomainError> {
        let mut tiles = [0u8; TILES];
        let mut word = packed;
        for slot in tiles.iter_mut().rev() {
            #[allow(clippy::cast_possible_truncation)]
            let nibble = (word & 0xF) as u8;
            *slot = nibble;
            word >>= 4;
        }
        let blank = check_permutation(&tiles)
            .map_err(|detail| DomainError::InvalidPacked { packed, detail })?;
        Ok(self.state_from(tiles, blank, true))
    }
}
