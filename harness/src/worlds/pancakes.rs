//! The pancake-flipping puzzle with the gap heuristic.
//!
//! A state is a stack of `n` distinct pancakes `0..n`, position 0 on top.
//! `flip-k` reverses the top `k + 1` pancakes. The goal is the sorted stack
//! with pancake `i` at position `i`.

use std::fmt;

use waymark_kernel::contract::{DomainOperator, DomainState, PackedState, SearchDomain};
use waymark_kernel::error::DomainError;

/// Largest stack that packs into 64 bits at 4 bits per pancake.
pub const MAX_PANCAKES: usize = 16;

/// How much a flip costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PancakeCost {
    /// Every flip costs 1.
    #[default]
    Unit,
    /// `flip-k` costs one plus the pancake at position `k` before the flip.
    Heavy,
}

impl fmt::Display for PancakeCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unit => "unit",
            Self::Heavy => "heavy",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PancakeState {
    cakes: Vec<u8>,
    h: f64,
    d: f64,
    cost: PancakeCost,
}

impl PancakeState {
    #[must_use]
    pub fn cakes(&self) -> &[u8] {
        &self.cakes
    }
}

impl DomainState for PancakeState {
    fn h(&self) -> f64 {
        self.h
    }

    fn d(&self) -> f64 {
        self.d
    }
}

/// Reverse the prefix `0..=k`. Its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flip {
    k: u8,
}

impl Flip {
    #[must_use]
    pub fn k(self) -> usize {
        usize::from(self.k)
    }
}

impl DomainOperator<PancakeState> for Flip {
    fn cost(&self, state: &PancakeState) -> f64 {
        match state.cost {
            PancakeCost::Unit => 1.0,
            PancakeCost::Heavy => 1.0 + f64::from(state.cakes[self.k()]),
        }
    }

    fn reverse(&self, _state: &PancakeState) -> Self {
        *self
    }

    fn label(&self) -> String {
        format!("flip-{}", self.k)
    }
}

/// Whether there is a gap below position `i`.
///
/// The bottom pancake has a gap unless it is the largest one (an imaginary
/// plate sits below the stack).
fn gap(cakes: &[u8], i: usize) -> bool {
    let n = cakes.len();
    if i == n - 1 {
        return usize::from(cakes[n - 1]) != n - 1;
    }
    cakes[i].abs_diff(cakes[i + 1]) != 1
}

fn gap_heuristic(cakes: &[u8], cost: PancakeCost) -> f64 {
    let n = cakes.len();
    (0..n)
        .filter(|&i| gap(cakes, i))
        .map(|i| match cost {
            PancakeCost::Unit => 1.0,
            PancakeCost::Heavy => {
                let below = if i == n - 1 { cakes[i] } else { cakes[i].min(cakes[i + 1]) };
                1.0 + f64::from(below)
            }
        })
        .sum()
}

fn check_stack(cakes: &[u8]) -> Result<(), String> {
    let n = cakes.len();
    if !(2..=MAX_PANCAKES).contains(&n) {
        return Err(format!("stack of {n} pancakes; expected 2..={MAX_PANCAKES}"));
    }
    let mut seen = [false; MAX_PANCAKES];
    for &c in cakes {
        let c = usize::from(c);
        if c >= n {
            return Err(format!("pancake {c} out of range for a stack of {n}"));
        }
        if seen[c] {
            return Err(format!("pancake {c} appears twice"));
        }
        seen[c] = true;
    }
    Ok(())
}

/// Pancake domain instance: an initial stack plus a cost function.
#[derive(Debug, Clone)]
pub struct Pancakes {
    init: Vec<u8>,
    cost: PancakeCost,
}

impl Pancakes {
    /// Instance starting from `cakes` (top first).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Invalid`] unless `cakes` is a permutation of
    /// `0..n` with `2 <= n <= 16`.
    pub fn new(cakes: Vec<u8>, cost: PancakeCost) -> Result<Self, DomainError> {
        check_stack(&cakes).map_err(|detail| DomainError::Invalid { detail })?;
        Ok(Self { init: cakes, cost })
    }

    /// Number of pancakes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.init.len()
    }

    /// Always false: a stack holds at least two pancakes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.init.is_empty()
    }

    #[must_use]
    pub fn cost(&self) -> PancakeCost {
        self.cost
    }

    fn state_from(&self, cakes: Vec<u8>) -> PancakeState {
        PancakeState {
            h: gap_heuristic(&cakes, self.cost),
            d: gap_heuristic(&cakes, PancakeCost::Unit),
            cakes,
            cost: self.cost,
        }
    }
}

impl SearchDomain for Pancakes {
    type State = PancakeState;
    type Operator = Flip;

    fn initial_state(&self) -> PancakeState {
        self.state_from(self.init.clone())
    }

    fn is_goal(&self, state: &PancakeState) -> bool {
        state.d == 0.0
    }

    fn num_operators(&self, _state: &PancakeState) -> usize {
        self.init.len() - 1
    }

    #[allow(clippy::cast_possible_truncation)]
    fn operator(&self, _state: &PancakeState, index: usize) -> Flip {
        Flip {
            k: (index + 1) as u8,
        }
    }

    fn apply(&self, state: &PancakeState, op: &Flip) -> Result<PancakeState, DomainError> {
        let k = op.k();
        if k == 0 || k >= state.cakes.len() {
            return Err(DomainError::InapplicableOperator {
                detail: format!("flip-{k} on a stack of {}", state.cakes.len()),
            });
        }
        let mut cakes = state.cakes.clone();
        cakes[..=k].reverse();
        Ok(self.state_from(cakes))
    }

    fn pack(&self, state: &PancakeState) -> Result<PackedState, DomainError> {
        Ok(state
            .cakes
            .iter()
            .fold(0, |word, &c| (word << 4) | PackedState::from(c)))
    }

    fn unpack(&self, packed: PackedState) -> Result<PancakeState, DomainError> {
        let n = self.init.len();
        let invalid = |detail: String| DomainError::InvalidPacked { packed, detail };
        if n < MAX_PANCAKES && packed >> (4 * n) != 0 {
            return Err(invalid(format!("bits set beyond {n} pancakes")));
        }
        let mut cakes = vec![0u8; n];
        let mut word = packed;
        for slot in cakes.iter_mut().rev() {
            #[allow(clippy::cast_possible_truncation)]
            let nibble = (word & 0xF) as u8;
            *slot = nibble;
            word >>= 4;
        }
        check_stack(&cakes).map_err(invalid)?;
        Ok(self.state_from(cakes))
    }
}
