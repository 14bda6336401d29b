//! Instance-file loaders for the bundled domains.
//!
//! # Formats
//!
//! Sliding tiles (Korf layout):
//!
//! ```text
//! 4 4
//! <header>
//! p0          position of tile 0 (the blank)
//! ...
//! p15         position of tile 15
//! <header>
//! 0 .. 15     goal positions, which must be the canonical layout
//! ```
//!
//! Pancakes: the stack size on line 1, then the pancakes top first on
//! line 2, separated by spaces.

use std::path::{Path, PathBuf};

use waymark_kernel::error::DomainError;

use crate::worlds::fifteen_puzzle::{FifteenPuzzle, TileCost, TILES, WIDTH};
use crate::worlds::pancakes::{PancakeCost, Pancakes};

/// Failure reading or parsing an instance file.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("cannot read instance {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("line {line}: {detail}")]
    Parse { line: usize, detail: String },

    /// The file parsed but does not describe a valid instance.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Line cursor that reports 1-based line numbers.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, InstanceError> {
        self.line += 1;
        self.inner.next().ok_or_else(|| self.error("unexpected end of input"))
    }

    fn next_number<T: std::str::FromStr>(&mut self) -> Result<T, InstanceError> {
        let raw = self.next_line()?.trim();
        raw.parse()
            .map_err(|_| self.error(format!("expected a number, got {raw:?}")))
    }

    fn error(&self, detail: impl Into<String>) -> InstanceError {
        InstanceError::Parse {
            line: self.line,
            detail: detail.into(),
        }
    }
}

/// Parse a 4×4 sliding-tile instance in Korf layout.
///
/// # Errors
///
/// [`InstanceError::Parse`] for malformed lines, dimensions other than
/// `4 4`, or a non-canonical goal; [`InstanceError::Invalid`] when the
/// start positions do not form a permutation.
pub fn parse_korf(text: &str, cost: TileCost) -> Result<FifteenPuzzle, InstanceError> {
    let mut lines = Lines::new(text);

    let dims: Vec<&str> = lines.next_line()?.split_whitespace().collect();
    let width = WIDTH.to_string();
    if dims != [width.as_str(), width.as_str()] {
        return Err(lines.error(format!(
            "expected dimensions \"{WIDTH} {WIDTH}\", got {:?}",
            dims.join(" ")
        )));
    }

    lines.next_line()?;
    // Out-of-range marker: a duplicated position leaves a slot unfilled and
    // the permutation check rejects it.
    #[allow(clippy::cast_possible_truncation)]
    let mut tiles = [TILES as u8; TILES];
    for tile in 0..TILES {
        let position: usize = lines.next_number()?;
        if position >= TILES {
            return Err(lines.error(format!("position {position} outside the board")));
        }
        #[allow(clippy::cast_possible_truncation)]
        let tile = tile as u8;
        tiles[position] = tile;
    }

    lines.next_line()?;
    for tile in 0..TILES {
        let position: usize = lines.next_number()?;
        if position != tile {
            return Err(lines.error("non-canonical goal positions"));
        }
    }

    Ok(FifteenPuzzle::new(tiles, cost)?)
}

/// Read and parse a Korf sliding-tile instance file.
///
/// # Errors
///
/// [`InstanceError::Io`] if the file cannot be read, otherwise as
/// [`parse_korf`].
pub fn load_korf(path: &Path, cost: TileCost) -> Result<FifteenPuzzle, InstanceError> {
    parse_korf(&read(path)?, cost)
}

/// Parse a pancake instance.
///
/// # Errors
///
/// [`InstanceError::Parse`] for malformed lines or a pancake count that
/// disagrees with the header; [`InstanceError::Invalid`] for a stack that
/// is not a permutation of `0..n` with `2 <= n <= 16`.
pub fn parse_pancakes(text: &str, cost: PancakeCost) -> Result<Pancakes, InstanceError> {
    let mut lines = Lines::new(text);
    let n: usize = lines.next_number()?;
    let row = lines.next_line()?;
    let cakes = row
        .split_whitespace()
        .map(|raw| {
            raw.parse::<u8>()
                .map_err(|_| lines.error(format!("expected a pancake, got {raw:?}")))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    if cakes.len() != n {
        return Err(lines.error(format!(
            "header announces {n} pancakes, found {}",
            cakes.len()
        )));
    }
    Ok(Pancakes::new(cakes, cost)?)
}

/// Read and parse a pancake instance file.
///
/// # Errors
///
/// [`InstanceError::Io`] if the file cannot be read, otherwise as
/// [`parse_pancakes`].
pub fn load_pancakes(path: &Path, cost: PancakeCost) -> Result<Pancakes, InstanceError> {
    parse_pancakes(&read(path)?, cost)
}

fn read(path: &Path) -> Result<String, InstanceError> {
    std::fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
