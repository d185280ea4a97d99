//! Generation transitions.
//!
//! A transition is a pure function of the current grid, the rules, the
//! symbols and the topology. It always builds a fresh grid; the input is
//! never touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AutomatonError;
use crate::rule::RuleSet;
use crate::state::{Grid, GridSize, Marker, Symbols, Topology};

/// Offsets of the 8 Moore neighbors.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Everything a transition reads besides the grid itself.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a, M> {
    pub rules: &'a RuleSet,
    pub symbols: &'a Symbols<M>,
    pub topology: Topology,
    /// Fixed dimensions of the automaton; also the shape of the output.
    pub size: GridSize,
}

/// Count the live Moore neighbors of a cell.
pub fn alive_neighbors<M: Marker>(
    grid: &Grid<M>,
    row: usize,
    column: usize,
    ctx: &TransitionContext<'_, M>,
) -> u8 {
    let (row, column) = (row as isize, column as isize);
    MOORE_OFFSETS
        .iter()
        .filter(|(dr, dc)| {
            grid.is_alive(
                row + dr,
                column + dc,
                ctx.size,
                ctx.topology,
                &ctx.symbols.alive,
            )
        })
        .count() as u8
}

/// Next marker of a single cell.
///
/// A missing cell (ragged input) is treated as dead.
pub fn next_cell<M: Marker>(
    grid: &Grid<M>,
    row: usize,
    column: usize,
    ctx: &TransitionContext<'_, M>,
) -> M {
    let neighbors = alive_neighbors(grid, row, column, ctx);
    let is_alive = grid.get(row, column) == Some(&ctx.symbols.alive);

    let next_alive = if is_alive {
        ctx.rules.is_survival(neighbors)
    } else {
        ctx.rules.is_birth(neighbors)
    };

    if next_alive {
        ctx.symbols.alive.clone()
    } else {
        ctx.symbols.dead.clone()
    }
}

/// Compute the next generation cell by cell.
pub fn next_generation<M: Marker>(grid: &Grid<M>, ctx: &TransitionContext<'_, M>) -> Grid<M> {
    let cells = (0..ctx.size.rows)
        .map(|row| {
            (0..ctx.size.columns)
                .map(|column| next_cell(grid, row, column, ctx))
                .collect()
        })
        .collect();
    Grid::new(cells)
}

/// Transition algorithm selector.
///
/// Only the naive full-grid scan exists; the tag is kept so configurations
/// can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Recompute every cell from its 8 neighbors.
    #[default]
    Naive,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
        }
    }

    pub fn next_generation<M: Marker>(
        self,
        grid: &Grid<M>,
        ctx: &TransitionContext<'_, M>,
    ) -> Grid<M> {
        match self {
            Self::Naive => next_generation(grid, ctx),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            _ => Err(AutomatonError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}
