//! Text forms for cells, men, and turn trails.
//!
//! Cells are labelled the way the physical board is printed: column
//! letters `A` through `L` west to east, rank numbers counting up from
//! White's home edge, so Black's castle cells read `F16`/`G16` and
//! White's `F1`/`G1`.

pub mod cell;

use std::fmt::Display;

use chumsky::Parser;

use crate::model::turn::TurnState;
use crate::model::{Cell, Man, ROWS};

/// Column letters of the grid, west to east.
pub const COL_NAMES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", COL_NAMES[self.col() as usize], ROWS - self.row())
    }
}

impl Display for Man {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Man::WHITE_PAWN => "WP",
            Man::WHITE_KNIGHT => "WK",
            Man::BLACK_PAWN => "BP",
            Man::BLACK_KNIGHT => "BK",
        })
    }
}

/// Things with a chumsky parser mirroring their `Display` form.
pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self>;
}

/// A completed turn as a cell trail: `F5-F6` for a plain step,
/// `G5xG7xE7` for a capture chain, with each captured hop marked `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnNotation {
    /// Cells the moving man occupied, origin first.
    pub cells: Vec<Cell>,
    /// One flag per hop: whether it captured.
    pub captures: Vec<bool>,
}

impl TurnNotation {
    /// Render the turn recorded so far in `turn`.
    pub fn from_turn(turn: &TurnState) -> Self {
        Self {
            cells: turn.trail.clone(),
            captures: turn.steps.iter().map(|step| step.captured.is_some()).collect(),
        }
    }
}

impl Display for TurnNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (ix, cell) in self.cells.iter().enumerate() {
            if ix > 0 {
                f.write_str(if self.captures[ix - 1] { "x" } else { "-" })?;
            }
            cell.fmt(f)?;
        }
        Ok(())
    }
}
