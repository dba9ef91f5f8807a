//! The mailbox representation of the Camelot board.
//!
//! This is the simple and most obvious representation, using a separate
//! value in an array for each cell of the bounding rectangle, with the
//! cross shape carved out by a fixed off-board mask. The board this
//! small, every rules query just walks the array.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::model::{Cell, Color, Echelon, GRID, Man};

/// Fixed geometry of the cross-shaped board, computed once.
pub struct Geometry {
    /// Cells of the bounding rectangle that are not part of the cross.
    pub off_board: [bool; GRID],
}

/// Linear indices of the 32 corner cells outside the cross.
const OFF_BOARD: [usize; 32] = [
    0, 1, 2, 3, 4, 7, 8, 9, 10, 11, // row 16 flanks
    12, 13, 22, 23, // row 15
    24, 35, // row 14
    156, 167, // row 3
    168, 169, 178, 179, // row 2
    180, 181, 182, 183, 184, 187, 188, 189, 190, 191, // row 1 flanks
];

impl Geometry {
    fn new() -> Self {
        let mut off_board = [false; GRID];
        for ix in OFF_BOARD {
            off_board[ix] = true;
        }
        Self { off_board }
    }
}

pub static GEOMETRY: LazyLock<Geometry> = LazyLock::new(Geometry::new);

/// Black's castle, the two playable cells of the top row.
pub const BLACK_CASTLE: [Cell; 2] = [Cell(5), Cell(6)];
/// White's castle, the two playable cells of the bottom row.
pub const WHITE_CASTLE: [Cell; 2] = [Cell(185), Cell(186)];

/// The castle adjoining the given color's home rows.
#[inline]
pub fn own_castle(col: Color) -> [Cell; 2] {
    match col {
        Color::WHITE => WHITE_CASTLE,
        Color::BLACK => BLACK_CASTLE,
    }
}

#[inline]
pub fn is_own_castle_cell(col: Color, cell: Cell) -> bool {
    own_castle(col).contains(&cell)
}

#[inline]
pub fn is_enemy_castle_cell(col: Color, cell: Cell) -> bool {
    own_castle(col.opp()).contains(&cell)
}

/// The board proper. Off-board cells always hold `None` and are never
/// legal targets; the [`Cell`] stepping functions refuse to produce
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Option<Man>>", try_from = "Vec<Option<Man>>")]
pub struct Board([Option<Man>; GRID]);

impl Board {
    pub fn empty() -> Self {
        Self([None; GRID])
    }

    /// The canonical starting layout: each side's four knights flank
    /// its two rows of pawns in the home quadrant, castles empty.
    pub fn startpos() -> Self {
        let mut board = Self::empty();
        for ix in [62, 69, 75, 80] {
            board.place(Cell::new(ix), Man::BLACK_KNIGHT);
        }
        for ix in [63, 64, 65, 66, 67, 68, 76, 77, 78, 79] {
            board.place(Cell::new(ix), Man::BLACK_PAWN);
        }
        for ix in [111, 116, 122, 129] {
            board.place(Cell::new(ix), Man::WHITE_KNIGHT);
        }
        for ix in [112, 113, 114, 115, 123, 124, 125, 126, 127, 128] {
            board.place(Cell::new(ix), Man::WHITE_PAWN);
        }
        board
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Man> {
        self.0[cell.ix()]
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        !cell.is_off_board() && self.0[cell.ix()].is_none()
    }

    /// Put a man on an empty playable cell.
    pub fn place(&mut self, cell: Cell, man: Man) {
        assert!(!cell.is_off_board(), "cannot place on off-board cell {:?}", cell);
        assert!(self.0[cell.ix()].is_none(), "cell {:?} already occupied", cell);
        self.0[cell.ix()] = Some(man);
    }

    /// Take the man off a cell.
    pub fn remove(&mut self, cell: Cell) -> Man {
        self.0[cell.ix()]
            .take()
            .unwrap_or_else(|| panic!("no man on cell {:?}", cell))
    }

    /// Move the man on `from` to the empty cell `to`.
    pub fn relocate(&mut self, from: Cell, to: Cell) {
        let man = self.remove(from);
        self.place(to, man);
    }

    /// Number of men of the given color still on the board.
    pub fn count(&self, col: Color) -> usize {
        self.men(col).count()
    }

    /// All cells holding a man of the given color, in index order.
    pub fn men(&self, col: Color) -> impl Iterator<Item = (Cell, Man)> + '_ {
        self.0.iter().enumerate().filter_map(move |(ix, man)| {
            man.filter(|m| m.col() == col).map(|m| (Cell::new(ix), m))
        })
    }

    /// Whether the given color occupies both cells of the opposing
    /// castle, the primary winning condition.
    pub fn holds_enemy_castle(&self, col: Color) -> bool {
        own_castle(col.opp())
            .into_iter()
            .all(|cell| self.get(cell).is_some_and(|man| man.col() == col))
    }
}

impl From<Board> for Vec<Option<Man>> {
    fn from(board: Board) -> Self {
        board.0.to_vec()
    }
}

impl TryFrom<Vec<Option<Man>>> for Board {
    type Error = String;

    fn try_from(cells: Vec<Option<Man>>) -> Result<Self, Self::Error> {
        let cells: [Option<Man>; GRID] = cells
            .try_into()
            .map_err(|v: Vec<_>| format!("expected {} cells, got {}", GRID, v.len()))?;
        for (ix, man) in cells.iter().enumerate() {
            if man.is_some() && Cell::new(ix).is_off_board() {
                return Err(format!("man on off-board cell {}", ix));
            }
        }
        Ok(Self(cells))
    }
}
