use serde::{Deserialize, Serialize};
use strum::{EnumIs, VariantArray};

pub mod board;
pub mod charge;
pub mod endgame;
pub mod game;
pub mod legality;
pub mod occupancy;
pub mod turn;

/// Representation of one cell of the 16-row by 12-column Camelot grid.
///
/// Cells are numbered row-major from the top-left corner, so cell 0 is
/// the top-left of the bounding rectangle and cell 191 the bottom-right.
/// Thirty-two of these cells fall outside the cross shape of the actual
/// board; they are permanently unusable and [`Cell::step`]/[`Cell::jump`]
/// never produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Cell(u8);

/// Number of rows in the bounding rectangle.
pub const ROWS: u8 = 16;
/// Number of columns in the bounding rectangle.
pub const COLS: u8 = 12;
/// Total linear extent of the grid, playable or not.
pub const GRID: usize = ROWS as usize * COLS as usize;

impl Cell {
    /// Construct from a linear index.
    ///
    /// Out-of-range indices are a programming-contract violation
    /// and panic rather than round-trip as garbage.
    #[inline]
    pub fn new(ix: usize) -> Self {
        assert!(ix < GRID, "cell index {} out of range", ix);
        Self(ix as u8)
    }

    /// Range-checked construction from a signed offset computation.
    #[inline]
    fn checked(ix: i16) -> Option<Self> {
        if (0..GRID as i16).contains(&ix) {
            Some(Self(ix as u8))
        } else {
            None
        }
    }

    /// Use this cell as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.0 / COLS
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.0 % COLS
    }

    #[inline]
    pub fn from_coords(row: u8, col: u8) -> Self {
        assert!(row < ROWS && col < COLS, "coords ({}, {}) out of range", row, col);
        Self(row * COLS + col)
    }

    /// The adjacent cell one step in the given direction, or `None` when
    /// that would leave the grid, wrap around a row edge, or land on an
    /// off-board cell of the cross.
    #[inline]
    pub fn step(self, dir: Compass) -> Option<Self> {
        Self::checked(self.0 as i16 + dir.delta())
            .filter(|to| self.col().abs_diff(to.col()) <= 1 && !to.is_off_board())
    }

    /// The cell two steps in the given direction, under the same
    /// wrap-around and off-board guards as [`Cell::step`].
    #[inline]
    pub fn jump(self, dir: Compass) -> Option<Self> {
        Self::checked(self.0 as i16 + 2 * dir.delta())
            .filter(|to| self.col().abs_diff(to.col()) <= 2 && !to.is_off_board())
    }

    /// Whether this cell lies outside the cross shape.
    #[inline]
    pub fn is_off_board(self) -> bool {
        board::GEOMETRY.off_board[self.ix()]
    }
}

/// Representation of the color of a player or man.
///
/// The discriminants are used extensively for indexing arrays of the
/// form `[<white value>, <black value>]`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs,
    Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    WHITE = 0,
    BLACK = 1,
}

impl Color {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        unsafe { std::mem::transmute(self as u8 ^ 1) }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Sign value of associated man color.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => -1,
        }
    }
}

/// The two echelons of Camelot men.
///
/// This closed enum replaces the string tags of older implementations;
/// the only rule keyed on echelon is the knight's privilege of
/// interleaving canters and captures within one turn.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs,
    Serialize, Deserialize)]
#[repr(u8)]
pub enum Echelon {
    PAWN = 1,
    KNIGHT = 2,
}

impl Echelon {
    /// Whether this echelon may mix canter jumps into a capture chain,
    /// and is bound by the knight's-charge continuation rule.
    #[inline]
    pub fn may_charge(self) -> bool {
        self == Self::KNIGHT
    }
}

/// Representation of a Camelot man.
///
/// The discriminants allow niche optimization with a byte value of 0
/// representing absence, and with the sign representing color.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray, Serialize, Deserialize)]
#[repr(i8)]
pub enum Man {
    BLACK_KNIGHT = -2,
    BLACK_PAWN = -1,
    WHITE_PAWN = 1,
    WHITE_KNIGHT = 2,
}

impl Man {
    #[inline]
    pub fn new(col: Color, ech: Echelon) -> Self {
        unsafe { std::mem::transmute(ech as i8 * col.sign()) }
    }

    /// Color of this man.
    #[inline]
    pub fn col(self) -> Color {
        if (self as i8) < 0 { Color::BLACK } else { Color::WHITE }
    }

    /// Echelon of this man.
    #[inline]
    pub fn ech(self) -> Echelon {
        unsafe { std::mem::transmute((self as i8).unsigned_abs()) }
    }
}

/// Representation of the directions on the Camelot grid.
///
/// ```text
///  NW      North     NE
///     -13   -12  -11
/// West -1    ..   +1 East
///     +11   +12  +13
///  SW      South     SE
/// ```
///
/// North points at row 0, the Black home edge; White men advance north
/// and Black men advance south, though unlike checkers nothing in the
/// movement rules is direction-restricted.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
#[repr(i8)]
pub enum Compass {
    NORTH = -(COLS as i8),
    SOUTH = COLS as i8,
    EAST = 1,
    WEST = -1,

    NORTHEAST = Self::NORTH as i8 + Self::EAST as i8,
    NORTHWEST = Self::NORTH as i8 + Self::WEST as i8,
    SOUTHEAST = Self::SOUTH as i8 + Self::EAST as i8,
    SOUTHWEST = Self::SOUTH as i8 + Self::WEST as i8,
}

impl Compass {
    #[inline]
    pub fn delta(self) -> i16 {
        self as i8 as i16
    }
}

/// Classification of the turn so far.
///
/// `BASIC` is terminal: once a plain step has been made no further
/// sub-move is accepted this turn. `CANTER` and `CAPTURE` chains may
/// continue, and may alternate for knights.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumIs,
    Serialize, Deserialize)]
#[repr(u8)]
pub enum MoveKind {
    #[default]
    NONE = 0,
    BASIC = 1,
    CANTER = 2,
    CAPTURE = 3,
}

/// Terminal outcome of a game. Once produced, no further moves are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Color),
    Draw,
}
