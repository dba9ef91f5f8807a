//! Ownership and single-capture reachability queries.
//!
//! These are the leaf predicates everything else composes: whether a
//! cell belongs to a player, whether one man could capture right now,
//! and the whole-board mandatory-capture scan.

use strum::VariantArray;

use crate::model::{Cell, Color, Compass, board};
use crate::model::board::Board;

#[inline]
pub fn owner_of(board: &Board, cell: Cell) -> Option<Color> {
    board.get(cell).map(|man| man.col())
}

#[inline]
pub fn is_own_man(board: &Board, col: Color, cell: Cell) -> bool {
    owner_of(board, cell) == Some(col)
}

/// Whether the man on `cell` has a capture available: an enemy man on
/// an adjacent cell with an empty playable landing two steps beyond.
///
/// A man standing on its own castle cell can never capture; the castle
/// lockdown is encoded here so that the mandatory-capture scan never
/// counts a castled man. The forced-exit rule consults
/// [`can_capture_out_of_castle`] instead.
pub fn can_capture_from(board: &Board, col: Color, cell: Cell) -> bool {
    if board::is_own_castle_cell(col, cell) {
        return false;
    }
    capture_available(board, col, cell)
}

/// The raw directional scan, without the own-castle exception.
fn capture_available(board: &Board, col: Color, cell: Cell) -> bool {
    Compass::VARIANTS.iter().copied().any(|dir| {
        cell.step(dir)
            .is_some_and(|over| owner_of(board, over) == Some(col.opp()))
            && cell.jump(dir).is_some_and(|landing| board.is_empty(landing))
    })
}

/// Whole-board mandatory-capture detection: true when any man of the
/// given color satisfies [`can_capture_from`].
pub fn can_capture_anywhere(board: &Board, col: Color) -> bool {
    board.men(col).any(|(cell, _)| can_capture_from(board, col, cell))
}

/// Whether a man of `col` sitting in its own castle could capture if
/// the castle lockdown were waived, which is exactly the situation of
/// the forced exit: the obligated exit move must then be that capture.
pub fn can_capture_out_of_castle(board: &Board, col: Color) -> bool {
    board::own_castle(col)
        .into_iter()
        .any(|cell| is_own_man(board, col, cell) && capture_available(board, col, cell))
}
