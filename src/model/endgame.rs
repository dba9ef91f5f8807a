//! Win and draw evaluation.
//!
//! Invoked after every completed turn, plus a mobility check when the
//! next turn opens: a player with no legal move at all loses on the
//! spot (or draws, when the opponent is down to a lone man).

use strum::VariantArray;

use crate::model::board::Board;
use crate::model::legality::ruling;
use crate::model::turn::TurnState;
use crate::model::{Color, Compass, GameResult};

/// Evaluate a settled position, after a turn has been completed.
///
/// Castle occupation trumps the piece counts: a color holding both
/// cells of the opposing castle wins regardless of material. For
/// material, a side needs two men to keep winning chances: both sides
/// reduced to one or zero men is a draw, one side reduced while the
/// other keeps two or more loses.
pub fn evaluate(board: &Board) -> Option<GameResult> {
    for col in [Color::WHITE, Color::BLACK] {
        if board.holds_enemy_castle(col) {
            return Some(GameResult::Winner(col));
        }
    }

    let white = board.count(Color::WHITE);
    let black = board.count(Color::BLACK);
    match (white < 2, black < 2) {
        (true, true) => Some(GameResult::Draw),
        (true, false) => Some(GameResult::Winner(Color::BLACK)),
        (false, true) => Some(GameResult::Winner(Color::WHITE)),
        (false, false) => None,
    }
}

/// Whether the player whose turn just opened has any legal sub-move.
///
/// Walks every owned man and every one- and two-step destination
/// through the full ruling, so the forced-exit and mandatory-capture
/// restrictions are honored.
pub fn mover_has_any_move(board: &Board, turn: &TurnState, col: Color) -> bool {
    board.men(col).any(|(cell, _)| {
        Compass::VARIANTS.iter().copied().any(|dir| {
            cell.step(dir)
                .is_some_and(|to| ruling(board, turn, col, cell, to).legal)
                || cell
                    .jump(dir)
                    .is_some_and(|to| ruling(board, turn, col, cell, to).legal)
        })
    })
}

/// The result of a player opening their turn with no legal move: the
/// opponent wins with two or more men remaining, otherwise a draw.
pub fn immobilized(board: &Board, stuck: Color) -> GameResult {
    if board.count(stuck.opp()) >= 2 {
        GameResult::Winner(stuck.opp())
    } else {
        GameResult::Draw
    }
}
