//! Per-destination move legality and move application.
//!
//! [`ruling`] is the single composition point of the rules: the
//! one-piece-per-turn lock, the forced castle exit, the shuffle cap,
//! castle re-entry, mandatory capture, and the knight's-charge
//! restriction on canters. [`apply`] validates and then mutates board
//! and turn state in place, journalling enough to undo exactly.

use strum::VariantArray;

use crate::model::board::{self, Board};
use crate::model::charge::charge_reachable;
use crate::model::occupancy::is_own_man;
use crate::model::turn::{Step, TurnState};
use crate::model::{Cell, Color, Compass, MoveKind};

/// The verdict on one proposed sub-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ruling {
    pub legal: bool,
    /// The move is a non-capturing jump over a friendly man.
    pub canter: bool,
    /// Cell of the enemy man this move captures, if any.
    pub captured: Option<Cell>,
}

impl Ruling {
    pub const REFUSED: Ruling = Ruling {
        legal: false,
        canter: false,
        captured: None,
    };

    const BASIC: Ruling = Ruling {
        legal: true,
        canter: false,
        captured: None,
    };

    const CANTER: Ruling = Ruling {
        legal: true,
        canter: true,
        captured: None,
    };

    fn capture(over: Cell) -> Ruling {
        Ruling {
            legal: true,
            canter: false,
            captured: Some(over),
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Rule on moving the man on `chosen` to the empty cell `target`.
///
/// Pure: consults but never mutates board or turn state.
pub fn ruling(
    board: &Board,
    turn: &TurnState,
    col: Color,
    chosen: Cell,
    target: Cell,
) -> Ruling {
    if !board.is_empty(target) || !is_own_man(board, col, chosen) {
        return Ruling::REFUSED;
    }

    // One man per turn: once a man has moved, every other man is
    // locked for the rest of the turn. A plain step is terminal.
    if turn.moving_man.is_some_and(|moving| moving != chosen) {
        return Ruling::REFUSED;
    }
    if turn.kind.is_basic() {
        return Ruling::REFUSED;
    }

    let castle_origin = board::is_own_castle_cell(col, chosen);

    if turn.must_leave_castle {
        // Only moves out of the castle (or the limited shuffle) are
        // eligible while the exit is owed.
        if !castle_origin {
            return Ruling::REFUSED;
        }
    } else if castle_origin {
        // A capture chain may end in one's own castle, but the man is
        // locked down there for the rest of the turn.
        return Ruling::REFUSED;
    }

    for dir in Compass::VARIANTS.iter().copied() {
        if chosen.step(dir) == Some(target) {
            return step_ruling(turn, col, chosen, target, castle_origin);
        }
        if chosen.jump(dir) == Some(target) {
            return jump_ruling(board, turn, col, chosen, target, dir);
        }
    }

    Ruling::REFUSED
}

/// A one-step move: the plain step, the forced castle exit, or the
/// in-castle shuffle.
fn step_ruling(
    turn: &TurnState,
    col: Color,
    _chosen: Cell,
    target: Cell,
    castle_origin: bool,
) -> Ruling {
    // A basic move is only ever the sole move of a turn.
    if turn.moving_man.is_some() {
        return Ruling::REFUSED;
    }

    let castle_target = board::is_own_castle_cell(col, target);

    if castle_origin {
        if castle_target {
            // Castle shuffle, capped at two per game per color.
            if turn.shuffles[col.ix()] >= 2 {
                return Ruling::REFUSED;
            }
            return Ruling::BASIC;
        }
        // The forced exit overrides the capture requirement for this
        // one step.
        return Ruling::BASIC;
    }

    if castle_target {
        // No voluntary re-entry of one's own castle by a plain step.
        return Ruling::REFUSED;
    }
    if turn.mandatory_capture {
        return Ruling::REFUSED;
    }
    Ruling::BASIC
}

/// A two-step jump: canter over a friend or capture over an enemy.
fn jump_ruling(
    board: &Board,
    turn: &TurnState,
    col: Color,
    chosen: Cell,
    target: Cell,
    dir: Compass,
) -> Ruling {
    let Some(over) = chosen.step(dir) else {
        return Ruling::REFUSED;
    };
    let Some(over_man) = board.get(over) else {
        return Ruling::REFUSED;
    };
    if turn.visited.contains(&target) {
        return Ruling::REFUSED;
    }

    let Some(man) = board.get(chosen) else {
        return Ruling::REFUSED;
    };

    if over_man.col() == col {
        // Canter. Never into one's own castle; only a chain of
        // captures may end there.
        if board::is_own_castle_cell(col, target) {
            return Ruling::REFUSED;
        }
        // Admissible mid-chain: first move, an ongoing canter chain,
        // or a knight interleaving within a capture chain.
        match turn.kind {
            MoveKind::NONE | MoveKind::CANTER => {}
            MoveKind::CAPTURE if man.ech().may_charge() => {}
            _ => return Ruling::REFUSED,
        }
        // Under mandatory capture or a forced exit a free canter is
        // only legal as part of a knight's charge.
        if turn.mandatory_capture || turn.must_leave_castle {
            if !man.ech().may_charge() {
                return Ruling::REFUSED;
            }
            if !charge_reachable(board, col, chosen).contains(&target) {
                return Ruling::REFUSED;
            }
        }
        Ruling::CANTER
    } else {
        // Capture. A pawn mid-canter cannot suddenly capture; a
        // knight may. Capturing into either castle is always allowed.
        match turn.kind {
            MoveKind::NONE | MoveKind::CAPTURE => {}
            MoveKind::CANTER if man.ech().may_charge() => {}
            _ => return Ruling::REFUSED,
        }
        Ruling::capture(over)
    }
}

/// Validate and perform one sub-move, mutating board and turn state in
/// place. The returned ruling is [`Ruling::REFUSED`] when nothing was
/// changed.
pub fn apply(
    board: &mut Board,
    turn: &mut TurnState,
    col: Color,
    chosen: Cell,
    target: Cell,
) -> Ruling {
    debug_assert_eq!(col, turn.mover);

    let verdict = ruling(board, turn, col, chosen, target);
    if !verdict.legal {
        return verdict;
    }

    let first_move = turn.moving_man.is_none();
    let castle_origin = board::is_own_castle_cell(col, chosen);
    let was_shuffle = castle_origin && board::is_own_castle_cell(col, target);
    let exit_taken = turn.must_leave_castle && castle_origin && !was_shuffle;
    let prev_kind = turn.kind;
    let prev_must_leave = turn.must_leave_castle;

    board.relocate(chosen, target);
    let mut captured = None;
    if let Some(cap) = verdict.captured {
        let man = board.remove(cap);
        captured = Some((cap, man));
        turn.captured.push((cap, man));
    }

    turn.kind = if verdict.is_capture() {
        MoveKind::CAPTURE
    } else if verdict.canter {
        // Capture outranks canter once a chain has drawn blood.
        prev_kind.max(MoveKind::CANTER)
    } else {
        MoveKind::BASIC
    };

    if first_move {
        turn.trail.push(chosen);
    }
    turn.trail.push(target);
    let visited_added = (verdict.canter || verdict.is_capture()) && turn.visited.insert(target);
    turn.moving_man = Some(target);

    if was_shuffle {
        turn.shuffles[col.ix()] += 1;
    }
    if exit_taken {
        turn.must_leave_castle = false;
        turn.castle_exit_taken = true;
    }

    turn.steps.push(Step {
        from: chosen,
        to: target,
        captured,
        prev_kind,
        prev_must_leave,
        first_move,
        was_shuffle,
        visited_added,
        exit_taken,
    });

    verdict
}
