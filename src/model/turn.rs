//! Partial-turn state and the submission obligations.
//!
//! A [`TurnState`] is rebuilt from the board at the start of each
//! player's turn, mutated by every accepted sub-move, and consulted at
//! submission. Undo pops one journal entry at a time so the exact
//! replay order of a chain is preserved, rather than restoring board
//! snapshots.

use std::fmt::Display;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::model::board::{self, Board};
use crate::model::charge::charge_reachable;
use crate::model::occupancy::{can_capture_anywhere, can_capture_from, can_capture_out_of_castle};
use crate::model::{Cell, Color, Man, MoveKind};

/// Why a turn submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obligation {
    /// A capture was available at turn start and none was made.
    MustCapture,
    /// The moved man can still capture mid-chain.
    MustKeepCapturing,
    /// A knight cantered along a path from which a capture is (still)
    /// reachable, and stopped short.
    MissedCharge,
    /// The forced castle exit had a capture available and the player
    /// left, or stayed, without taking it.
    MustCaptureOutOfCastle,
}

impl Display for Obligation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MustCapture => "must capture this turn",
            Self::MustKeepCapturing => {
                "must continue capturing until no more captures are possible"
            }
            Self::MissedCharge => "missed a knight's charge opportunity along this path",
            Self::MustCaptureOutOfCastle => "must capture out of the castle this turn",
        })
    }
}

/// One accepted sub-move, with everything needed to revert it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Step {
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<(Cell, Man)>,
    pub prev_kind: MoveKind,
    pub prev_must_leave: bool,
    pub first_move: bool,
    pub was_shuffle: bool,
    pub visited_added: bool,
    pub exit_taken: bool,
}

/// The partial progress of the player to move within the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// The player whose turn this is.
    pub mover: Color,
    /// Destination cell of the man moved so far this turn; once set,
    /// only that man may move again this turn.
    pub moving_man: Option<Cell>,
    /// Classification of the turn so far.
    pub kind: MoveKind,
    /// Cells landed on by jumps this turn; revisiting is illegal.
    pub visited: IndexSet<Cell>,
    /// Cells the moving man has occupied this turn, origin first.
    pub trail: Vec<Cell>,
    /// Men removed this turn, in capture order.
    pub captured: Vec<(Cell, Man)>,
    /// Whether the mover had any capture available at turn start.
    pub mandatory_capture: bool,
    /// Whether the mover occupies their own castle and must vacate it.
    pub must_leave_castle: bool,
    /// Whether the forced exit has a capture available, in which case
    /// the exit move must be that capture.
    pub capture_out_of_castle: bool,
    /// Whether the forced exit has been performed this turn.
    pub castle_exit_taken: bool,
    /// Times each color has moved between its own two castle cells,
    /// capped at two for the whole game. Carried across turns.
    pub shuffles: [u8; 2],
    pub(crate) steps: Vec<Step>,
}

impl TurnState {
    /// Open a fresh turn for `mover` on the given board. The shuffle
    /// counters are the only piece of state carried over from earlier
    /// turns.
    pub fn open(board: &Board, mover: Color, shuffles: [u8; 2]) -> Self {
        let in_castle = board::own_castle(mover)
            .into_iter()
            .any(|cell| board.get(cell).is_some_and(|man| man.col() == mover));
        Self {
            mover,
            moving_man: None,
            kind: MoveKind::NONE,
            visited: IndexSet::new(),
            trail: Vec::new(),
            captured: Vec::new(),
            mandatory_capture: can_capture_anywhere(board, mover),
            must_leave_castle: in_castle,
            capture_out_of_castle: can_capture_out_of_castle(board, mover),
            castle_exit_taken: false,
            shuffles,
            steps: Vec::new(),
        }
    }

    /// Number of men removed so far this turn.
    #[inline]
    pub fn captures_this_turn(&self) -> usize {
        self.captured.len()
    }

    /// Validate that the turn may end now. `Err` carries the reason
    /// the player still owes a move; nothing is mutated either way.
    ///
    /// # Panics
    ///
    /// At least one sub-move must have been accepted this turn.
    /// Submitting an empty turn is a caller contract violation, not a
    /// rule refusal; [`Match::submit_turn`](crate::model::game::Match)
    /// screens it out before reaching here.
    pub fn submit(&self, board: &Board) -> Result<(), Obligation> {
        let mover_cell = self
            .moving_man
            .expect("submit called before any move this turn");
        let man = board
            .get(mover_cell)
            .expect("moving man vanished from the board");

        if self.captured.is_empty() {
            if self.kind.is_canter()
                && man.ech().may_charge()
                && !charge_reachable(board, self.mover, mover_cell).is_empty()
            {
                return Err(Obligation::MissedCharge);
            }
            if self.capture_out_of_castle {
                return Err(Obligation::MustCaptureOutOfCastle);
            }
            if self.mandatory_capture && !self.castle_exit_taken {
                return Err(Obligation::MustCapture);
            }
            Ok(())
        } else if can_capture_from(board, self.mover, mover_cell) {
            Err(Obligation::MustKeepCapturing)
        } else {
            Ok(())
        }
    }

    /// Revert the last accepted sub-move, restoring board and turn
    /// state to the instant before it. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self, board: &mut Board) -> bool {
        let Some(step) = self.steps.pop() else {
            return false;
        };

        board.relocate(step.to, step.from);
        if let Some((cell, man)) = step.captured {
            board.place(cell, man);
            self.captured.pop();
        }
        if step.visited_added {
            self.visited.pop();
        }
        self.trail.pop();
        if step.first_move {
            self.trail.pop();
            self.moving_man = None;
        } else {
            self.moving_man = Some(step.from);
        }
        if step.was_shuffle {
            self.shuffles[self.mover.ix()] -= 1;
        }
        if step.exit_taken {
            self.castle_exit_taken = false;
        }
        self.kind = step.prev_kind;
        self.must_leave_castle = step.prev_must_leave;
        true
    }
}
