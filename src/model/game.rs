//! The turn-processing authority for one game.
//!
//! [`Match`] is the single writer of game state: it owns the board
//! and the current [`TurnState`], arbitrates who is to move, applies
//! sub-moves, validates submissions, and settles the result. External
//! layers (presentation, transport) only ever call in; nothing here
//! suspends or shares state.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::board::Board;
use crate::model::legality::{self, Ruling};
use crate::model::turn::{Obligation, TurnState};
use crate::model::{Cell, Color, GRID, GameResult, Man, endgame};

/// A typed refusal. Every rejection is local and non-fatal: the board
/// and turn state are exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Refusal {
    /// The proposed destination is illegal for the chosen man.
    InvalidMove,
    /// The caller is not the player to move.
    WrongMover,
    /// Submission refused; the mover still owes a move.
    ObligationUnmet(Obligation),
    /// A result has been produced; no further moves are accepted.
    GameOver,
}

impl Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMove => f.write_str("illegal move"),
            Self::WrongMover => f.write_str("not this player's turn"),
            Self::ObligationUnmet(ob) => ob.fmt(f),
            Self::GameOver => f.write_str("the game is already over"),
        }
    }
}

impl std::error::Error for Refusal {}

/// One game of Camelot from setup to settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    board: Board,
    turn: TurnState,
    to_move: Color,
    result: Option<GameResult>,
    /// Trail of the previous completed turn, for highlighting.
    last_turn_trail: Vec<Cell>,
    /// Every man removed over the whole game, in capture order.
    captured_men: Vec<Man>,
}

impl Match {
    /// A fresh game from the canonical starting layout, White to move.
    pub fn new() -> Self {
        Self::with_board(Board::startpos(), Color::WHITE)
    }

    /// Start from an arbitrary position, for problems and tests.
    pub fn with_board(board: Board, to_move: Color) -> Self {
        let turn = TurnState::open(&board, to_move, [0, 0]);
        Self {
            board,
            turn,
            to_move,
            result: None,
            last_turn_trail: Vec::new(),
            captured_men: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    pub fn last_turn_trail(&self) -> &[Cell] {
        &self.last_turn_trail
    }

    #[inline]
    pub fn captured_men(&self) -> &[Man] {
        &self.captured_men
    }

    fn gate(&self, col: Color) -> Result<(), Refusal> {
        if self.result.is_some() {
            return Err(Refusal::GameOver);
        }
        if col != self.to_move {
            return Err(Refusal::WrongMover);
        }
        Ok(())
    }

    /// The ruling on one proposed sub-move for the player to move,
    /// without applying it.
    pub fn ruling(&self, chosen: Cell, target: Cell) -> Ruling {
        legality::ruling(&self.board, &self.turn, self.to_move, chosen, target)
    }

    /// Every legal destination for the man on `chosen` right now;
    /// what a front end lights up on selection.
    pub fn legal_targets(&self, chosen: Cell) -> Vec<Cell> {
        if self.result.is_some() {
            return Vec::new();
        }
        (0..GRID)
            .map(Cell::new)
            .filter(|&target| self.ruling(chosen, target).legal)
            .collect()
    }

    /// Apply one sub-move for `col`.
    pub fn move_man(&mut self, col: Color, from: Cell, to: Cell) -> Result<Ruling, Refusal> {
        self.gate(col)?;
        let verdict = legality::apply(&mut self.board, &mut self.turn, col, from, to);
        if verdict.legal {
            Ok(verdict)
        } else {
            Err(Refusal::InvalidMove)
        }
    }

    /// Revert the last sub-move of the current, unsubmitted turn.
    pub fn undo(&mut self, col: Color) -> Result<(), Refusal> {
        self.gate(col)?;
        if self.turn.undo(&mut self.board) {
            Ok(())
        } else {
            Err(Refusal::InvalidMove)
        }
    }

    /// Close out the current turn: check the mover's outstanding
    /// obligations, settle the position, and hand over to the
    /// opponent. Returns the result if this submission ended the game.
    pub fn submit_turn(&mut self, col: Color) -> Result<Option<GameResult>, Refusal> {
        self.gate(col)?;
        if self.turn.kind.is_none() {
            return Err(Refusal::InvalidMove);
        }
        self.turn.submit(&self.board).map_err(Refusal::ObligationUnmet)?;

        self.captured_men
            .extend(self.turn.captured.iter().map(|&(_, man)| man));
        self.last_turn_trail = std::mem::take(&mut self.turn.trail);
        let shuffles = self.turn.shuffles;

        if let Some(result) = endgame::evaluate(&self.board) {
            self.result = Some(result);
            return Ok(Some(result));
        }

        self.to_move = col.opp();
        self.turn = TurnState::open(&self.board, self.to_move, shuffles);

        // A player who opens their turn with no legal move loses it
        // on the spot.
        if !endgame::mover_has_any_move(&self.board, &self.turn, self.to_move) {
            let result = endgame::immobilized(&self.board, self.to_move);
            self.result = Some(result);
            return Ok(Some(result));
        }

        Ok(None)
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
