//! A rules engine for Camelot, the chase-and-capture board game played
//! on a cross-shaped 16 by 12 grid with two castle refuges.
//!
//! The crate is a pure state-transition library: given a board and the
//! partial progress of the current turn it rules on proposed moves,
//! enforces mandatory captures and the knight's charge, polices the
//! castle restrictions, and settles wins and draws. Display, input
//! devices, and transport are external callers of
//! [`model::game::Match`].

/// Modeling the game of Camelot.
pub mod model;

/// Text forms for cells and move trails.
pub mod notation;

#[test]
fn opening_moves_flow() {
    use crate::model::game::Match;
    use crate::model::{Cell, Color};

    let mut game = Match::new();
    let from = Cell::new(123);

    let targets = game.legal_targets(from);
    assert!(!targets.is_empty());
    let to = targets[0];
    game.move_man(Color::WHITE, from, to).unwrap();
    assert_eq!(game.submit_turn(Color::WHITE), Ok(None));
    assert_eq!(game.to_move(), Color::BLACK);
}
