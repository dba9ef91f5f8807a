//! The knight's-charge pathfinder.
//!
//! A knight that begins canter-jumping may not settle for a free
//! canter destination while some further sequence of canters would
//! bring it to a capture. The search below answers "which canter
//! landings lie on some charge-completing path" by breadth-first
//! search over canter edges on a scratch copy of the board, so the
//! hypothetical jumps never touch real state.

use std::collections::VecDeque;

use indexmap::IndexSet;
use strum::VariantArray;

use crate::model::board::Board;
use crate::model::occupancy::can_capture_from;
use crate::model::{Cell, Color, Compass, Echelon};

/// All cells reachable from `knight` by chains of canter jumps,
/// provided at least one of them (the start included) offers an
/// immediate capture; the empty set otherwise.
///
/// When the set is non-empty every member is a legal intermediate
/// canter destination, because it was reached while a capture remains
/// reachable; turn submission separately refuses to end a chain that
/// never cashed the capture in. Deterministic: the same board and cell
/// always yield the same set in the same insertion order.
pub fn charge_reachable(board: &Board, col: Color, knight: Cell) -> IndexSet<Cell> {
    debug_assert_eq!(
        board.get(knight).map(|man| (man.col(), man.ech())),
        Some((col, Echelon::KNIGHT)),
        "charge search from a cell not holding an own knight"
    );

    let mut scratch = board.clone();
    scratch.remove(knight);

    let mut visited = IndexSet::new();
    let mut frontier = VecDeque::new();
    visited.insert(knight);
    frontier.push_back(knight);

    let mut capture_seen = false;

    while let Some(at) = frontier.pop_front() {
        // The scratch board has the knight lifted off entirely; the
        // directional capture scan only inspects the neighborhood of
        // `at`, which is where the knight hypothetically stands.
        capture_seen |= can_capture_from(&scratch, col, at);

        for dir in Compass::VARIANTS.iter().copied() {
            let Some(over) = at.step(dir) else { continue };
            if !scratch.get(over).is_some_and(|man| man.col() == col) {
                continue;
            }
            let Some(landing) = at.jump(dir) else { continue };
            if scratch.is_empty(landing) && visited.insert(landing) {
                frontier.push_back(landing);
            }
        }
    }

    if capture_seen { visited } else { IndexSet::new() }
}
