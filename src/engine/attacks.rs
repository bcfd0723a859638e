//! Attack and check queries.
//!
//! Built directly on the shape predicate in attack-probe mode, so the
//! attack map and ordinary move legality can never drift apart.

use crate::engine::board::Board;
use crate::engine::rules::{MoveMode, shape_legal};
use crate::engine::types::{Color, Square};

/// Whether any piece of `by` could capture on `target` under shape rules.
pub fn square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, _)| shape_legal(board, from, target, MoveMode::AttackProbe))
}

/// Whether `color`'s king is currently attacked.
///
/// A board without a king of `color` is unreachable through play; direct
/// construction of one answers "not attacked" rather than failing.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => square_attacked(board, king, !color),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
