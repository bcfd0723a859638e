//! Per-kind movement rules (the shape-legality predicate).
//!
//! One exhaustive match over `PieceKind` decides whether a relocation obeys
//! a piece's geometric pattern and path clearance, *without* regard to
//! whether it leaves the mover's king attacked — that filtering lives in
//! `movegen`. The same predicate serves two callers:
//!
//!   - `MoveMode::Full` — ordinary legality: destination occupancy rules
//!     apply (own piece blocks, pawns push only onto empty squares).
//!   - `MoveMode::AttackProbe` — attack-map probes: "could a piece of this
//!     kind capture on `to`?" Pawns reduce to their diagonal shape
//!     regardless of occupancy, since a pawn covers those squares even
//!     while they are empty.

use crate::engine::board::Board;
use crate::engine::types::{Color, Piece, PieceKind, Square};

/// How the shape predicate treats destination occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveMode {
    /// Evaluate as a real move.
    Full,
    /// Evaluate as an attack probe for king-safety computation.
    AttackProbe,
}

/// Whether relocating the piece on `from` to `to` obeys its movement
/// pattern on this board. Returns false for empty origins, no-op moves,
/// and (in `Full` mode) destinations holding a same-color piece.
pub fn shape_legal(board: &Board, from: Square, to: Square, mode: MoveMode) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    let dest = board.piece_at(to);
    if mode == MoveMode::Full && dest.is_some_and(|d| d.color == piece.color) {
        return false;
    }

    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_shape(board, piece.color, from, dr, dc, dest, mode),
        PieceKind::Knight => {
            (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
        }
        PieceKind::Bishop => dr.abs() == dc.abs() && board.path_clear(from, to),
        PieceKind::Rook => (dr == 0) != (dc == 0) && board.path_clear(from, to),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && board.path_clear(from, to)
        }
        PieceKind::King => dr.abs().max(dc.abs()) == 1,
    }
}

/// Pawn geometry: forward pushes onto empty squares, diagonal captures
/// onto enemy pieces, and the double step from the starting row.
fn pawn_shape(
    board: &Board,
    color: Color,
    from: Square,
    dr: i8,
    dc: i8,
    dest: Option<Piece>,
    mode: MoveMode,
) -> bool {
    let dir = color.forward();

    // A pawn covers its two capture squares whether or not they are
    // occupied; that is all an attack probe asks.
    if mode == MoveMode::AttackProbe {
        return dc.abs() == 1 && dr == dir;
    }

    // Single step forward onto an empty square.
    if dc == 0 && dr == dir && dest.is_none() {
        return true;
    }

    // Double step from the starting row, both squares empty.
    if dc == 0 && dr == 2 * dir && from.row == color.pawn_row() && dest.is_none() {
        let intermediate = Square::new((from.row as i8 + dir) as u8, from.col);
        if board.piece_at(intermediate).is_none() {
            return true;
        }
    }

    // Diagonal capture onto an enemy piece.
    dc.abs() == 1 && dr == dir && dest.is_some_and(|d| d.color != color)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
