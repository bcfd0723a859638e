//! Move legality and terminal-state detection.
//!
//! Pipeline:
//!   1. Shape test (movement pattern + path clearance, `rules`).
//!   2. Self-check filter: apply the candidate on a copy of the board and
//!      verify the mover's king is not attacked afterwards.
//!
//! Simulating on a copy covers king moves correctly too: the king's origin
//! square is vacant on the copy, so stepping backwards along a ray it was
//! blocking is rejected. The queried board itself is never touched.
//!
//! Terminal detection enumerates every `(from, to)` candidate for a side —
//! O(64×64) shape tests in the worst case, which is fine at this scale.

use crate::engine::attacks;
use crate::engine::board::Board;
use crate::engine::rules::{MoveMode, shape_legal};
use crate::engine::types::{Color, Move, Square, TerminalState};

// =========================================================================
// Legality filter
// =========================================================================

/// Whether `side_to_move` may play `from -> to` on this board.
///
/// Malformed queries (empty origin, opponent's piece on the origin) are
/// answered with `false` rather than an error, so callers that only check
/// a boolean never have to handle a fault path.
pub fn legal_move(board: &Board, from: Square, to: Square, side_to_move: Color) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color != side_to_move {
        return false;
    }
    if !shape_legal(board, from, to, MoveMode::Full) {
        return false;
    }
    // Self-check filter on an independent copy.
    !attacks::is_in_check(&board.apply_move(from, to), side_to_move)
}

/// All legal moves for `side` on this board.
pub fn legal_moves(board: &Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces() {
        if piece.color != side {
            continue;
        }
        for to in Square::all() {
            if legal_move(board, from, to, side) {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Legal moves originating from a specific square.
pub fn legal_moves_from(board: &Board, from: Square, side: Color) -> Vec<Move> {
    Square::all()
        .filter(|&to| legal_move(board, from, to, side))
        .map(|to| Move::new(from, to))
        .collect()
}

/// Early-exit scan: does `side` have any legal move at all?
fn has_legal_move(board: &Board, side: Color) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == side)
        .any(|(from, _)| Square::all().any(|to| legal_move(board, from, to, side)))
}

// =========================================================================
// Terminal-state detection
// =========================================================================

/// Classify the position for `color`, the side to move.
pub fn classify_terminal(board: &Board, color: Color) -> TerminalState {
    if has_legal_move(board, color) {
        return TerminalState::Ongoing;
    }
    if attacks::is_in_check(board, color) {
        TerminalState::Checkmate
    } else {
        TerminalState::Stalemate
    }
}

/// Checkmate: king attacked and no candidate move survives the filter.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    attacks::is_in_check(board, color) && !has_legal_move(board, color)
}

/// Stalemate: king *not* attacked, yet no candidate move survives.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !attacks::is_in_check(board, color) && !has_legal_move(board, color)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Piece, PieceKind};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn place(board: &mut Board, name: &str, color: Color, kind: PieceKind) {
        board.set(sq(name), Some(Piece::new(color, kind)));
    }

    // -------------------------------------------------------------------
    // Basic legality
    // -------------------------------------------------------------------

    #[test]
    fn starting_position_has_20_moves_per_side() {
        let b = Board::standard();
        assert_eq!(legal_moves(&b, Color::White).len(), 20);
        assert_eq!(legal_moves(&b, Color::Black).len(), 20);
    }

    #[test]
    fn legal_moves_from_e2() {
        let b = Board::standard();
        let moves = legal_moves_from(&b, sq("e2"), Color::White);
        assert_eq!(moves.len(), 2); // e3, e4
    }

    #[test]
    fn legal_moves_from_empty_square() {
        let b = Board::standard();
        assert!(legal_moves_from(&b, sq("e4"), Color::White).is_empty());
    }

    #[test]
    fn wrong_side_cannot_move() {
        let b = Board::standard();
        assert!(!legal_move(&b, sq("e7"), sq("e5"), Color::White));
        assert!(!legal_move(&b, sq("e2"), sq("e4"), Color::Black));
    }

    #[test]
    fn empty_origin_is_not_legal() {
        let b = Board::standard();
        assert!(!legal_move(&b, sq("d5"), sq("d6"), Color::White));
    }

    // -------------------------------------------------------------------
    // Self-check filter
    // -------------------------------------------------------------------

    #[test]
    fn pinned_piece_cannot_expose_king() {
        // White king e1, white rook e2, black queen e8: the rook is pinned
        // to the e-file and may not step sideways.
        let mut b = Board::empty();
        place(&mut b, "e1", Color::White, PieceKind::King);
        place(&mut b, "e2", Color::White, PieceKind::Rook);
        place(&mut b, "e8", Color::Black, PieceKind::Queen);
        place(&mut b, "a8", Color::Black, PieceKind::King);
        assert!(!legal_move(&b, sq("e2"), sq("d2"), Color::White));
        // Along the pin line is fine.
        assert!(legal_move(&b, sq("e2"), sq("e5"), Color::White));
        assert!(legal_move(&b, sq("e2"), sq("e8"), Color::White));
    }

    #[test]
    fn must_answer_a_check() {
        // White king e1 checked by a rook on e8; pushing the a-pawn does
        // not address the check and is illegal.
        let mut b = Board::empty();
        place(&mut b, "e1", Color::White, PieceKind::King);
        place(&mut b, "a2", Color::White, PieceKind::Pawn);
        place(&mut b, "e8", Color::Black, PieceKind::Rook);
        place(&mut b, "a8", Color::Black, PieceKind::King);
        assert!(!legal_move(&b, sq("a2"), sq("a3"), Color::White));
        assert!(legal_move(&b, sq("e1"), sq("d2"), Color::White));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut b = Board::empty();
        place(&mut b, "e1", Color::White, PieceKind::King);
        place(&mut b, "a2", Color::Black, PieceKind::Rook);
        place(&mut b, "a8", Color::Black, PieceKind::King);
        assert!(!legal_move(&b, sq("e1"), sq("e2"), Color::White));
        assert!(legal_move(&b, sq("e1"), sq("f1"), Color::White));
    }

    #[test]
    fn king_cannot_retreat_along_the_checking_ray() {
        // Rook on e8 checks the king on e4 down the open e-file. e3 is
        // still on that ray; a scan of the pre-move board would call it
        // safe only because the king itself blocks the rook there.
        let mut b = Board::empty();
        place(&mut b, "e4", Color::White, PieceKind::King);
        place(&mut b, "e8", Color::Black, PieceKind::Rook);
        place(&mut b, "a8", Color::Black, PieceKind::King);
        assert!(!legal_move(&b, sq("e4"), sq("e3"), Color::White));
        assert!(legal_move(&b, sq("e4"), sq("d3"), Color::White));
    }

    #[test]
    fn legal_move_leaves_board_untouched() {
        let b = Board::standard();
        let before = b;
        let _ = legal_move(&b, sq("e2"), sq("e4"), Color::White); // legal
        assert_eq!(b, before);
        let _ = legal_move(&b, sq("a1"), sq("a5"), Color::White); // illegal
        assert_eq!(b, before);
    }

    // -------------------------------------------------------------------
    // Terminal states
    // -------------------------------------------------------------------

    #[test]
    fn starting_position_is_ongoing() {
        let b = Board::standard();
        assert_eq!(classify_terminal(&b, Color::White), TerminalState::Ongoing);
        assert_eq!(classify_terminal(&b, Color::Black), TerminalState::Ongoing);
    }

    #[test]
    fn back_rank_mate() {
        // Black king boxed on h8 by its own pawns, white rook delivers on
        // the back rank.
        let mut b = Board::empty();
        place(&mut b, "h8", Color::Black, PieceKind::King);
        place(&mut b, "g7", Color::Black, PieceKind::Pawn);
        place(&mut b, "h7", Color::Black, PieceKind::Pawn);
        place(&mut b, "a8", Color::White, PieceKind::Rook);
        place(&mut b, "e1", Color::White, PieceKind::King);
        assert!(is_checkmate(&b, Color::Black));
        assert_eq!(
            classify_terminal(&b, Color::Black),
            TerminalState::Checkmate
        );
    }

    #[test]
    fn check_with_escape_is_not_mate() {
        let mut b = Board::empty();
        place(&mut b, "h8", Color::Black, PieceKind::King);
        place(&mut b, "a8", Color::White, PieceKind::Rook);
        place(&mut b, "e1", Color::White, PieceKind::King);
        // Kh7 escapes.
        assert!(!is_checkmate(&b, Color::Black));
        assert_eq!(classify_terminal(&b, Color::Black), TerminalState::Ongoing);
    }

    #[test]
    fn classic_stalemate_corner() {
        // Black king a8, white queen b6, white king c7: Black has no move
        // and is not in check.
        let mut b = Board::empty();
        place(&mut b, "a8", Color::Black, PieceKind::King);
        place(&mut b, "b6", Color::White, PieceKind::Queen);
        place(&mut b, "c7", Color::White, PieceKind::King);
        assert!(is_stalemate(&b, Color::Black));
        assert_eq!(
            classify_terminal(&b, Color::Black),
            TerminalState::Stalemate
        );
        // White, to move, is fine.
        assert_eq!(classify_terminal(&b, Color::White), TerminalState::Ongoing);
    }

    #[test]
    fn blocking_piece_averts_mate() {
        // Same back-rank pattern, but a rook on g1 can interpose on g8.
        let mut b = Board::empty();
        place(&mut b, "h8", Color::Black, PieceKind::King);
        place(&mut b, "g7", Color::Black, PieceKind::Pawn);
        place(&mut b, "h7", Color::Black, PieceKind::Pawn);
        place(&mut b, "g1", Color::Black, PieceKind::Rook);
        place(&mut b, "a8", Color::White, PieceKind::Rook);
        place(&mut b, "e1", Color::White, PieceKind::King);
        assert!(!is_checkmate(&b, Color::Black));
        let moves = legal_moves(&b, Color::Black);
        assert!(moves.contains(&Move::new(sq("g1"), sq("g8"))));
    }

    #[test]
    fn mate_and_stalemate_are_exclusive() {
        let mut b = Board::empty();
        place(&mut b, "a8", Color::Black, PieceKind::King);
        place(&mut b, "b6", Color::White, PieceKind::Queen);
        place(&mut b, "c7", Color::White, PieceKind::King);
        assert!(!is_checkmate(&b, Color::Black));
        assert!(is_stalemate(&b, Color::Black));
    }
}
