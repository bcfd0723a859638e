//! Mailbox board representation.
//!
//! `Board` is an 8×8 grid of `Option<Piece>` — pure data with accessors,
//! the open-interval path walk used by sliding pieces, and a *pure*
//! `apply_move` that returns a new board value. `Board` is `Copy`, so
//! legality checks simulate moves on an independent copy and the caller's
//! board is never observed in a half-applied state.

use std::fmt;

use crate::engine::types::{ChessError, Color, Piece, PieceKind, Square};

/// Back-rank piece order, a-file to h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An 8×8 chess board. Indexed `[row][col]`, row 0 = Black's back rank.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard initial placement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in [Color::Black, Color::White] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board.squares[color.back_row() as usize][col] = Some(Piece::new(color, kind));
            }
            for col in 0..8 {
                board.squares[color.pawn_row() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    /// Place or clear a square.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Iterate over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Locate the king of `color`. `None` when the board has no such king
    /// (a state only reachable by direct construction, never by play).
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Check the one-king-per-side invariant the check logic depends on.
    pub fn validate(&self) -> Result<(), ChessError> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces()
                .filter(|(_, p)| p.color == color && p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidBoard(format!(
                    "{color} has {kings} kings, expected exactly 1"
                )));
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Path walk
    // -------------------------------------------------------------------

    /// Whether every square strictly between `from` and `to` is empty.
    ///
    /// Valid only for rook/bishop/queen geometry (straight or diagonal
    /// line); trivially true for adjacent endpoints.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.row as i8 - from.row as i8).signum();
        let dc = (to.col as i8 - from.col as i8).signum();
        let mut r = from.row as i8 + dr;
        let mut c = from.col as i8 + dc;
        while (r, c) != (to.row as i8, to.col as i8) {
            if self.squares[r as usize][c as usize].is_some() {
                return false;
            }
            r += dr;
            c += dc;
        }
        true
    }

    // -------------------------------------------------------------------
    // Pure move application
    // -------------------------------------------------------------------

    /// Relocate the piece on `from` to `to`, removing any occupant of `to`.
    ///
    /// Pure: returns a new board and leaves `self` untouched. Legality is
    /// the caller's responsibility — this is the mutation primitive the
    /// legality filter itself simulates with.
    pub fn apply_move(&self, from: Square, to: Square) -> Board {
        let mut next = *self;
        next.set(to, next.piece_at(from));
        next.set(from, None);
        next
    }

}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        for row in 0..8u8 {
            write!(f, "  {} ", 8 - row)?;
            for col in 0..8u8 {
                let cell = match self.squares[row as usize][col as usize] {
                    Some(p) => p.code(),
                    None => "..".to_string(),
                };
                write!(f, "{cell} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a  b  c  d  e  f  g  h")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn standard_placement() {
        let b = Board::standard();
        assert_eq!(
            b.piece_at(sq("a8")),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(
            b.piece_at(sq("e8")),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            b.piece_at(sq("d1")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            b.piece_at(sq("e2")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(b.piece_at(sq("e4")), None);
        assert_eq!(b.pieces().count(), 32);
    }

    #[test]
    fn standard_is_valid() {
        assert!(Board::standard().validate().is_ok());
    }

    #[test]
    fn empty_board_fails_validation() {
        assert!(Board::empty().validate().is_err());
    }

    #[test]
    fn two_kings_fail_validation() {
        let mut b = Board::standard();
        b.set(sq("e4"), Some(Piece::new(Color::White, PieceKind::King)));
        assert!(b.validate().is_err());
    }

    #[test]
    fn king_square_lookup() {
        let b = Board::standard();
        assert_eq!(b.king_square(Color::White), Some(sq("e1")));
        assert_eq!(b.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn set_and_clear() {
        let mut b = Board::empty();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        b.set(sq("c3"), Some(knight));
        assert_eq!(b.piece_at(sq("c3")), Some(knight));
        b.set(sq("c3"), None);
        assert_eq!(b.piece_at(sq("c3")), None);
    }

    #[test]
    fn path_clear_on_empty_line() {
        let mut b = Board::empty();
        b.set(sq("a1"), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert!(b.path_clear(sq("a1"), sq("a8")));
        assert!(b.path_clear(sq("a1"), sq("h1")));
    }

    #[test]
    fn path_blocked_by_intervening_piece() {
        let mut b = Board::empty();
        b.set(sq("a1"), Some(Piece::new(Color::White, PieceKind::Rook)));
        b.set(sq("a4"), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert!(!b.path_clear(sq("a1"), sq("a8")));
        // Up to the blocker itself the interval is open and empty.
        assert!(b.path_clear(sq("a1"), sq("a4")));
    }

    #[test]
    fn path_clear_diagonal() {
        let mut b = Board::empty();
        b.set(sq("c1"), Some(Piece::new(Color::White, PieceKind::Bishop)));
        assert!(b.path_clear(sq("c1"), sq("h6")));
        b.set(sq("e3"), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert!(!b.path_clear(sq("c1"), sq("h6")));
    }

    #[test]
    fn path_trivially_clear_for_adjacent() {
        let b = Board::standard();
        // Open interval between adjacent squares is empty.
        assert!(b.path_clear(sq("e1"), sq("e2")));
    }

    #[test]
    fn apply_move_is_pure() {
        let b = Board::standard();
        let after = b.apply_move(sq("e2"), sq("e4"));
        // Original untouched.
        assert!(b.piece_at(sq("e2")).is_some());
        assert_eq!(b.piece_at(sq("e4")), None);
        // New board has the relocation.
        assert_eq!(after.piece_at(sq("e2")), None);
        assert_eq!(
            after.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn apply_move_captures() {
        let mut b = Board::empty();
        b.set(sq("d4"), Some(Piece::new(Color::White, PieceKind::Queen)));
        b.set(sq("d7"), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        let after = b.apply_move(sq("d4"), sq("d7"));
        assert_eq!(
            after.piece_at(sq("d7")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(after.pieces().count(), 1);
    }
}
