//! Stateful game controller wrapping Board.
//!
//! `Game` owns the board, the side to move, and the move history; it is
//! the primary type the API layer interacts with. The rules engine itself
//! stays pure — `Game` is the single place a board is mutated, exactly
//! once per accepted move.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::board::Board;
use crate::engine::types::{ChessError, Color, GameStatus, Move, Piece, Square, TerminalState};
use crate::engine::{attacks, movegen, openings};

// =========================================================================
// MoveRecord
// =========================================================================

/// A recorded move in the game history.
#[derive(Clone, Debug)]
pub struct MoveRecord {
    /// The move that was played.
    pub mv: Move,
    /// The piece that moved.
    pub piece: Piece,
    /// The piece removed from the destination square, if any.
    pub captured: Option<Piece>,
    /// Coordinate notation with a check/mate suffix ("e2e4", "d8h4#").
    pub notation: String,
    /// Game status after the move.
    pub status_after: GameStatus,
}

// =========================================================================
// Game
// =========================================================================

/// A complete chess game with history, undo, and status tracking.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    move_history: Vec<MoveRecord>,
    status: GameStatus,

    // Metadata
    pub id: String,
    pub white_player: String,
    pub black_player: String,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Create a new game from the standard starting position.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            move_history: Vec::new(),
            status: GameStatus::Active,
            id: Uuid::new_v4().to_string(),
            white_player: "Player".into(),
            black_player: "Player".into(),
            created_at: Utc::now(),
        }
    }

    /// Create a game from a custom board.
    ///
    /// Rejects boards that break the one-king-per-side invariant the
    /// check logic depends on.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, ChessError> {
        board.validate()?;
        let mut game = Self {
            board,
            side_to_move,
            move_history: Vec::new(),
            status: GameStatus::Active,
            id: Uuid::new_v4().to_string(),
            white_player: "Player".into(),
            black_player: "Player".into(),
            created_at: Utc::now(),
        };
        game.status = game.compute_status();
        Ok(game)
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Completed move history.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// All legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(&self.board, self.side_to_move)
    }

    /// Legal moves from a specific square.
    pub fn legal_moves_from(&self, sq: Square) -> Vec<Move> {
        movegen::legal_moves_from(&self.board, sq, self.side_to_move)
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        attacks::is_in_check(&self.board, self.side_to_move)
    }

    /// Whether the game is over.
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Name of the opening the played moves follow, if known.
    pub fn opening(&self) -> Option<&'static str> {
        let played: Vec<Move> = self.move_history.iter().map(|r| r.mv).collect();
        openings::lookup(&played)
    }

    // -----------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------

    /// Play a move. Returns the recorded notation.
    ///
    /// Returns `ChessError::GameOver` if the game is finished, or
    /// `ChessError::InvalidMove` when the relocation is rejected by the
    /// legality filter.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<String, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status.to_string()));
        }

        let invalid = |reason: &str| ChessError::InvalidMove {
            from: from.to_algebraic(),
            to: to.to_algebraic(),
            reason: reason.into(),
        };

        let piece = self
            .board
            .piece_at(from)
            .ok_or_else(|| invalid("origin square is empty"))?;
        if piece.color != self.side_to_move {
            return Err(invalid("piece belongs to the opponent"));
        }
        if !movegen::legal_move(&self.board, from, to, self.side_to_move) {
            return Err(invalid("not a legal move"));
        }

        // Apply: the single board mutation per accepted move.
        let captured = self.board.piece_at(to);
        self.board = self.board.apply_move(from, to);
        self.side_to_move = !self.side_to_move;
        self.status = self.compute_status();

        let mv = Move::new(from, to);
        let notation = match self.status {
            GameStatus::Checkmate => format!("{mv}#"),
            GameStatus::Check => format!("{mv}+"),
            _ => mv.to_string(),
        };

        self.move_history.push(MoveRecord {
            mv,
            piece,
            captured,
            notation: notation.clone(),
            status_after: self.status,
        });

        Ok(notation)
    }

    // -----------------------------------------------------------------
    // Undo move
    // -----------------------------------------------------------------

    /// Undo the last move. Returns the move that was undone.
    ///
    /// Without castling, en passant, or promotion, reversing a move is
    /// putting the mover back and restoring whatever was captured.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        let record = self.move_history.pop().ok_or(ChessError::NothingToUndo)?;

        self.board.set(record.mv.from, Some(record.piece));
        self.board.set(record.mv.to, record.captured);
        self.side_to_move = !self.side_to_move;
        self.status = self.compute_status();

        Ok(record.mv)
    }

    // -----------------------------------------------------------------
    // Status detection
    // -----------------------------------------------------------------

    fn compute_status(&self) -> GameStatus {
        match movegen::classify_terminal(&self.board, self.side_to_move) {
            TerminalState::Checkmate => GameStatus::Checkmate,
            TerminalState::Stalemate => GameStatus::Stalemate,
            TerminalState::Ongoing => {
                if self.in_check() {
                    GameStatus::Check
                } else {
                    GameStatus::Active
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Board array (for API responses)
    // -----------------------------------------------------------------

    /// The 8×8 grid of piece codes, row 0 (rank 8) first, `None` for empty
    /// squares — the shape web front ends render directly.
    pub fn board_array(&self) -> [[Option<String>; 8]; 8] {
        let mut grid: [[Option<String>; 8]; 8] = Default::default();
        for (sq, piece) in self.board.pieces() {
            grid[sq.row as usize][sq.col as usize] = Some(piece.code());
        }
        grid
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
