pub mod attacks;
pub mod board;
pub mod game;
pub mod movegen;
pub mod openings;
pub mod rules;
pub mod types;

pub use attacks::{is_in_check, square_attacked};
pub use board::Board;
pub use game::Game;
pub use movegen::{
    classify_terminal, is_checkmate, is_stalemate, legal_move, legal_moves, legal_moves_from,
};
pub use rules::{MoveMode, shape_legal};
pub use types::*;
