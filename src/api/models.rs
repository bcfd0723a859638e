use serde::{Deserialize, Serialize};

use crate::engine::game::Game;
use crate::engine::types::{Color, GameStatus};

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub white_player: Option<String>,
    pub black_player: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesQuery {
    pub from: Option<String>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    /// 8×8 grid of piece codes ("wP", "bK"), rank 8 first, null for empty.
    pub board: Vec<Vec<Option<String>>>,
    pub status: String,
    pub current_player: String,
    pub move_history: Vec<MoveHistoryEntry>,
    pub captured_pieces: CapturedPieces,
    pub check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
    pub players: Players,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveHistoryEntry {
    pub from: String,
    pub to: String,
    pub piece: PieceInfo,
    pub captured: Option<PieceInfo>,
    pub notation: String,
    pub status_after: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PieceInfo {
    #[serde(rename = "type")]
    pub piece_type: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPieces {
    pub white: Vec<String>,
    pub black: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Players {
    pub white: String,
    pub black: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesResponse {
    pub games: Vec<GameResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveListResponse {
    pub moves: Vec<MoveHistoryEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMoveEntry {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesResponse {
    pub moves: Vec<LegalMoveEntry>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Build the full JSON view of a game.
pub fn game_to_response(game: &Game) -> GameResponse {
    let board = game
        .board_array()
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect();

    let move_history: Vec<MoveHistoryEntry> = game
        .move_history()
        .iter()
        .map(|record| MoveHistoryEntry {
            from: record.mv.from.to_algebraic(),
            to: record.mv.to.to_algebraic(),
            piece: piece_info(record.piece.color, record.piece.kind.to_string()),
            captured: record
                .captured
                .map(|p| piece_info(p.color, p.kind.to_string())),
            notation: record.notation.clone(),
            status_after: record.status_after.to_string(),
        })
        .collect();

    // Pieces captured *from* each side, in capture order.
    let mut captured = CapturedPieces {
        white: Vec::new(),
        black: Vec::new(),
    };
    for record in game.move_history() {
        if let Some(p) = record.captured {
            match p.color {
                Color::White => captured.white.push(p.code()),
                Color::Black => captured.black.push(p.code()),
            }
        }
    }

    GameResponse {
        id: game.id.clone(),
        board,
        status: game.status().to_string(),
        current_player: game.side_to_move().to_string(),
        move_history,
        captured_pieces: captured,
        check: game.status() == GameStatus::Check,
        opening: game.opening().map(str::to_string),
        players: Players {
            white: game.white_player.clone(),
            black: game.black_player.clone(),
        },
        created_at: game.created_at.to_rfc3339(),
    }
}

fn piece_info(color: Color, kind: String) -> PieceInfo {
    PieceInfo {
        piece_type: kind,
        color: color.to_string(),
    }
}
