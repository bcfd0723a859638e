use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::engine::game::Game;
use crate::engine::types::Square;

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: "trachess".to_string(),
        uptime,
    })
}

// =========================================================================
// Create Game
// =========================================================================

/// POST /api/games
pub async fn create_game(
    State(state): State<SharedState>,
    Json(input): Json<CreateGameRequest>,
) -> (StatusCode, Json<GameResponse>) {
    let mut game = Game::new();
    game.white_player = input.white_player.unwrap_or_else(|| "White".into());
    game.black_player = input.black_player.unwrap_or_else(|| "Black".into());

    let response = game_to_response(&game);
    let id = game.id.clone();

    tracing::info!(game_id = %id, "game created");
    state.games.write().await.insert(id, game);

    (StatusCode::CREATED, Json(response))
}

// =========================================================================
// List Games
// =========================================================================

/// GET /api/games
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<ListGamesQuery>,
) -> Json<ListGamesResponse> {
    let games = state.games.read().await;

    let limit = query.limit.unwrap_or(10).min(100);
    let offset = query.offset.unwrap_or(0);

    let mut filtered: Vec<&Game> = games.values().collect();

    // Filter by status if provided.
    if let Some(ref status_filter) = query.status {
        let sf = status_filter.to_lowercase();
        filtered.retain(|g| g.status().as_str() == sf);
    }

    let total = filtered.len();

    // Sort by created_at descending for consistent ordering.
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page: Vec<GameResponse> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(game_to_response)
        .collect();

    Json(ListGamesResponse {
        games: page,
        total,
        limit,
        offset,
    })
}

// =========================================================================
// Get Game
// =========================================================================

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Delete Game
// =========================================================================

/// DELETE /api/games/:id
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut games = state.games.write().await;
    games
        .remove(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Game deleted".to_string(),
    }))
}

// =========================================================================
// Make Move
// =========================================================================

/// POST /api/games/:id/moves
pub async fn make_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let from = parse_square(&input.from)?;
    let to = parse_square(&input.to)?;

    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let notation = game.make_move(from, to).map_err(ApiError::from)?;
    tracing::debug!(game_id = %id, %notation, status = %game.status(), "move played");

    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Get Move History
// =========================================================================

/// GET /api/games/:id/moves
pub async fn get_moves(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MoveListResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let response = game_to_response(game);
    Ok(Json(MoveListResponse {
        moves: response.move_history,
    }))
}

// =========================================================================
// Undo Move
// =========================================================================

/// POST /api/games/:id/undo
pub async fn undo_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let undone = game.undo_move().map_err(ApiError::from)?;
    tracing::debug!(game_id = %id, mv = %undone, "move undone");

    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Legal Moves
// =========================================================================

/// GET /api/games/:id/legal-moves
///
/// With `?from=e2`, only moves originating on that square.
pub async fn legal_moves(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<LegalMovesQuery>,
) -> Result<Json<LegalMovesResponse>, ApiError> {
    let from = query.from.as_deref().map(parse_square).transpose()?;

    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let moves = match from {
        Some(sq) => game.legal_moves_from(sq),
        None => game.legal_moves(),
    };

    Ok(Json(LegalMovesResponse {
        moves: moves
            .into_iter()
            .map(|mv| LegalMoveEntry {
                from: mv.from.to_algebraic(),
                to: mv.to.to_algebraic(),
            })
            .collect(),
    }))
}

// =========================================================================
// Helpers
// =========================================================================

fn parse_square(s: &str) -> Result<Square, ApiError> {
    Square::from_algebraic(s)
        .ok_or_else(|| ApiError::InvalidRequest(format!("invalid square notation: {s}")))
}
