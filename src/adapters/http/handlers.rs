//! HTTP handlers for the REST endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::PlayerId;
use crate::domain::game::{GameError, Player};

use super::dto::{CreateGameRequest, ErrorResponse, JoinGameRequest};
use super::AppState;

/// GET /health
pub async fn health() -> Response {
    Json(serde_json::json!({"status": "healthy"})).into_response()
}

/// POST /game/create - allocate a waiting game.
///
/// The response snapshot carries the caller's generated player id in
/// slot 0; the client keeps it for subsequent moves.
pub async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Response {
    let username = req.username.trim();
    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("username must not be empty")),
        )
            .into_response();
    }

    let player = Player::human(PlayerId::new(), username);
    let snapshot = state.hub.create_game(player).await;
    (StatusCode::CREATED, Json(snapshot)).into_response()
}

/// POST /game/join - fill slot 1 of a waiting game.
pub async fn join_game(
    State(state): State<AppState>,
    Json(req): Json<JoinGameRequest>,
) -> Response {
    let username = req.username.trim();
    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("username must not be empty")),
        )
            .into_response();
    }

    let player = Player::human(PlayerId::new(), username);
    match state.hub.join_game(req.game_id, player).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => game_error_response(&err),
    }
}

/// GET /leaderboard - standings, best first.
pub async fn leaderboard(State(state): State<AppState>) -> Response {
    match state.store.leaderboard().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "leaderboard query failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "persistence_unavailable",
                    "leaderboard is temporarily unavailable",
                )),
            )
                .into_response()
        }
    }
}

/// Maps a game error onto a status code plus structured body.
pub(super) fn game_error_response(err: &GameError) -> Response {
    let status = match err {
        GameError::NotFound(_) => StatusCode::NOT_FOUND,
        GameError::InvalidColumn(_) => StatusCode::BAD_REQUEST,
        GameError::NotYourTurn
        | GameError::ColumnFull(_)
        | GameError::InactiveGame
        | GameError::AlreadyStarted => StatusCode::CONFLICT,
    };
    (status, Json(ErrorResponse::from_game_error(err))).into_response()
}
