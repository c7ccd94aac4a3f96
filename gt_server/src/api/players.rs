//! League and player score handlers.
//!
//! # Examples
//!
//! Look up a score:
//! ```bash
//! curl http://localhost:6969/players/Chris
//! ```
//!
//! Record a win:
//! ```bash
//! curl -X POST http://localhost:6969/players/Chris
//! ```

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use game_tracker::League;
use log::error;
use serde::Serialize;

use super::{AppState, request_id::RequestId};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// League table, most wins first.
///
/// # Response
///
/// Returns `200 OK` with `content-type: application/json`:
/// ```json
/// [{"Name": "John", "Wins": 40}, {"Name": "Leo", "Wins": 32}]
/// ```
pub async fn league(State(state): State<AppState>) -> Json<League> {
    Json(state.store.league())
}

/// Win count for one player.
///
/// Returns `200 OK` with the count as a plain-text body, or `404 Not Found`
/// for a player with no wins.
pub async fn get_player_score(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.store.player_score(&name) {
        0 => StatusCode::NOT_FOUND.into_response(),
        score => (StatusCode::OK, score.to_string()).into_response(),
    }
}

/// Record one win for a player.
///
/// # Errors
///
/// - `500 Internal Server Error`: the league could not be saved
pub async fn record_win(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.record_win(&name).map_err(|e| {
        error!("[{}] Failed to record win for {}: {}", request_id.0, name, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to record win".to_string(),
            }),
        )
    })?;

    Ok(StatusCode::ACCEPTED)
}
