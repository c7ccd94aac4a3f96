//! HTTP/WebSocket API for the game tracker.
//!
//! # Modules
//!
//! - [`players`]: league table and player scores
//! - [`websocket`]: browser game driver and the page that hosts it
//! - [`request_id`]: request ID tagging for log correlation
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health           - Health check
//! GET  /league           - League table as JSON
//! GET  /players/{name}   - Player's win count (404 if none)
//! POST /players/{name}   - Record a win (202)
//! GET  /game             - Browser game page
//! GET  /ws               - WebSocket game driver
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gt_server::api::{create_router, AppState};
//! use game_tracker::{GameSession, InMemoryPlayerStore, TokioBlindAlerter};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryPlayerStore::new());
//! let session = Arc::new(GameSession::new(
//!     Arc::new(TokioBlindAlerter::current()),
//!     store.clone(),
//! ));
//!
//! let app = create_router(AppState { session, store });
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:6969").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively; the API has no authentication.

pub mod players;
pub mod request_id;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use game_tracker::{GameSession, PlayerStore};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket connections.
///
/// Both drivers of the process share one session, so the terminal and the
/// browser never run two games at once.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<GameSession>,
    pub store: Arc<dyn PlayerStore>,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/league", get(players::league))
        .route(
            "/players/{name}",
            get(players::get_player_score).post(players::record_win),
        )
        .route("/game", get(websocket::game_page))
        .route("/ws", get(websocket::websocket_handler))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
///
/// # Example
///
/// ```bash
/// curl http://localhost:6969/health
/// # {"status":"healthy","version":"0.1.0","game":{"status":"idle"},
/// #  "blinds":{"base_interval_secs":600,"levels":11},"players":3,"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let blinds = state.session.blinds();
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "game": state.session.status(),
        "blinds": {
            "base_interval_secs": blinds.base_interval().as_secs(),
            "levels": blinds.amounts().len(),
        },
        "players": state.store.league().len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
