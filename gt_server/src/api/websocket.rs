//! WebSocket game driver.
//!
//! A browser (see `/game`) runs one game per connection.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. First text message: the number of players. The shared session starts
//!    and blind alerts are pushed to this connection as they fire.
//! 3. Second text message: the winner's name. The session finishes and the
//!    win is recorded.
//! 4. The server closes the connection.
//!
//! # Server Messages
//!
//! Plain text frames:
//! - `Game started with N players`
//! - `Blind is now N`
//! - `Recorded win for NAME`
//! - `Error: ...` when a message was rejected; the client may send it again
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:6969/ws');
//! ws.onmessage = (event) => console.log(event.data);
//! ws.send("5");
//! // ... later
//! ws.send("Chris");
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{Html, Response},
};
use futures_util::{SinkExt, StreamExt};
use game_tracker::{AlertSink, Game, GameError, blind_message};
use log::{debug, error, info, warn};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

use super::AppState;
use crate::logging::log_game_event;

const GAME_PAGE: &str = include_str!("../../static/game.html");

/// How long a closing connection waits for queued messages to go out
const FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Sent when the first message is not a whole number
pub const BAD_PLAYER_COUNT_MSG: &str = "Error: player count must be a whole number";

/// Alert sink that queues blind messages for one connection.
///
/// The queue is drained by a single send task, so writes to the socket never
/// interleave even when several alerts fire at once.
struct ConnectionSink {
    outbox: mpsc::UnboundedSender<String>,
}

impl AlertSink for ConnectionSink {
    fn alert(&self, amount: u64, _at: Duration) {
        if self.outbox.send(blind_message(amount)).is_err() {
            debug!("Dropped blind alert for a closed connection");
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    AwaitingPlayerCount,
    AwaitingWinner,
    Finished,
}

/// Static page with a WebSocket game client.
pub async fn game_page() -> Html<&'static str> {
    Html(GAME_PAGE)
}

/// Upgrade to a WebSocket that drives one game.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    info!("WebSocket connected");

    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<String>();

    let mut send_task = tokio::spawn(async move {
        while let Some(text) = outbox_rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut phase = Phase::AwaitingPlayerCount;
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                phase = handle_text(phase, text.as_str(), &state, &outbox_tx);
                if phase == Phase::Finished {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("WebSocket closed by client");
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    if phase == Phase::AwaitingWinner {
        warn!("Connection left while its game is still running");
    }

    // A running game still holds a sink clone, so the queue may never close
    // on its own.
    drop(outbox_tx);
    if tokio::time::timeout(FLUSH_TIMEOUT, &mut send_task)
        .await
        .is_err()
    {
        send_task.abort();
    }

    info!("WebSocket disconnected");
}

/// Apply one client message and return the connection's next phase.
fn handle_text(
    phase: Phase,
    text: &str,
    state: &AppState,
    outbox: &mpsc::UnboundedSender<String>,
) -> Phase {
    let reply = |message: String| {
        if outbox.send(message).is_err() {
            debug!("Reply for a closed connection dropped");
        }
    };

    match phase {
        Phase::AwaitingPlayerCount => {
            let Ok(player_count) = text.trim().parse::<u32>() else {
                warn!("Bad player count from client: {:?}", text);
                reply(BAD_PLAYER_COUNT_MSG.to_string());
                return phase;
            };

            let sink = Arc::new(ConnectionSink {
                outbox: outbox.clone(),
            });
            match state.session.start(player_count, sink) {
                Ok(()) => {
                    log_game_event("game_started", Some(player_count), None);
                    reply(format!("Game started with {player_count} players"));
                    Phase::AwaitingWinner
                }
                Err(e) => {
                    reply(error_message(&e));
                    phase
                }
            }
        }
        Phase::AwaitingWinner => match state.session.finish(text) {
            Ok(()) => {
                let winner = text.trim();
                log_game_event("game_finished", None, Some(winner));
                reply(format!("Recorded win for {winner}"));
                Phase::Finished
            }
            Err(e @ GameError::InvalidWinner) => {
                reply(error_message(&e));
                phase
            }
            // The session is idle now either way; this connection is done.
            Err(e) => {
                reply(error_message(&e));
                Phase::Finished
            }
        },
        Phase::Finished => phase,
    }
}

fn error_message(e: &GameError) -> String {
    format!("Error: {}", e.client_message())
}
