//! # Game Tracker
//!
//! Runs the blind clock for a home poker game and keeps a league table of
//! winners.
//!
//! ## Architecture
//!
//! The crate is split into two parts:
//!
//! - [`game`]: the session scheduler. [`BlindSchedule`] maps a player count to
//!   a ladder of blind increases, a [`BlindAlerter`] delivers each increase to
//!   an [`AlertSink`] at the right moment, and [`GameSession`] ties both
//!   together behind the [`Game`] start/finish capability.
//! - [`store`]: the [`PlayerStore`] collaborator that records wins, backed by
//!   a JSON file ([`FileSystemPlayerStore`]) or memory ([`InMemoryPlayerStore`]).
//!
//! Front-ends (a terminal driver and an HTTP/WebSocket driver) live in their
//! own crates and only ever talk to [`Game`] and [`PlayerStore`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use game_tracker::{
//!     Game, GameSession, InMemoryPlayerStore, LogSink, TokioBlindAlerter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryPlayerStore::new());
//!     let session = GameSession::new(Arc::new(TokioBlindAlerter::current()), store);
//!
//!     session.start(5, Arc::new(LogSink))?;
//!     session.finish("Chris")?;
//!     Ok(())
//! }
//! ```

/// Blind schedule, alert delivery and the session state machine.
pub mod game;
pub use game::{
    AlertHandle, AlertSink, BlindAlerter, BlindIncrement, BlindSchedule, CancelGate, Game,
    GameError, GameResult, GameSession, GameStatus, LogSink, RecordingSink, ScheduledAlert,
    TokioBlindAlerter,
    alerter::blind_message,
    blinds::{DEFAULT_BASE_INTERVAL, DEFAULT_BLIND_AMOUNTS},
};

/// Persistent win records and the league table.
pub mod store;
pub use store::{
    FileSystemPlayerStore, InMemoryPlayerStore, League, Player, PlayerStore, StoreError,
    StoreResult,
};
