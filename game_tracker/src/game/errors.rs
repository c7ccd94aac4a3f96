//! Game error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by [`GameSession`](super::GameSession) and [`BlindSchedule`](super::BlindSchedule).
#[derive(Debug, Error)]
pub enum GameError {
    /// Player count below one
    #[error("invalid player count {0}: need at least 1 player")]
    InvalidPlayerCount(u32),

    /// Winner name empty after trimming
    #[error("winner name can't be empty")]
    InvalidWinner,

    /// Start called while a game is running
    #[error("game already in progress")]
    AlreadyRunning,

    /// Finish called with no game running
    #[error("no game in progress")]
    NotRunning,

    /// Blind table or base interval unusable
    #[error("invalid blind schedule: {0}")]
    InvalidSchedule(String),

    /// The win could not be persisted
    #[error("failed to record win: {0}")]
    Store(#[from] StoreError),
}

impl GameError {
    /// Get a client-safe error message
    ///
    /// Store errors carry file paths and OS error text, so they are reduced to a
    /// generic message. Everything else is safe to show to a player.
    pub fn client_message(&self) -> String {
        match self {
            GameError::Store(_) => "Failed to record win".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
