//! Game session state machine.
//!
//! A session is either idle or running. `start` moves it to running and
//! kicks off the blind alerts; `finish` cancels the alerts, moves it back to
//! idle and records the winner. Both transitions run under one mutex, so a
//! terminal driver and a network driver can share a single session.

use log::{info, warn};
use serde::Serialize;
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{
    alerter::{AlertHandle, AlertSink, BlindAlerter},
    blinds::BlindSchedule,
    errors::{GameError, GameResult},
};
use crate::store::PlayerStore;

/// What a driver can do with a game.
pub trait Game: Send + Sync {
    /// Begin a game for `player_count` players, rendering blind alerts to `sink`
    fn start(&self, player_count: u32, sink: Arc<dyn AlertSink>) -> GameResult<()>;

    /// End the running game and record `winner`
    fn finish(&self, winner: &str) -> GameResult<()>;
}

/// Current phase of a session
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Idle,
    Running { player_count: u32 },
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Idle => write!(f, "idle"),
            GameStatus::Running { player_count } => {
                write!(f, "running with {player_count} players")
            }
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    status: GameStatus,
    alerts: Option<AlertHandle>,
}

/// The single game session of a process, reused across many games.
pub struct GameSession {
    blinds: BlindSchedule,
    alerter: Arc<dyn BlindAlerter>,
    store: Arc<dyn PlayerStore>,
    state: Mutex<SessionState>,
}

impl GameSession {
    /// Create an idle session with the default blind schedule
    pub fn new(alerter: Arc<dyn BlindAlerter>, store: Arc<dyn PlayerStore>) -> Self {
        Self::with_schedule(BlindSchedule::default(), alerter, store)
    }

    /// Create an idle session with a custom blind schedule
    pub fn with_schedule(
        blinds: BlindSchedule,
        alerter: Arc<dyn BlindAlerter>,
        store: Arc<dyn PlayerStore>,
    ) -> Self {
        Self {
            blinds,
            alerter,
            store,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.lock_state().status
    }

    pub fn blinds(&self) -> &BlindSchedule {
        &self.blinds
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Game for GameSession {
    fn start(&self, player_count: u32, sink: Arc<dyn AlertSink>) -> GameResult<()> {
        if player_count == 0 {
            return Err(GameError::InvalidPlayerCount(player_count));
        }

        let mut state = self.lock_state();
        if state.status.is_running() {
            return Err(GameError::AlreadyRunning);
        }

        let increments = self.blinds.schedule(player_count)?;
        state.alerts = Some(self.alerter.schedule(&increments, sink));
        state.status = GameStatus::Running { player_count };

        info!(
            "Game started with {} players, {} blind levels",
            player_count,
            increments.len()
        );
        Ok(())
    }

    fn finish(&self, winner: &str) -> GameResult<()> {
        let winner = winner.trim();
        if winner.is_empty() {
            return Err(GameError::InvalidWinner);
        }

        let mut state = self.lock_state();
        if !state.status.is_running() {
            return Err(GameError::NotRunning);
        }

        if let Some(mut alerts) = state.alerts.take() {
            alerts.cancel();
        }
        state.status = GameStatus::Idle;

        // Session is idle from here on, even if the store fails.
        self.store.record_win(winner).map_err(|e| {
            warn!("Game finished but win for {} was not recorded: {}", winner, e);
            GameError::Store(e)
        })?;

        info!("Game finished, {} wins", winner);
        Ok(())
    }
}
