//! In-memory player store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    PlayerStore,
    errors::StoreResult,
    models::{League, Player, add_win, score_of, sort_league},
};

/// Player store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    league: Mutex<League>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing players
    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut league: League = players.into_iter().collect();
        sort_league(&mut league);
        Self {
            league: Mutex::new(league),
        }
    }

    fn lock(&self) -> MutexGuard<'_, League> {
        self.league.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn record_win(&self, name: &str) -> StoreResult<()> {
        add_win(&mut self.lock(), name);
        Ok(())
    }

    fn league(&self) -> League {
        self.lock().clone()
    }

    fn player_score(&self, name: &str) -> u64 {
        score_of(&self.lock(), name)
    }
}
