//! Blind schedule: player count in, ladder of timed blind increases out.

use std::time::Duration;

use super::errors::{GameError, GameResult};

/// Blind amounts used by a standard home game, lowest first.
pub const DEFAULT_BLIND_AMOUNTS: [u64; 11] =
    [100, 200, 300, 400, 500, 600, 800, 1000, 2000, 4000, 8000];

/// Time budget shared out between the players at the table.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// A single blind increase, relative to the start of the session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlindIncrement {
    /// Offset from session start
    pub at: Duration,
    /// Blind amount from that point on
    pub amount: u64,
}

/// Policy table of blind amounts plus the base interval they are spread over.
///
/// The gap between two increases is `base_interval / player_count`, and the
/// n-th increase (counting from one) lands at `n * gap`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlindSchedule {
    base_interval: Duration,
    amounts: Vec<u64>,
}

impl Default for BlindSchedule {
    fn default() -> Self {
        Self {
            base_interval: DEFAULT_BASE_INTERVAL,
            amounts: DEFAULT_BLIND_AMOUNTS.to_vec(),
        }
    }
}

impl BlindSchedule {
    /// Create a schedule from a base interval and an amount table
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if the interval is zero, the table is empty,
    /// or the amounts are not strictly increasing.
    pub fn new(base_interval: Duration, amounts: Vec<u64>) -> GameResult<Self> {
        if base_interval.is_zero() {
            return Err(GameError::InvalidSchedule(
                "base interval must be greater than 0".to_string(),
            ));
        }

        if amounts.is_empty() {
            return Err(GameError::InvalidSchedule(
                "need at least one blind amount".to_string(),
            ));
        }

        if amounts.first() == Some(&0) || amounts.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(GameError::InvalidSchedule(
                "blind amounts must be positive and strictly increasing".to_string(),
            ));
        }

        let steps = u32::try_from(amounts.len())
            .map_err(|_| GameError::InvalidSchedule("too many blind levels".to_string()))?;
        if base_interval.checked_mul(steps).is_none() {
            return Err(GameError::InvalidSchedule(
                "base interval too long for the blind table".to_string(),
            ));
        }

        Ok(Self {
            base_interval,
            amounts,
        })
    }

    /// Default amount table with a custom base interval
    pub fn with_base_interval(base_interval: Duration) -> GameResult<Self> {
        Self::new(base_interval, DEFAULT_BLIND_AMOUNTS.to_vec())
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    pub fn amounts(&self) -> &[u64] {
        &self.amounts
    }

    /// Gap between two consecutive increases for `player_count` players
    pub fn interval(&self, player_count: u32) -> GameResult<Duration> {
        if player_count == 0 {
            return Err(GameError::InvalidPlayerCount(player_count));
        }

        let interval = self.base_interval / player_count;
        if interval.is_zero() {
            return Err(GameError::InvalidSchedule(format!(
                "base interval {:?} is too short for {player_count} players",
                self.base_interval
            )));
        }

        Ok(interval)
    }

    /// Full ladder of increases for `player_count` players
    ///
    /// Offsets and amounts are both strictly increasing. Calling this twice
    /// with the same count yields the same ladder.
    pub fn schedule(&self, player_count: u32) -> GameResult<Vec<BlindIncrement>> {
        let interval = self.interval(player_count)?;

        Ok(self
            .amounts
            .iter()
            .zip(1u32..)
            .map(|(&amount, step)| BlindIncrement {
                at: interval * step,
                amount,
            })
            .collect())
    }
}
