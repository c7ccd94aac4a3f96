//! League data models.

use serde::{Deserialize, Serialize};

/// A player and their win count.
///
/// Serialized as `{"Name": "...", "Wins": n}`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub wins: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u64) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Players ordered by wins, most first.
pub type League = Vec<Player>;

/// Order a league by wins descending; ties keep their current order.
pub fn sort_league(league: &mut League) {
    league.sort_by(|a, b| b.wins.cmp(&a.wins));
}

/// Add a win for `name` to `league`, appending the player if new.
///
/// Returns the player's new win count.
pub fn add_win(league: &mut League, name: &str) -> u64 {
    let wins = match league.iter_mut().find(|player| player.name == name) {
        Some(player) => {
            player.wins += 1;
            player.wins
        }
        None => {
            league.push(Player::new(name, 1));
            1
        }
    };
    sort_league(league);
    wins
}

/// Wins for `name` in `league`, 0 if absent.
pub fn score_of(league: &[Player], name: &str) -> u64 {
    league
        .iter()
        .find(|player| player.name == name)
        .map_or(0, |player| player.wins)
}
