//! Player store: win records and the league table.
//!
//! This module implements:
//! - [`PlayerStore`]: the collaborator the game session records wins through
//! - [`FileSystemPlayerStore`]: JSON file, rewritten wholesale on every win
//! - [`InMemoryPlayerStore`]: process-local store for tests and throwaway servers
//!
//! ## Example
//!
//! ```no_run
//! use game_tracker::store::{FileSystemPlayerStore, PlayerStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileSystemPlayerStore::open("game.db.json")?;
//!     store.record_win("Chris")?;
//!
//!     for player in store.league() {
//!         println!("{}: {}", player.name, player.wins);
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod file_system;
pub mod memory;
pub mod models;

pub use errors::{StoreError, StoreResult};
pub use file_system::FileSystemPlayerStore;
pub use memory::InMemoryPlayerStore;
pub use models::{League, Player};

/// Persistent record of who won how often.
pub trait PlayerStore: Send + Sync {
    /// Add one win for `name`, creating the player if needed
    fn record_win(&self, name: &str) -> StoreResult<()>;

    /// All players, most wins first
    fn league(&self) -> League;

    /// Wins for `name`, 0 if the player is unknown
    fn player_score(&self, name: &str) -> u64;
}
