//! JSON-file-backed player store.

use log::{debug, info};
use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use super::{
    PlayerStore,
    errors::{StoreError, StoreResult},
    models::{League, add_win, score_of, sort_league},
};

struct Database {
    file: File,
    league: League,
}

/// Player store persisted as a JSON array of `{"Name", "Wins"}` objects.
///
/// The whole league is kept in memory and the file is rewritten from the
/// start on every win.
pub struct FileSystemPlayerStore {
    path: PathBuf,
    database: Mutex<Database>,
}

impl FileSystemPlayerStore {
    /// Open (or create) the store at `path`
    ///
    /// An empty file is treated as an empty league.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be opened or read, `Parse` if it holds
    /// anything other than a league.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(io_err)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(io_err)?;

        let mut league: League = if contents.trim().is_empty() {
            League::new()
        } else {
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        };
        sort_league(&mut league);

        info!("Loaded {} players from {}", league.len(), path.display());

        Ok(Self {
            path,
            database: Mutex::new(Database { file, league }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Database> {
        self.database.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PlayerStore for FileSystemPlayerStore {
    fn record_win(&self, name: &str) -> StoreResult<()> {
        let mut database = self.lock();
        let mut league = database.league.clone();
        let wins = add_win(&mut league, name);
        let encoded = serde_json::to_vec(&league)?;

        // Overwrite before truncating, so a failed write never empties the file.
        let file = &mut database.file;
        file.seek(SeekFrom::Start(0)).map_err(|e| self.io_err(e))?;
        file.write_all(&encoded).map_err(|e| self.io_err(e))?;
        file.set_len(encoded.len() as u64).map_err(|e| self.io_err(e))?;
        file.flush().map_err(|e| self.io_err(e))?;

        database.league = league;
        debug!("Recorded win for {} ({} total)", name, wins);
        Ok(())
    }

    fn league(&self) -> League {
        self.lock().league.clone()
    }

    fn player_score(&self, name: &str) -> u64 {
        score_of(&self.lock().league, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Player;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.db.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    const LEAGUE_JSON: &str = r#"[
        {"Name": "Leo", "Wins": 32},
        {"Name": "John", "Wins": 40},
        {"Name": "Maria", "Wins": 12}
    ]"#;

    #[test]
    fn test_league_sorted_by_wins() {
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        assert_eq!(
            store.league(),
            vec![
                Player::new("John", 40),
                Player::new("Leo", 32),
                Player::new("Maria", 12),
            ]
        );
        // Reading twice gives the same answer.
        assert_eq!(store.league(), store.league());
    }

    #[test]
    fn test_player_score() {
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        assert_eq!(store.player_score("Leo"), 32);
        assert_eq!(store.player_score("Nobody"), 0);
    }

    #[test]
    fn test_record_win_for_existing_player() {
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        store.record_win("Maria").unwrap();

        assert_eq!(store.player_score("Maria"), 13);
    }

    #[test]
    fn test_record_win_for_new_player() {
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        store.record_win("Pepper").unwrap();

        assert_eq!(store.player_score("Pepper"), 1);
        assert_eq!(store.league().last(), Some(&Player::new("Pepper", 1)));
    }

    #[test]
    fn test_file_rewritten_wholesale() {
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        store.record_win("Leo").unwrap();
        drop(store);

        let on_disk: League = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            vec![
                Player::new("John", 40),
                Player::new("Leo", 33),
                Player::new("Maria", 12),
            ]
        );

        let reopened = FileSystemPlayerStore::open(&path).unwrap();
        assert_eq!(reopened.league(), on_disk);
    }

    #[test]
    fn test_shrinking_content_leaves_no_trailing_bytes() {
        // Pretty-printed input is longer than the compact rewrite.
        let (_dir, path) = store_with(LEAGUE_JSON);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        store.record_win("John").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with('[') && raw.ends_with(']'));
        assert!(serde_json::from_str::<League>(&raw).is_ok());
    }

    #[test]
    fn test_failed_write_keeps_league_and_file() {
        let (_dir, path) = store_with(r#"[{"Name":"Leo","Wins":32}]"#);
        let store = FileSystemPlayerStore::open(&path).unwrap();

        // A read-only handle makes every write fail.
        store.lock().file = File::open(&path).unwrap();

        let err = store.record_win("Leo").unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.player_score("Leo"), 32);
        assert_eq!(store.league(), vec![Player::new("Leo", 32)]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"Name":"Leo","Wins":32}]"#
        );
    }

    #[test]
    fn test_empty_file_is_empty_league() {
        let (_dir, path) = store_with("");
        let store = FileSystemPlayerStore::open(&path).unwrap();

        assert!(store.league().is_empty());

        store.record_win("Chris").unwrap();
        assert_eq!(store.league(), vec![Player::new("Chris", 1)]);
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.json");

        let store = FileSystemPlayerStore::open(&path).unwrap();

        assert!(path.exists());
        assert!(store.league().is_empty());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_garbage_file_is_a_parse_error() {
        let (_dir, path) = store_with("{not json");

        let err = FileSystemPlayerStore::open(&path).err().unwrap();

        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_unopenable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        // A directory can't be opened for writing.
        let err = FileSystemPlayerStore::open(dir.path()).err().unwrap();

        assert!(matches!(err, StoreError::Io { .. }));
    }
}
