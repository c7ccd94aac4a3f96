//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use game_tracker::BlindSchedule;
use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

const DEFAULT_BIND: &str = "127.0.0.1:6969";
const DEFAULT_DB_FILE: &str = "game.db.json";
const DEFAULT_BASE_INTERVAL_SECS: u64 = 600;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Where the league lives
    pub store: StoreConfig,
    /// Blind clock configuration
    pub blinds: BlindConfig,
}

/// League storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// JSON file, created if missing
    File(PathBuf),
    /// Lost on restart
    InMemory,
}

/// Blind clock configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindConfig {
    /// Time shared out between the players, in seconds
    pub base_interval_secs: u64,
}

impl BlindConfig {
    /// Build the blind schedule for this configuration
    pub fn schedule(&self) -> Result<BlindSchedule, ConfigError> {
        BlindSchedule::with_base_interval(Duration::from_secs(self.base_interval_secs)).map_err(
            |e| ConfigError::Invalid {
                var: "BLIND_BASE_INTERVAL_SECS".to_string(),
                reason: e.to_string(),
            },
        )
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `db_file_override` - Optional league file override (from CLI args)
    /// * `base_interval_override` - Optional base interval override in seconds (from CLI args)
    /// * `in_memory` - Keep the league in memory instead of a file
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        db_file_override: Option<PathBuf>,
        base_interval_override: Option<u64>,
        in_memory: bool,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env("SERVER_BIND")?.unwrap_or_else(|| {
                DEFAULT_BIND
                    .parse()
                    .expect("Default bind address is valid")
            }),
        };

        let store = if in_memory {
            StoreConfig::InMemory
        } else {
            StoreConfig::File(
                db_file_override
                    .or_else(|| std::env::var("GAME_DB_FILE").ok().map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            )
        };

        let base_interval_secs = match base_interval_override {
            Some(secs) => secs,
            None => parse_env("BLIND_BASE_INTERVAL_SECS")?.unwrap_or(DEFAULT_BASE_INTERVAL_SECS),
        };

        Ok(ServerConfig {
            bind,
            store,
            blinds: BlindConfig { base_interval_secs },
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let StoreConfig::File(path) = &self.store
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid {
                var: "GAME_DB_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.blinds.base_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "BLIND_BASE_INTERVAL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.blinds.schedule().map(|_| ())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an environment variable if it is set
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{value}': {e}"),
        }),
        Err(_) => Ok(None),
    }
}
