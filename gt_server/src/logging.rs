//! Structured logging configuration.
//!
//! The game library logs through the `log` facade; the subscriber installed
//! here picks those records up alongside the server's own `tracing` events.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,tower_http=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Game events, request logs and the library's `log` records all go to
/// stderr in compact form.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// gt_server::logging::init().expect("Failed to initialize logging");
/// tracing::info!("Server starting");
/// ```
pub fn init() -> Result<(), TryInitError> {
    let filter = env_filter();
    let filter_text = filter.to_string();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    tracing::debug!(filter = %filter_text, "Logging ready");
    Ok(())
}

/// Log a game lifecycle event with structured data
///
/// # Arguments
///
/// * `event_type` - Type of event (e.g. `game_started`)
/// * `player_count` - Players at the table, when known
/// * `winner` - Winner's name, when known
pub fn log_game_event(event_type: &str, player_count: Option<u32>, winner: Option<&str>) {
    tracing::info!(
        event_type = event_type,
        player_count = player_count,
        winner = winner,
        "GAME: {}",
        event_type
    );
}
