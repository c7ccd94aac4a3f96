//! Game tracker server.
//!
//! Serves the league table over HTTP and runs games from the browser over a
//! WebSocket, backed by a JSON league file.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Error;
use game_tracker::{
    FileSystemPlayerStore, GameSession, InMemoryPlayerStore, PlayerStore, TokioBlindAlerter,
};
use gt_server::{
    api,
    config::{ServerConfig, StoreConfig},
    logging,
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a game tracker server

USAGE:
  gt_server [OPTIONS]

OPTIONS:
  --bind                 IP:PORT  Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]
  --db-file              PATH     League file  [default: env GAME_DB_FILE or game.db.json]
  --base-interval-secs   SECS     Blind clock shared out between players  [default: env BLIND_BASE_INTERVAL_SECS or 600]

FLAGS:
  --in-memory                     Keep the league in memory only
  -h, --help                      Print help information

ENVIRONMENT:
  SERVER_BIND                     Server bind address (e.g., 0.0.0.0:8080)
  GAME_DB_FILE                    League file path
  BLIND_BASE_INTERVAL_SECS        Base blind interval in seconds
  RUST_LOG                        Log filter (e.g., info, gt_server=debug)
  (A .env file in the working directory is loaded first)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let in_memory = pargs.contains("--in-memory");
    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let db_file: Option<PathBuf> = pargs.opt_value_from_str("--db-file")?;
    let base_interval: Option<u64> = pargs.opt_value_from_str("--base-interval-secs")?;

    logging::init()?;

    let config = ServerConfig::from_env(bind, db_file, base_interval, in_memory)?;
    config.validate()?;

    let store: Arc<dyn PlayerStore> = match &config.store {
        StoreConfig::File(path) => {
            info!("Opening league file {}", path.display());
            let store = FileSystemPlayerStore::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open league file: {}", e))?;
            Arc::new(store)
        }
        StoreConfig::InMemory => {
            info!("Keeping the league in memory");
            Arc::new(InMemoryPlayerStore::new())
        }
    };

    let session = Arc::new(GameSession::with_schedule(
        config.blinds.schedule()?,
        Arc::new(TokioBlindAlerter::current()),
        store.clone(),
    ));

    let app = api::create_router(api::AppState { session, store });

    info!("Starting HTTP/WebSocket server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
