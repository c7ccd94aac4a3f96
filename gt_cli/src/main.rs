//! Terminal driver for a home poker game.
//!
//! Asks for the number of players, prints blind increases as they happen,
//! and records the winner in the league file.

use anyhow::{Context, Result};
use ctrlc::set_handler;
use game_tracker::{BlindSchedule, FileSystemPlayerStore, GameSession, TokioBlindAlerter};
use log::{error, info};
use pico_args::Arguments;
use std::{io, path::PathBuf, sync::Arc, time::Duration};

use gt_cli::Cli;

const HELP: &str = "\
Run a poker game from the terminal

USAGE:
  gt_cli [OPTIONS]

OPTIONS:
  --db-file              PATH   League file  [default: env GAME_DB_FILE or game.db.json]
  --base-interval-secs   SECS   Blind clock shared out between players  [default: env BLIND_BASE_INTERVAL_SECS or 600]

FLAGS:
  -h, --help                    Print help information

ENVIRONMENT:
  GAME_DB_FILE                  League file path
  BLIND_BASE_INTERVAL_SECS      Base blind interval in seconds
  RUST_LOG                      Log filter (e.g., info, debug)
";

const DEFAULT_DB_FILE: &str = "game.db.json";
const DEFAULT_BASE_INTERVAL_SECS: u64 = 600;

struct Args {
    db_file: PathBuf,
    base_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        db_file: pargs
            .opt_value_from_str("--db-file")?
            .or_else(|| std::env::var("GAME_DB_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
        base_interval_secs: match pargs.opt_value_from_str("--base-interval-secs")? {
            Some(secs) => secs,
            None => env_base_interval_secs()?,
        },
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    println!("Let's play poker");
    println!("Type {{Name}} wins to record a win");

    let store = match FileSystemPlayerStore::open(&args.db_file) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Problem opening {}: {}", args.db_file.display(), e);
            eprintln!("problem opening {}: {}", args.db_file.display(), e);
            std::process::exit(1);
        }
    };
    info!("Using league file {}", args.db_file.display());

    let blinds = BlindSchedule::with_base_interval(Duration::from_secs(args.base_interval_secs))
        .context("Invalid --base-interval-secs")?;
    let game = Arc::new(GameSession::with_schedule(
        blinds,
        Arc::new(TokioBlindAlerter::current()),
        store,
    ));

    // Reading stdin blocks, so the driver runs off the async workers while
    // blind alerts keep firing on them.
    tokio::task::spawn_blocking(move || {
        let mut cli = Cli::new(io::stdin().lock(), io::stdout(), game);
        cli.play_poker()
    })
    .await
    .context("Terminal driver panicked")?
    .context("Terminal I/O failed")?;

    Ok(())
}

/// Base interval from the environment, erroring on a value that isn't a number
fn env_base_interval_secs() -> Result<u64> {
    match std::env::var("BLIND_BASE_INTERVAL_SECS") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid BLIND_BASE_INTERVAL_SECS '{value}'")),
        Err(_) => Ok(DEFAULT_BASE_INTERVAL_SECS),
    }
}
