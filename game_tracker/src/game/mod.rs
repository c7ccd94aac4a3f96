//! Game session scheduler.
//!
//! This module provides:
//! - [`BlindSchedule`]: pure mapping from player count to blind increments
//! - [`TokioBlindAlerter`]: one timer task per increment, cancellable as a group
//! - [`GameSession`]: the idle/running state machine shared by every driver

pub mod alerter;
pub mod blinds;
pub mod errors;
pub mod session;

pub use alerter::{
    AlertHandle, AlertSink, BlindAlerter, CancelGate, LogSink, RecordingSink, ScheduledAlert,
    TokioBlindAlerter,
};
pub use blinds::{BlindIncrement, BlindSchedule};
pub use errors::{GameError, GameResult};
pub use session::{Game, GameSession, GameStatus};
