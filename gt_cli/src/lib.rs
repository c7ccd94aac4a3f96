//! Terminal front-end for the game tracker.
//!
//! This library provides input parsing and the line-oriented driver used by
//! the gt_cli binary.

pub mod cli;
pub mod commands;

pub use cli::{BAD_PLAYER_INPUT_ERR_MSG, BAD_WINNER_INPUT_MSG, Cli, PLAYER_PROMPT, WriterSink};
