//! HTTP and WebSocket driver for the game tracker.
//!
//! Serves the league table and player scores over HTTP, and lets a browser
//! run a game over a WebSocket: the first message is the player count, the
//! second the winner's name.

pub mod api;
pub mod config;
pub mod logging;
