//! Line-oriented game driver.
//!
//! Reads one line for the player count and one `NAME wins` line, and never
//! reads further than that from its input.

use game_tracker::{AlertSink, Game, blind_message};
use log::{info, warn};
use std::{
    io::{self, BufRead, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::commands::{parse_player_count, parse_winner};

/// Printed before reading the player count.
pub const PLAYER_PROMPT: &str = "Please enter the number of players: ";

/// Printed when the player count line is not a number.
pub const BAD_PLAYER_INPUT_ERR_MSG: &str =
    "Bad value received for number of players, please try again with a number";

/// Printed when the winner line is not `NAME wins`.
pub const BAD_WINNER_INPUT_MSG: &str = "invalid winner input, expect format of 'PlayerName wins'";

/// Output shared between the driver and its alert sink.
pub type SharedOutput<W> = Arc<Mutex<W>>;

fn lock_output<W>(output: &SharedOutput<W>) -> MutexGuard<'_, W> {
    output.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Alert sink that prints `Blind is now N` lines to a writer.
pub struct WriterSink<W> {
    output: SharedOutput<W>,
}

impl<W> WriterSink<W> {
    pub fn new(output: SharedOutput<W>) -> Self {
        Self { output }
    }
}

impl<W: Write + Send> AlertSink for WriterSink<W> {
    fn alert(&self, amount: u64, _at: Duration) {
        let mut output = lock_output(&self.output);
        if let Err(e) = writeln!(output, "{}", blind_message(amount)).and_then(|()| output.flush())
        {
            warn!("Failed to print blind alert: {}", e);
        }
    }
}

/// Terminal driver for a single game.
pub struct Cli<R, W> {
    input: R,
    output: SharedOutput<W>,
    game: Arc<dyn Game>,
}

impl<R, W> Cli<R, W>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    pub fn new(input: R, output: W, game: Arc<dyn Game>) -> Self {
        Self {
            input,
            output: Arc::new(Mutex::new(output)),
            game,
        }
    }

    /// Handle to the output, shared with the alert sink
    pub fn output(&self) -> SharedOutput<W> {
        Arc::clone(&self.output)
    }

    /// Run one game: prompt, start, wait for the winner, finish
    ///
    /// Input problems and game errors are reported on the output; only I/O
    /// failures are returned.
    pub fn play_poker(&mut self) -> io::Result<()> {
        self.print(PLAYER_PROMPT)?;

        let Some(line) = self.read_line()? else {
            info!("Input closed before the player count");
            return Ok(());
        };

        let player_count = match parse_player_count(&line) {
            Ok(count) => count,
            Err(e) => {
                info!("{}", e);
                return self.println(BAD_PLAYER_INPUT_ERR_MSG);
            }
        };

        let sink = Arc::new(WriterSink::new(self.output()));
        if let Err(e) = self.game.start(player_count, sink) {
            return self.println(&e.to_string());
        }

        let Some(line) = self.read_line()? else {
            info!("Input closed before a winner was announced");
            return Ok(());
        };

        let winner = match parse_winner(&line) {
            Ok(winner) => winner,
            Err(e) => {
                info!("{}", e);
                return self.println(BAD_WINNER_INPUT_MSG);
            }
        };

        if let Err(e) = self.game.finish(winner) {
            return self.println(&e.to_string());
        }

        Ok(())
    }

    /// One line of input, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn print(&self, text: &str) -> io::Result<()> {
        let mut output = lock_output(&self.output);
        output.write_all(text.as_bytes())?;
        output.flush()
    }

    fn println(&self, text: &str) -> io::Result<()> {
        let mut output = lock_output(&self.output);
        writeln!(output, "{text}")?;
        output.flush()
    }
}
