//! Line-driven game loop shared by interactive play and script replay.

use crate::command::{Command, HELP};
use crate::render::render;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use strictly_tictactoe_chess::{Game, GameState};
use tracing::{debug, info, instrument};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop.
    Quit,
}

/// Drives one game from text commands, writing snapshots and rejections.
#[derive(Debug, Default)]
pub struct Console {
    game: Game,
    json: bool,
}

impl Console {
    /// Creates a console over a new game.
    pub fn new(json: bool) -> Self {
        Self {
            game: Game::new(),
            json,
        }
    }

    /// The game being played.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Handles one line of input.
    ///
    /// Parse errors and rejected actions are reported to `out` and do not
    /// stop the loop.
    ///
    /// # Errors
    ///
    /// Fails only if writing to `out` or serializing the snapshot fails.
    #[instrument(skip(self, out))]
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(error) => {
                writeln!(out, "error: {error}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "Parsed command");

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Board => self.print_state(out)?,
            _ => {
                let Some(action) = command.action() else {
                    return Ok(Flow::Continue);
                };
                match self.game.apply(action) {
                    Ok(state) => {
                        if let Some(winner) = state.winner() {
                            info!(%winner, "Game won");
                        }
                        self.print_state(out)?;
                    }
                    Err(error) => writeln!(out, "rejected: {error}")?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// With `prompt` set, a prompt naming the player to move is written
    /// before each line.
    ///
    /// # Errors
    ///
    /// Fails if reading input or writing output fails.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "{}> ", self.state().current_player())?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("failed to read input")?;
            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn print_state(&self, out: &mut impl Write) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(self.state())
                .context("failed to serialize game state")?;
            writeln!(out, "{json}")?;
        } else {
            write!(out, "{}", render(self.state()))?;
        }
        Ok(())
    }
}

/// Opens a command script for [`Console::run`].
///
/// # Errors
///
/// Fails if the file cannot be opened.
pub fn open_script(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open script {}", path.display()))?;
    Ok(BufReader::new(file))
}
