//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Games - tic-tac-toe chess in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Play tic-tac-toe chess from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print each snapshot as JSON instead of a board diagram
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Available modes
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Play interactively, reading commands from stdin
    Play,

    /// Run a script of commands, one per line
    Replay {
        /// Path to the script
        file: PathBuf,
    },
}

impl Cli {
    /// The selected mode, `play` if none was given.
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Play)
    }
}
