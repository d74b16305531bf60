//! Strictly Games - tic-tac-toe chess in the terminal.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use strictly_games::{Cli, Console, HELP, Mode, open_script};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut console = Console::new(cli.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.mode() {
        Mode::Play => {
            info!("Starting interactive game");
            writeln!(out, "Tic-tac-toe chess.\n{HELP}\n")?;
            console.run(io::stdin().lock(), &mut out, true)
        }
        Mode::Replay { file } => {
            info!(file = %file.display(), "Replaying script");
            console.run(open_script(&file)?, &mut out, false)
        }
    }
}
