//! Strictly Games - terminal front end for tic-tac-toe chess
//!
//! Reads text commands, forwards them to the
//! [`strictly_tictactoe_chess`] engine and prints each resulting snapshot.
//!
//! # Architecture
//!
//! - **Cli**: `clap` flags and modes (`play`, `replay <FILE>`)
//! - **Command**: one line of input parsed into a [`Command`]
//! - **Console**: the read, apply, print loop
//! - **Render**: board diagram and status text
//!
//! # Example
//!
//! ```
//! use strictly_games::Console;
//!
//! let mut console = Console::new(false);
//! let mut out = Vec::new();
//! console.run("select pawn\n1 1\n".as_bytes(), &mut out, false).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("Turn: black"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod command;
mod console;
mod render;

pub use cli::{Cli, Mode};
pub use command::{Command, CommandError, HELP};
pub use console::{Console, Flow, open_script};
pub use render::render;
