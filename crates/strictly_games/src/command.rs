//! Text commands typed at the prompt or read from a script.

use strictly_tictactoe_chess::{Action, PieceType};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `select <type>`: pick a piece type from the hand.
    Select(PieceType),
    /// `<row> <col>` or `act <row> <col>`: click a square.
    Act {
        /// Row clicked.
        row: usize,
        /// Column clicked.
        col: usize,
    },
    /// `reset`: start over.
    Reset,
    /// `board`: print the current snapshot.
    Board,
    /// `help`: list commands.
    Help,
    /// `quit`: stop reading input.
    Quit,
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  select <rook|knight|bishop|pawn>  pick a piece from your hand
  <row> <col> | act <row> <col>     click a square (place, select or move)
  reset                             start a new game
  board                             show the board
  help                              show this text
  quit                              leave";

/// Why a line could not be read as a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[display("unknown command {:?} (try `help`)", _0)]
    Unknown(#[error(not(source))] String),
    /// A required argument is absent.
    #[display("`{}` expects {}", command, expected)]
    MissingArgument {
        /// The command word.
        command: &'static str,
        /// What should follow it.
        expected: &'static str,
    },
    /// The piece type name is not recognised.
    #[display("unknown piece type {:?}", _0)]
    PieceType(#[error(not(source))] String),
    /// A coordinate is not a non-negative integer.
    #[display("bad coordinate {:?}", _0)]
    Coordinate(#[error(not(source))] String),
    /// Extra words after a complete command.
    #[display("unexpected input {:?}", _0)]
    Trailing(#[error(not(source))] String),
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] naming what could not be read.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "select" => {
                let name = words.next().ok_or(CommandError::MissingArgument {
                    command: "select",
                    expected: "a piece type",
                })?;
                let piece_type = name
                    .parse::<PieceType>()
                    .map_err(|_| CommandError::PieceType(name.to_string()))?;
                Command::Select(piece_type)
            }
            "act" => {
                let row = words.next();
                let col = words.next();
                match (row, col) {
                    (Some(row), Some(col)) => coordinates(row, col)?,
                    _ => {
                        return Err(CommandError::MissingArgument {
                            command: "act",
                            expected: "a row and a column",
                        });
                    }
                }
            }
            "reset" => Command::Reset,
            "board" => Command::Board,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ if head.starts_with(|c: char| c.is_ascii_digit() || c == '-') => {
                let col = words.next().ok_or(CommandError::MissingArgument {
                    command: "square",
                    expected: "a row and a column",
                })?;
                coordinates(head, col)?
            }
            _ => return Err(CommandError::Unknown(head.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_string())),
            None => Ok(Some(command)),
        }
    }

    /// The engine action this command stands for, if any.
    pub fn action(&self) -> Option<Action> {
        match *self {
            Command::Select(piece_type) => Some(Action::select(piece_type)),
            Command::Act { row, col } => Some(Action::square(row, col)),
            Command::Reset => Some(Action::Reset),
            Command::Board | Command::Help | Command::Quit => None,
        }
    }
}

fn coordinates(row: &str, col: &str) -> Result<Command, CommandError> {
    let parse = |word: &str| {
        word.parse::<usize>()
            .map_err(|_| CommandError::Coordinate(word.to_string()))
    };
    Ok(Command::Act {
        row: parse(row)?,
        col: parse(col)?,
    })
}
