//! Strictly Tic-Tac-Toe Chess - pure rules engine
//!
//! Two players each own a rook, knight, bishop and pawn. Pieces are first
//! placed on a 4x4 board, then move by chess rules; four of one player's
//! pieces in a row, column or diagonal wins. Captured pieces go back to
//! their owner's hand.
//!
//! # Architecture
//!
//! - **Board**: immutable 4x4 grid value
//! - **Movegen**: legal destinations per piece type
//! - **Rules**: win detection and phases
//! - **Engine**: [`GameState::apply`] pure transitions, [`Game`] holder
//! - **Contracts / Invariants**: postconditions checked in debug builds
//! - **Session**: many games behind per-game serialization
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe_chess::{Game, PieceType, Player};
//!
//! let mut game = Game::new();
//! game.select_piece_type(PieceType::Rook).unwrap();
//! let state = game.act(0, 0).unwrap();
//! assert_eq!(state.current_player(), Player::Black);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod engine;
mod movegen;
mod session;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Action, ActionError};
pub use board::{Board, BoardParseError};
pub use contracts::{ActionContract, Contract};
pub use engine::{Game, GameState, PlayerPieces, Selection};
pub use movegen::{is_capture, legal_moves, pawn_direction};
pub use rules::{Phase, check_winner};
pub use session::{SessionError, SessionId, SessionManager};
pub use types::{BOARD_SIZE, ByPlayer, Direction, Piece, PieceType, Player, Square};
