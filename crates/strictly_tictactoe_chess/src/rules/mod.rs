//! Game rules for tic-tac-toe chess.
//!
//! This module contains pure functions for evaluating game state
//! according to the rules. Rules are separated from board storage so
//! the engine and the invariant checks can share them.

pub mod phase;
pub mod win;

pub use phase::{Phase, hands_exhausted};
pub use win::{LINES, check_winner};
