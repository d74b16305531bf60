//! First-class action types for tic-tac-toe chess.
//!
//! Actions are domain events, not side effects. They represent what the
//! player clicked and are validated by the engine before anything changes.

use super::rules::Phase;
use super::types::{PieceType, Player, Square};
use serde::{Deserialize, Serialize};

/// An input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Choose a piece type from the hand to place next.
    SelectPiece {
        /// The chosen type.
        piece_type: PieceType,
    },
    /// Click a board square: select, deselect, move or place.
    Square {
        /// Row clicked.
        row: usize,
        /// Column clicked.
        col: usize,
    },
    /// Start over.
    Reset,
}

impl Action {
    /// Shorthand for [`Action::SelectPiece`].
    pub fn select(piece_type: PieceType) -> Self {
        Action::SelectPiece { piece_type }
    }

    /// Shorthand for [`Action::Square`].
    pub fn square(row: usize, col: usize) -> Self {
        Action::Square { row, col }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::SelectPiece { piece_type } => write!(f, "select {piece_type}"),
            Action::Square { row, col } => write!(f, "square ({row}, {col})"),
            Action::Reset => write!(f, "reset"),
        }
    }
}

/// Why an action was rejected.
///
/// A rejected action never changes the game, except that a stale movement
/// selection is dropped (see [`ActionError::clears_selection`]).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The game already has a winner.
    #[display("Game is already over: {} won", _0)]
    GameOver(Player),

    /// The clicked coordinates are off the board.
    #[display("({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Row clicked.
        row: usize,
        /// Column clicked.
        col: usize,
    },

    /// The current player has nothing left to place.
    #[display("{} has no pieces in hand", _0)]
    EmptyHand(Player),

    /// The chosen type is not in the current player's hand.
    #[display("No {} in hand", _0)]
    PieceNotInHand(PieceType),

    /// Board pieces cannot be selected before the movement phase.
    #[display("Not allowed during the {} phase", _0)]
    WrongPhase(Phase),

    /// An empty square was clicked with nothing selected.
    #[display("Select a piece first")]
    NothingSelected,

    /// The square holds an opposing piece and no move targets it.
    #[display("Square {} does not hold your piece", _0)]
    NotOwnPiece(Square),

    /// The selected piece cannot move there.
    #[display("Selected piece cannot move to {}", _0)]
    IllegalDestination(Square),

    /// Pieces can only be placed on empty squares.
    #[display("Square {} is already occupied", _0)]
    OccupiedDestination(Square),

    /// A postcondition failed after applying the action.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ActionError {}

impl ActionError {
    /// True for rejections of a square click that should also drop a
    /// pending movement selection.
    pub fn clears_selection(&self) -> bool {
        matches!(
            self,
            ActionError::NothingSelected
                | ActionError::WrongPhase(_)
                | ActionError::NotOwnPiece(_)
                | ActionError::IllegalDestination(_)
                | ActionError::OccupiedDestination(_)
                | ActionError::EmptyHand(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_with_tag() {
        let json = serde_json::to_string(&Action::select(PieceType::Knight)).unwrap();
        assert_eq!(json, r#"{"action":"select_piece","piece_type":"knight"}"#);

        let parsed: Action =
            serde_json::from_str(r#"{"action":"square","row":1,"col":2}"#).unwrap();
        assert_eq!(parsed, Action::square(1, 2));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ActionError::GameOver(Player::White).to_string(),
            "Game is already over: white won"
        );
        let square = Square::new(2, 3).unwrap();
        assert_eq!(
            ActionError::OccupiedDestination(square).to_string(),
            "Square (2, 3) is already occupied"
        );
    }

    #[test]
    fn test_clears_selection() {
        assert!(ActionError::NothingSelected.clears_selection());
        assert!(!ActionError::GameOver(Player::Black).clears_selection());
        assert!(!ActionError::OutOfBounds { row: 9, col: 0 }.clears_selection());
    }
}
