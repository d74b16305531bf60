//! Selection invariant: the cached selection agrees with the board.

use super::Invariant;
use crate::engine::{GameState, Selection};
use crate::movegen::legal_moves;

/// Invariant: a movement selection sits on one of the current player's
/// pieces and caches exactly its legal moves; a placement selection names
/// a type in hand; a finished game has no selection.
pub struct SelectionConsistentInvariant;

impl Invariant<GameState> for SelectionConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        if state.is_over() {
            return *state.selection() == Selection::None;
        }
        match state.selection() {
            Selection::None => true,
            Selection::Placement { piece_type } => {
                state.hand(state.current_player()).contains(piece_type)
            }
            Selection::Movement { from, valid_moves } => {
                match state.board().get(*from) {
                    Some(piece) if piece.owner() == state.current_player() => {
                        legal_moves(state.board(), *from, piece) == *valid_moves
                    }
                    _ => false,
                }
            }
        }
    }

    fn description() -> &'static str {
        "Selection matches the board and the current player's hand"
    }
}
