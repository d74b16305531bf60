//! Inventory invariant: every piece is either in hand or on the board.

use super::Invariant;
use crate::engine::GameState;
use crate::types::{PieceType, Player};
use strum::IntoEnumIterator;

/// Invariant: per player, hand and placed list partition the full set,
/// and the placed list matches that player's pieces on the board.
///
/// Captures move a type from the placed list back to the hand, so this
/// holds across captures as well.
pub struct InventoryBalancedInvariant;

impl Invariant<GameState> for InventoryBalancedInvariant {
    fn holds(state: &GameState) -> bool {
        Player::iter().all(|player| {
            let pieces = state.pieces(player);

            let mut owned: Vec<PieceType> = pieces
                .hand()
                .iter()
                .chain(pieces.placed().iter())
                .copied()
                .collect();
            owned.sort();

            let mut placed = pieces.placed().clone();
            placed.sort();
            let mut on_board = state.board().piece_types_of(player);
            on_board.sort();

            owned == PieceType::full_set() && placed == on_board
        })
    }

    fn description() -> &'static str {
        "Each player's hand and placed pieces form exactly one full set, matching the board"
    }
}
