//! Phase invariant: placement ends as soon as both hands are empty.

use super::Invariant;
use crate::engine::GameState;
use crate::rules::{Phase, hands_exhausted};
use crate::types::{ByPlayer, Player};

/// Invariant: the game is never in the placement phase with both hands empty.
pub struct PhaseConsistentInvariant;

impl Invariant<GameState> for PhaseConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let hands = ByPlayer {
            white: state.hand(Player::White),
            black: state.hand(Player::Black),
        };
        state.phase() != Phase::Placement || !hands_exhausted(hands)
    }

    fn description() -> &'static str {
        "Placement phase ends once both hands are empty"
    }
}
