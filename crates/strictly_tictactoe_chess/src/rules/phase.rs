//! Placement and movement phases.

use crate::types::{ByPlayer, PieceType};
use serde::{Deserialize, Serialize};

/// Which half of the game is being played.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Pieces enter the board from the hands.
    #[default]
    Placement,
    /// Pieces move by their chess rules. Never reverts to placement.
    Movement,
}

/// True when both hands are empty at once, which ends the placement phase.
pub fn hands_exhausted(hands: ByPlayer<&[PieceType]>) -> bool {
    hands.white.is_empty() && hands.black.is_empty()
}
