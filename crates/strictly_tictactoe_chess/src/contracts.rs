//! Contract-based validation for tic-tac-toe chess.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Action, ActionError};
use super::engine::GameState;
use super::invariants::{GameInvariants, InvariantSet};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ActionError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has won yet. Reset is always allowed.
pub struct GameNotOver;

impl GameNotOver {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, action: &Action) -> Result<(), ActionError> {
        match (state.winner(), action) {
            (_, Action::Reset) | (None, _) => Ok(()),
            (Some(winner), _) => Err(ActionError::GameOver(winner)),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: the turn passes exactly when the board changes without a win.
pub struct TurnDiscipline;

impl TurnDiscipline {
    /// Checks the postcondition.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let board_changed = before.board() != after.board();
        let expected = if board_changed && after.winner().is_none() {
            before.current_player().opponent()
        } else {
            before.current_player()
        };
        let valid = after.current_player() == expected;
        if !valid {
            warn!(
                before = %before.current_player(),
                after = %after.current_player(),
                board_changed,
                "Turn discipline violated"
            );
        }
        valid
    }
}

/// Postcondition: the movement phase never reverts.
pub struct PhaseMonotonic;

impl PhaseMonotonic {
    /// Checks the postcondition.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        use super::rules::Phase;
        !(before.phase() == Phase::Movement && after.phase() == Phase::Placement)
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every non-reset action.
///
/// Preconditions:
/// - The game is not over
///
/// Postconditions:
/// - Turn passes exactly on a non-winning board change
/// - Phase never reverts
/// - All state invariants hold
pub struct ActionContract;

impl Contract<GameState, Action> for ActionContract {
    fn pre(state: &GameState, action: &Action) -> Result<(), ActionError> {
        GameNotOver::check(state, action)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError> {
        if !TurnDiscipline::holds(before, after) {
            return Err(ActionError::InvariantViolation(
                "Postcondition failed: turn did not alternate".to_string(),
            ));
        }
        if !PhaseMonotonic::holds(before, after) {
            return Err(ActionError::InvariantViolation(
                "Postcondition failed: phase reverted to placement".to_string(),
            ));
        }
        GameInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ActionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
