//! First-class invariants for tic-tac-toe chess.
//!
//! Invariants are logical properties that must hold after every action.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

pub mod inventory_balanced;
pub mod phase_consistent;
pub mod selection_consistent;

pub use inventory_balanced::InventoryBalancedInvariant;
pub use phase_consistent::PhaseConsistentInvariant;
pub use selection_consistent::SelectionConsistentInvariant;

/// All game invariants as a composable set.
pub type GameInvariants = (
    InventoryBalancedInvariant,
    PhaseConsistentInvariant,
    SelectionConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameState;
    use crate::engine::test_support::{pieces, state_with};
    use crate::rules::Phase;
    use crate::types::{ByPlayer, PieceType, Player};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GameInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        // Hands empty in placement phase and nothing on the board to match.
        let state = state_with(
            Default::default(),
            Player::White,
            Phase::Placement,
            ByPlayer {
                white: pieces(&[], &[]),
                black: pieces(&[], &[]),
            },
        );
        let violations = GameInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (InventoryBalancedInvariant, PhaseConsistentInvariant);
        assert!(TwoInvariants::check_all(&GameState::new()).is_ok());

        let unbalanced = state_with(
            Default::default(),
            Player::White,
            Phase::Placement,
            ByPlayer {
                white: pieces(&[PieceType::Rook], &[]),
                black: pieces(&PieceType::full_set(), &[]),
            },
        );
        assert!(TwoInvariants::check_all(&unbalanced).is_err());
    }
}
