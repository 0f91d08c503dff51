//! State machine trait for phase enums.
//!
//! Gives lifecycle enums (such as the export run phases) one way of declaring
//! legal transitions and moving between them with validation.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list the legal successors of each state and get a
/// validated `transition_to` for free.
///
/// ```ignore
/// let next = ExportPhase::LoadCache.transition_to(ExportPhase::Fetch)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
