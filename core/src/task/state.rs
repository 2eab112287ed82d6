//! Task lifecycle and its legal transitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Only the construction preamble has been recorded.
    Created,
    /// At least one directive has been appended.
    Configuring,
    /// The simulator process is running.
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: TaskState, to: TaskState },
    #[error("task already {state:?}; reset it first")]
    FromTerminalState { state: TaskState },
}

pub struct StateTransition;

impl StateTransition {
    pub fn validate(from: TaskState, to: TaskState) -> Result<(), TransitionError> {
        if Self::is_terminal(from) && to != TaskState::Created {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = match (from, to) {
            (TaskState::Created, TaskState::Configuring) => true,
            (TaskState::Configuring, TaskState::Configuring) => true,

            // A task with only its preamble still runs on AIRES defaults.
            (TaskState::Created, TaskState::Running) => true,
            (TaskState::Configuring, TaskState::Running) => true,

            (TaskState::Running, TaskState::Completed) => true,
            (TaskState::Running, TaskState::Failed) => true,

            // reset()
            (TaskState::Completed | TaskState::Failed, TaskState::Created) => true,
            (TaskState::Created | TaskState::Configuring, TaskState::Created) => true,

            _ => false,
        };

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    pub fn is_terminal(state: TaskState) -> bool {
        matches!(state, TaskState::Completed | TaskState::Failed)
    }

    /// Whether directives may still be appended.
    pub fn accepts_directives(state: TaskState) -> bool {
        matches!(state, TaskState::Created | TaskState::Configuring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(StateTransition::validate(TaskState::Created, TaskState::Configuring).is_ok());
        assert!(StateTransition::validate(TaskState::Configuring, TaskState::Running).is_ok());
        assert!(StateTransition::validate(TaskState::Running, TaskState::Completed).is_ok());
        assert!(StateTransition::validate(TaskState::Running, TaskState::Failed).is_ok());
        assert!(StateTransition::validate(TaskState::Failed, TaskState::Created).is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(matches!(
            StateTransition::validate(TaskState::Completed, TaskState::Configuring),
            Err(TransitionError::FromTerminalState { .. })
        ));
        assert!(matches!(
            StateTransition::validate(TaskState::Running, TaskState::Configuring),
            Err(TransitionError::InvalidTransition { .. })
        ));
        assert!(StateTransition::validate(TaskState::Created, TaskState::Completed).is_err());
    }

    #[test]
    fn test_accepts_directives() {
        assert!(StateTransition::accepts_directives(TaskState::Created));
        assert!(StateTransition::accepts_directives(TaskState::Configuring));
        assert!(!StateTransition::accepts_directives(TaskState::Running));
        assert!(!StateTransition::accepts_directives(TaskState::Completed));
    }
}
