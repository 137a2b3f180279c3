//! Build errors for state machine construction.

use crate::core::EventId;
use thiserror::Error;

/// Structural violations detected while building or finalizing a machine.
///
/// Every variant names the offending state, transition or event. None of
/// them is recoverable: the construction code has to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("sub-states {state} and {existing} can not both be marked initial")]
    DuplicateInitial { state: String, existing: String },

    #[error("transition {from} -> {to} can not be internal")]
    IllegalInternal { from: String, to: String },

    #[error("transition {from} -> {to} can not be local")]
    IllegalLocal { from: String, to: String },

    #[error("state machine must have initial sub-state")]
    MissingTopInitial,

    #[error("state {state} must have initial sub-state")]
    MissingInitial { state: String },

    #[error("state {state} builder left unused. Forgotten call to build()?")]
    UnusedStateBuilder { state: String },

    #[error(
        "transition builder for event {event}, {from} --> {to} left unused. Forgotten call to build()?"
    )]
    UnusedTransitionBuilder {
        event: EventId,
        from: String,
        to: String,
    },

    #[error("transition {from} -> {to} for event {event} can not start or end at the top state")]
    TopStateEndpoint {
        event: EventId,
        from: String,
        to: String,
    },

    #[error("state handle #{index} does not belong to this machine")]
    UnknownState { index: usize },
}

/// All violations found by [`MachineBuilder::finalize`](crate::MachineBuilder::finalize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("state machine failed validation: {}", join_violations(.violations))]
pub struct FinalizeError {
    violations: Vec<BuildError>,
}

impl FinalizeError {
    pub(crate) fn new(violations: Vec<BuildError>) -> Self {
        Self { violations }
    }

    /// Violations in detection order.
    pub fn violations(&self) -> &[BuildError] {
        &self.violations
    }

    pub fn contains(&self, error: &BuildError) -> bool {
        self.violations.contains(error)
    }
}

fn join_violations(violations: &[BuildError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = BuildError::IllegalLocal {
            from: "foo".to_string(),
            to: "bar".to_string(),
        };
        assert_eq!(err.to_string(), "transition foo -> bar can not be local");

        let err = BuildError::UnusedTransitionBuilder {
            event: 0,
            from: "foo".to_string(),
            to: "bar".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transition builder for event 0, foo --> bar left unused. Forgotten call to build()?"
        );
    }

    #[test]
    fn finalize_error_lists_every_violation() {
        let err = FinalizeError::new(vec![
            BuildError::MissingTopInitial,
            BuildError::UnusedStateBuilder {
                state: "forgotten".to_string(),
            },
        ]);

        assert_eq!(err.violations().len(), 2);
        assert!(err.contains(&BuildError::MissingTopInitial));
        assert_eq!(
            err.to_string(),
            "state machine failed validation: state machine must have initial sub-state; \
             state forgotten builder left unused. Forgotten call to build()?"
        );
    }
}
