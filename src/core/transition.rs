//! Transition declarations.

use super::action::Actions;
use super::event::{Event, EventId};
use super::guard::Guards;
use super::state::StateId;
use serde::{Deserialize, Serialize};

/// How a transition treats the states between its source and target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Exit up to the lowest common ancestor, then enter down to the target
    #[default]
    External,

    /// Like external, but the containing state of a source/target pair in an
    /// ancestor relation is neither exited nor re-entered
    Local,

    /// React without leaving the state: only the action runs
    Internal,
}

/// Which history of the target state a transition resumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryKind {
    /// Enter the target through its initial sub-states
    #[default]
    None,

    /// Resume the target's last active direct sub-state
    Shallow,

    /// Resume the target's last active leaf, at any depth
    Deep,
}

/// Where a transition leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    State(StateId),
    /// The machine terminates; the instance ignores every later event
    Terminal,
}

impl From<StateId> for Target {
    fn from(state: StateId) -> Self {
        Target::State(state)
    }
}

/// `None` stands for termination.
impl From<Option<StateId>> for Target {
    fn from(state: Option<StateId>) -> Self {
        state.map_or(Target::Terminal, Target::State)
    }
}

pub(crate) struct Transition<E, P> {
    pub(crate) event: EventId,
    pub(crate) target: Target,
    pub(crate) guards: Guards<E, P>,
    pub(crate) actions: Actions<E, P>,
    pub(crate) kind: TransitionKind,
    pub(crate) history: HistoryKind,
}

impl<E, P> Transition<E, P> {
    /// Check if this transition fires for the event in the given extended state.
    pub(crate) fn matches(&self, event: &Event<P>, ext: &E) -> bool {
        self.event == event.id && self.guards.check(event, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::Guard;

    fn transition(event: EventId) -> Transition<bool, ()> {
        Transition {
            event,
            target: Target::Terminal,
            guards: Guards::new(),
            actions: Actions::new(),
            kind: TransitionKind::External,
            history: HistoryKind::None,
        }
    }

    #[test]
    fn matches_on_event_id() {
        let t = transition(2);
        assert!(t.matches(&Event::new(2), &false));
        assert!(!t.matches(&Event::new(3), &false));
    }

    #[test]
    fn matches_respects_guard() {
        let mut t = transition(2);
        t.guards
            .push(Guard::new("enabled", |_: &Event, enabled: &bool| *enabled));

        assert!(t.matches(&Event::new(2), &true));
        assert!(!t.matches(&Event::new(2), &false));
    }

    #[test]
    fn none_target_means_terminal() {
        assert_eq!(Target::from(None), Target::Terminal);
        assert_eq!(Target::from(Some(StateId(4))), Target::State(StateId(4)));
    }

    #[test]
    fn defaults_are_external_without_history() {
        assert_eq!(TransitionKind::default(), TransitionKind::External);
        assert_eq!(HistoryKind::default(), HistoryKind::None);
    }
}
