//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::builder::machine::{MachineBuilder, PendingId};
use crate::core::{
    related, Action, Actions, Event, EventId, Guard, Guards, HistoryKind, StateId, Target,
    Transition, TransitionKind, ROOT,
};

/// Builder for a transition, created by [`MachineBuilder::transition`].
///
/// Guards form a conjunction and actions run in the order they were added.
pub struct TransitionBuilder<'a, E, P = ()> {
    machine: &'a mut MachineBuilder<E, P>,
    pending: PendingId,
    source: StateId,
    event: EventId,
    target: Target,
    guards: Guards<E, P>,
    actions: Actions<E, P>,
    internal: bool,
    local: Option<bool>,
    history: HistoryKind,
    error: Option<BuildError>,
}

impl<'a, E, P> TransitionBuilder<'a, E, P> {
    pub(crate) fn new(
        machine: &'a mut MachineBuilder<E, P>,
        pending: PendingId,
        source: StateId,
        event: EventId,
        target: Target,
    ) -> Self {
        Self {
            machine,
            pending,
            source,
            event,
            target,
            guards: Guards::new(),
            actions: Actions::new(),
            internal: false,
            local: None,
            history: HistoryKind::None,
            error: None,
        }
    }

    /// Add a guard; every guard must pass for the transition to fire.
    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event<P>, &E) -> bool + Send + Sync + 'static,
    {
        self.guards.push(Guard::new(name, predicate));
        self
    }

    /// Add a transition action, run after exits and before entries.
    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Event<P>, &mut E) + Send + Sync + 'static,
    {
        self.actions.push(Action::new(name, action));
        self
    }

    /// Make this an internal transition: no exit or entry, only the action.
    ///
    /// Only valid for self-transitions.
    pub fn internal(mut self) -> Self {
        if self.target != Target::State(self.source) {
            let error = BuildError::IllegalInternal {
                from: self.machine.state_name(self.source),
                to: self.machine.target_name(self.target),
            };
            self.error.get_or_insert(error);
        }
        self.internal = true;
        self
    }

    /// Override the machine's default locality.
    ///
    /// Only valid when source and target are in an ancestor relation.
    pub fn local(mut self, local: bool) -> Self {
        self.local = Some(local);
        self
    }

    /// Enter the target through its shallow or deep history.
    pub fn history(mut self, history: HistoryKind) -> Self {
        self.history = history;
        self
    }

    /// Attach the transition to its source state.
    pub fn build(self) -> Result<(), BuildError> {
        let machine = self.machine;
        machine.commit(self.pending);
        if let Some(error) = self.error {
            return Err(error);
        }
        machine.check_state(self.source)?;
        if let Target::State(target) = self.target {
            machine.check_state(target)?;
        }

        if self.source == ROOT || self.target == Target::State(ROOT) {
            return Err(BuildError::TopStateEndpoint {
                event: self.event,
                from: machine.state_name(self.source),
                to: machine.target_name(self.target),
            });
        }

        let nested = match self.target {
            Target::State(target) => related(&machine.nodes, self.source, target),
            Target::Terminal => false,
        };

        if self.local.is_some() && !nested {
            return Err(BuildError::IllegalLocal {
                from: machine.state_name(self.source),
                to: machine.target_name(self.target),
            });
        }

        let kind = if self.internal {
            TransitionKind::Internal
        } else if self.local.unwrap_or(machine.options.local_default && nested) {
            TransitionKind::Local
        } else {
            TransitionKind::External
        };

        machine.nodes[self.source.0].transitions.push(Transition {
            event: self.event,
            target: self.target,
            guards: self.guards,
            actions: self.actions,
            kind,
            history: self.history,
        });
        Ok(())
    }
}
