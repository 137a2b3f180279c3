//! Builder for constructing states.

use crate::builder::error::BuildError;
use crate::builder::machine::{MachineBuilder, PendingId};
use crate::core::{default_alias, Action, Actions, Event, Node, StateId};

/// Builder for one state, created by [`MachineBuilder::state`] or
/// [`MachineBuilder::substate`].
pub struct StateBuilder<'a, E, P = ()> {
    machine: &'a mut MachineBuilder<E, P>,
    pending: PendingId,
    parent: StateId,
    name: String,
    alias: Option<String>,
    entry: Actions<E, P>,
    exit: Actions<E, P>,
    initial: bool,
}

impl<'a, E, P> StateBuilder<'a, E, P> {
    pub(crate) fn new(
        machine: &'a mut MachineBuilder<E, P>,
        pending: PendingId,
        parent: StateId,
        name: String,
    ) -> Self {
        Self {
            machine,
            pending,
            parent,
            name,
            alias: None,
            entry: Actions::new(),
            exit: Actions::new(),
            initial: false,
        }
    }

    /// Add an entry action. Repeated calls run in the order of registration.
    pub fn entry<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Event<P>, &mut E) + Send + Sync + 'static,
    {
        self.entry.push(Action::new(name, action));
        self
    }

    /// Add an exit action. Repeated calls run in the order of registration.
    pub fn exit<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Event<P>, &mut E) + Send + Sync + 'static,
    {
        self.exit.push(Action::new(name, action));
        self
    }

    /// Override the identifier-friendly alias (defaults to the name with
    /// spaces replaced by underscores).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the state as the initial sub-state of its parent.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Add the state to its parent and return its handle.
    pub fn build(self) -> Result<StateId, BuildError> {
        let machine = self.machine;
        machine.commit(self.pending);
        machine.check_state(self.parent)?;

        let parent = &machine.nodes[self.parent.0];
        if self.initial {
            if let Some(existing) = parent.initial {
                return Err(BuildError::DuplicateInitial {
                    state: self.name,
                    existing: machine.nodes[existing.0].name.clone(),
                });
            }
        }

        let id = StateId(machine.nodes.len());
        let alias = self.alias.unwrap_or_else(|| default_alias(&self.name));
        let mut node = Node::new(self.name, alias, Some(self.parent));
        node.entry = self.entry;
        node.exit = self.exit;
        machine.nodes.push(node);

        let parent = &mut machine.nodes[self.parent.0];
        parent.children.push(id);
        if self.initial {
            parent.initial = Some(id);
        }
        Ok(id)
    }
}
