//! Builder for constructing state machines.

use crate::builder::error::{BuildError, FinalizeError};
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validate::StructureCheck;
use crate::core::{
    EventId, HistoryKind, HistoryMask, Machine, MachineOptions, Node, StateId, Target,
    TransitionKind, ROOT,
};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Handle of a builder that has been created but not yet committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingId(usize);

/// What an uncommitted builder was about to create.
#[derive(Clone, Debug)]
enum Pending {
    State {
        name: String,
    },
    Transition {
        event: EventId,
        from: String,
        to: String,
    },
}

impl Pending {
    fn into_error(self) -> BuildError {
        match self {
            Pending::State { name } => BuildError::UnusedStateBuilder { state: name },
            Pending::Transition { event, from, to } => {
                BuildError::UnusedTransitionBuilder { event, from, to }
            }
        }
    }
}

/// Builder for constructing a hierarchical state machine.
///
/// States and transitions are created through short-lived builders borrowed
/// from this one. Every builder must be committed with `build()`; a builder
/// dropped without it is reported by [`finalize`](Self::finalize).
///
/// # Example
///
/// ```rust
/// use statechart::{Event, MachineBuilder};
///
/// const EV_OPEN: i32 = 0;
/// const EV_CLOSE: i32 = 1;
///
/// let mut sm: MachineBuilder<Vec<String>> = MachineBuilder::new();
/// let closed = sm.state("Closed").initial().build().unwrap();
/// let open = sm
///     .state("Open")
///     .entry("log", |_: &Event, log: &mut Vec<String>| log.push("opened".into()))
///     .build()
///     .unwrap();
/// sm.add_transition(closed, EV_OPEN, open).unwrap();
/// sm.add_transition(open, EV_CLOSE, closed).unwrap();
///
/// let machine = sm.finalize().unwrap();
/// assert_eq!(machine.state(open).unwrap().name(), "Open");
/// ```
pub struct MachineBuilder<E, P = ()> {
    pub(crate) nodes: Vec<Node<E, P>>,
    pub(crate) options: MachineOptions,
    pending: Vec<Option<Pending>>,
}

impl<E, P> MachineBuilder<E, P> {
    /// Create a builder with default options (external transitions by default).
    pub fn new() -> Self {
        Self::with_options(MachineOptions::default())
    }

    pub fn with_options(options: MachineOptions) -> Self {
        Self {
            nodes: vec![Node::root()],
            options,
            pending: Vec::new(),
        }
    }

    /// Handle of the implicit top state; `substate(root, ..)` is `state(..)`.
    ///
    /// The top state can parent states but never be a transition endpoint.
    pub fn root(&self) -> StateId {
        ROOT
    }

    /// Start building a top-level state.
    pub fn state(&mut self, name: impl Into<String>) -> StateBuilder<'_, E, P> {
        self.substate(ROOT, name)
    }

    /// Start building a sub-state of `parent`.
    pub fn substate(&mut self, parent: StateId, name: impl Into<String>) -> StateBuilder<'_, E, P> {
        let name = name.into();
        let pending = self.register(Pending::State { name: name.clone() });
        StateBuilder::new(self, pending, parent, name)
    }

    /// Start building a transition from `source`, triggered by `event`.
    ///
    /// Pass [`Target::Terminal`] (or `None`) as target to terminate the machine.
    pub fn transition(
        &mut self,
        source: StateId,
        event: impl Into<EventId>,
        target: impl Into<Target>,
    ) -> TransitionBuilder<'_, E, P> {
        let event = event.into();
        let target = target.into();
        let pending = self.register(Pending::Transition {
            event,
            from: self.state_name(source),
            to: self.target_name(target),
        });
        TransitionBuilder::new(self, pending, source, event, target)
    }

    /// Shorthand for `transition(source, event, target).build()`.
    pub fn add_transition(
        &mut self,
        source: StateId,
        event: impl Into<EventId>,
        target: impl Into<Target>,
    ) -> Result<(), BuildError> {
        self.transition(source, event, target).build()
    }

    /// Validate the structure and freeze it into a [`Machine`].
    ///
    /// All violations are collected rather than stopping at the first:
    /// uncommitted builders, and entry points (the root and every
    /// non-internal transition target) that do not resolve to a leaf through
    /// initial sub-states.
    pub fn finalize(mut self) -> Result<Machine<E, P>, FinalizeError> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = self
            .pending
            .drain(..)
            .flatten()
            .map(|pending| Validation::fail(pending.into_error()))
            .collect();

        let mut structure = StructureCheck::new(&self.nodes);
        checks.push(structure.resolve_entry(ROOT));
        for node in &self.nodes {
            for transition in &node.transitions {
                let Target::State(target) = transition.target else {
                    continue;
                };
                if transition.kind == TransitionKind::Internal {
                    continue;
                }
                checks.push(structure.resolve_entry(target));
                if transition.history == HistoryKind::Shallow {
                    for &child in &self.nodes[target.0].children {
                        checks.push(structure.resolve_entry(child));
                    }
                }
            }
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(FinalizeError::new(errors.iter().cloned().collect()));
        }

        let history = self.aggregate_history();
        debug!(
            states = self.nodes.len() - 1,
            transitions = self.nodes.iter().map(|n| n.transitions.len()).sum::<usize>(),
            shallow_history = history.shallow,
            deep_history = history.deep,
            "state machine finalized"
        );

        Ok(Machine {
            nodes: self.nodes,
            options: self.options,
            history,
        })
    }

    /// Fold each transition's history kind into its target and the machine mask.
    fn aggregate_history(&mut self) -> HistoryMask {
        let requests: Vec<(StateId, HistoryKind)> = self
            .nodes
            .iter()
            .flat_map(|node| node.transitions.iter())
            .filter(|t| t.kind != TransitionKind::Internal && t.history != HistoryKind::None)
            .filter_map(|t| match t.target {
                Target::State(target) => Some((target, t.history)),
                Target::Terminal => None,
            })
            .collect();

        let mut machine_mask = HistoryMask::default();
        for (target, kind) in requests {
            self.nodes[target.0].history.insert(kind);
            machine_mask.insert(kind);
        }
        machine_mask
    }

    fn register(&mut self, pending: Pending) -> PendingId {
        self.pending.push(Some(pending));
        PendingId(self.pending.len() - 1)
    }

    /// Mark a builder as used. Each handle commits at most once.
    pub(crate) fn commit(&mut self, id: PendingId) {
        if let Some(slot) = self.pending.get_mut(id.0) {
            *slot = None;
        }
    }

    pub(crate) fn check_state(&self, id: StateId) -> Result<(), BuildError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(BuildError::UnknownState { index: id.0 })
        }
    }

    pub(crate) fn state_name(&self, id: StateId) -> String {
        if id == ROOT {
            return "[top]".to_string();
        }
        self.nodes
            .get(id.0)
            .map(|node| node.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }

    pub(crate) fn target_name(&self, target: Target) -> String {
        match target {
            Target::State(id) => self.state_name(id),
            Target::Terminal => "[*]".to_string(),
        }
    }
}

impl<E, P> Default for MachineBuilder<E, P> {
    fn default() -> Self {
        Self::new()
    }
}
