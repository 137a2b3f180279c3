//! The finalized, immutable machine and its read-only traversal surface.

use super::event::{Event, EventId};
use super::options::MachineOptions;
use super::state::{path_from_root, HistoryMask, Node, StateId, ROOT};
use super::transition::{HistoryKind, Target, Transition, TransitionKind};
use serde::{Deserialize, Serialize};

/// Structure of a hierarchical state machine.
///
/// A `Machine` is produced by [`MachineBuilder::finalize`](crate::MachineBuilder::finalize)
/// and never changes afterwards. It holds no per-run data, so one machine
/// can back any number of [`Instance`](crate::Instance)s, on any threads.
pub struct Machine<E, P = ()> {
    pub(crate) nodes: Vec<Node<E, P>>,
    pub(crate) options: MachineOptions,
    pub(crate) history: HistoryMask,
}

impl<E, P> Machine<E, P> {
    /// The implicit top state containing every top-level state.
    pub fn root(&self) -> StateId {
        ROOT
    }

    pub fn options(&self) -> MachineOptions {
        self.options
    }

    /// History kinds used by any transition of this machine.
    pub fn history(&self) -> HistoryMask {
        self.history
    }

    /// Number of states, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Read-only view of a state, `None` if the handle belongs to another machine.
    pub fn state(&self, id: StateId) -> Option<StateRef<'_, E, P>> {
        (id.0 < self.nodes.len()).then_some(StateRef { machine: self, id })
    }

    /// All states in creation order, the root first.
    pub fn states(&self) -> impl Iterator<Item = StateRef<'_, E, P>> + '_ {
        (0..self.nodes.len()).map(move |index| StateRef {
            machine: self,
            id: StateId(index),
        })
    }

    /// First state (in creation order) carrying the given name.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.nodes
            .iter()
            .skip(1)
            .position(|node| node.name == name)
            .map(|index| StateId(index + 1))
    }

    /// Serializable description of the state tree below the root.
    pub fn outline(&self) -> Vec<StateOutline> {
        self.nodes[ROOT.0]
            .children
            .iter()
            .map(|&child| self.outline_of(child))
            .collect()
    }

    fn outline_of(&self, id: StateId) -> StateOutline {
        let node = self.node(id);
        let initial = node
            .parent
            .is_some_and(|parent| self.node(parent).initial == Some(id));
        StateOutline {
            name: node.name.clone(),
            alias: node.alias.clone(),
            initial,
            entry: node.entry.name().map(str::to_string),
            exit: node.exit.name().map(str::to_string),
            history: node.history,
            transitions: node
                .transitions
                .iter()
                .map(|t| TransitionOutline {
                    event: t.event,
                    target: match t.target {
                        Target::State(target) => Some(self.node(target).name.clone()),
                        Target::Terminal => None,
                    },
                    kind: t.kind,
                    history: t.history,
                    guard: t.guards.name().map(str::to_string),
                    action: t.actions.name().map(str::to_string),
                })
                .collect(),
            children: node
                .children
                .iter()
                .map(|&child| self.outline_of(child))
                .collect(),
        }
    }

    pub(crate) fn node(&self, id: StateId) -> &Node<E, P> {
        &self.nodes[id.0]
    }

    /// Display name of a transition target, `[*]` for termination.
    pub(crate) fn target_name(&self, target: Target) -> &str {
        match target {
            Target::State(id) => &self.node(id).name,
            Target::Terminal => "[*]",
        }
    }

    /// Find the transition handling `event`, searching from `leaf` outwards.
    ///
    /// Inner states shadow their ancestors; within one state the first
    /// declared matching transition wins.
    pub(crate) fn resolve(
        &self,
        leaf: StateId,
        event: &Event<P>,
        ext: &E,
    ) -> Option<(StateId, &Transition<E, P>)> {
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let node = self.node(id);
            if let Some(transition) = node.transitions.iter().find(|t| t.matches(event, ext)) {
                return Some((id, transition));
            }
            cursor = node.parent;
        }
        None
    }

    /// The state a transition exits up to (exclusive) and enters from (exclusive).
    ///
    /// For external transitions this is the deepest state strictly containing
    /// both source and target. Local transitions stop one level deeper, at
    /// whichever of the two contains the other.
    pub(crate) fn exit_boundary(
        &self,
        source: StateId,
        target: Target,
        kind: TransitionKind,
    ) -> StateId {
        let Target::State(target) = target else {
            return ROOT;
        };
        let source_path = path_from_root(&self.nodes, source);
        let target_path = path_from_root(&self.nodes, target);

        let mut depth = 0;
        let common = source_path[..source_path.len() - 1]
            .iter()
            .zip(&target_path[..target_path.len() - 1]);
        for (index, (a, b)) in common.enumerate() {
            if a != b {
                break;
            }
            depth = index;
        }

        if kind == TransitionKind::Local {
            let descendant_path = if source_path.len() > target_path.len() {
                &source_path
            } else {
                &target_path
            };
            if let Some(&deeper) = descendant_path.get(depth + 1) {
                return deeper;
            }
        }
        source_path[depth]
    }
}

/// Read-only view of one state of a finalized machine.
pub struct StateRef<'m, E, P = ()> {
    machine: &'m Machine<E, P>,
    id: StateId,
}

impl<E, P> Clone for StateRef<'_, E, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, P> Copy for StateRef<'_, E, P> {}

impl<'m, E, P> StateRef<'m, E, P> {
    fn node(&self) -> &'m Node<E, P> {
        self.machine.node(self.id)
    }

    fn view(&self, id: StateId) -> StateRef<'m, E, P> {
        StateRef {
            machine: self.machine,
            id,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &'m str {
        &self.node().name
    }

    /// Identifier-friendly name used by diagram renderers.
    pub fn alias(&self) -> &'m str {
        &self.node().alias
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn parent(&self) -> Option<StateRef<'m, E, P>> {
        self.node().parent.map(|parent| self.view(parent))
    }

    pub fn children(&self) -> impl Iterator<Item = StateRef<'m, E, P>> + 'm {
        let machine = self.machine;
        self.node()
            .children
            .iter()
            .map(move |&id| StateRef { machine, id })
    }

    /// The sub-state entered by default.
    pub fn initial(&self) -> Option<StateRef<'m, E, P>> {
        self.node().initial.map(|initial| self.view(initial))
    }

    pub fn entry_name(&self) -> Option<&'m str> {
        self.node().entry.name()
    }

    pub fn exit_name(&self) -> Option<&'m str> {
        self.node().exit.name()
    }

    /// History kinds requested by transitions targeting this state.
    pub fn history(&self) -> HistoryMask {
        self.node().history
    }

    /// Transitions declared on this state, in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = TransitionInfo<'m>> + 'm {
        self.node().transitions.iter().map(|t| TransitionInfo {
            event: t.event,
            target: t.target,
            kind: t.kind,
            history: t.history,
            guard: t.guards.name(),
            action: t.actions.name(),
        })
    }
}

impl<E, P> std::fmt::Debug for StateRef<'_, E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Metadata of a declared transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionInfo<'m> {
    pub event: EventId,
    pub target: Target,
    pub kind: TransitionKind,
    pub history: HistoryKind,
    /// Combined guard names, `None` for an unguarded transition
    pub guard: Option<&'m str>,
    /// Combined action names, `None` when the transition has no action
    pub action: Option<&'m str>,
}

/// Owned, serializable description of a state and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateOutline {
    pub name: String,
    pub alias: String,
    /// Whether this state is its parent's initial sub-state
    pub initial: bool,
    pub entry: Option<String>,
    pub exit: Option<String>,
    pub history: HistoryMask,
    pub transitions: Vec<TransitionOutline>,
    pub children: Vec<StateOutline>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutline {
    pub event: EventId,
    /// Target state name, `None` when the transition terminates the machine
    pub target: Option<String>,
    pub kind: TransitionKind,
    pub history: HistoryKind,
    pub guard: Option<String>,
    pub action: Option<String>,
}
