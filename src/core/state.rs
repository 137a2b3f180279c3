//! States of a hierarchical machine and the tree they form.
//!
//! States live in an arena owned by the machine and are addressed by
//! [`StateId`] handles. Each node knows its parent, its ordered children, the
//! child entered by default (`initial`) and the transitions it declares.

use super::action::Actions;
use super::transition::{HistoryKind, Transition};
use serde::{Deserialize, Serialize};

/// Stable handle of a state inside one machine.
///
/// Handles are only meaningful for the machine (or builder) that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Index of the state in its machine's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The implicit top state every machine is rooted at.
pub(crate) const ROOT: StateId = StateId(0);

/// Set of history kinds requested by transitions into a state.
///
/// Aggregated per state and per machine when the machine is finalized; an
/// instance only allocates history tables for the kinds the machine uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMask {
    pub shallow: bool,
    pub deep: bool,
}

impl HistoryMask {
    pub fn is_empty(&self) -> bool {
        !self.shallow && !self.deep
    }

    pub fn contains(&self, kind: HistoryKind) -> bool {
        match kind {
            HistoryKind::None => false,
            HistoryKind::Shallow => self.shallow,
            HistoryKind::Deep => self.deep,
        }
    }

    pub(crate) fn insert(&mut self, kind: HistoryKind) {
        match kind {
            HistoryKind::None => {}
            HistoryKind::Shallow => self.shallow = true,
            HistoryKind::Deep => self.deep = true,
        }
    }
}

pub(crate) struct Node<E, P> {
    pub(crate) name: String,
    pub(crate) alias: String,
    pub(crate) parent: Option<StateId>,
    pub(crate) children: Vec<StateId>,
    pub(crate) initial: Option<StateId>,
    pub(crate) entry: Actions<E, P>,
    pub(crate) exit: Actions<E, P>,
    pub(crate) history: HistoryMask,
    pub(crate) transitions: Vec<Transition<E, P>>,
}

impl<E, P> Node<E, P> {
    pub(crate) fn root() -> Self {
        Self::new(String::new(), String::new(), None)
    }

    pub(crate) fn new(name: String, alias: String, parent: Option<StateId>) -> Self {
        Self {
            name,
            alias,
            parent,
            children: Vec::new(),
            initial: None,
            entry: Actions::new(),
            exit: Actions::new(),
            history: HistoryMask::default(),
            transitions: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Default alias: the state name with spaces replaced by underscores.
pub(crate) fn default_alias(name: &str) -> String {
    name.replace(' ', "_")
}

/// Path from the root down to `id`, both ends included.
pub(crate) fn path_from_root<E, P>(nodes: &[Node<E, P>], id: StateId) -> Vec<StateId> {
    let mut path = Vec::new();
    let mut cursor = Some(id);
    while let Some(state) = cursor {
        path.push(state);
        cursor = nodes[state.0].parent;
    }
    path.reverse();
    path
}

/// States strictly below `ancestor` down to and including `descendant`, top-down.
///
/// Empty when both are the same state.
pub(crate) fn path_below<E, P>(
    nodes: &[Node<E, P>],
    ancestor: StateId,
    descendant: StateId,
) -> Vec<StateId> {
    let mut path = Vec::new();
    let mut cursor = descendant;
    while cursor != ancestor {
        path.push(cursor);
        match nodes[cursor.0].parent {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Whether `ancestor` is a strict (direct or transitive) superstate of `state`.
pub(crate) fn is_ancestor<E, P>(nodes: &[Node<E, P>], ancestor: StateId, state: StateId) -> bool {
    let mut cursor = nodes[state.0].parent;
    while let Some(parent) = cursor {
        if parent == ancestor {
            return true;
        }
        cursor = nodes[parent.0].parent;
    }
    false
}

/// Whether one of the two states contains the other.
pub(crate) fn related<E, P>(nodes: &[Node<E, P>], a: StateId, b: StateId) -> bool {
    is_ancestor(nodes, a, b) || is_ancestor(nodes, b, a)
}
