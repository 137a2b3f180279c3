//! Finalize-time structural checks, accumulated with `Validation`.

use crate::builder::error::BuildError;
use crate::core::{Node, StateId, ROOT};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Verifies that entry points resolve to a unique leaf via initial sub-states.
///
/// Each state is inspected at most once, so a composite reachable from
/// several transitions is reported a single time.
pub(crate) struct StructureCheck<'a, E, P> {
    nodes: &'a [Node<E, P>],
    visited: Vec<bool>,
}

impl<'a, E, P> StructureCheck<'a, E, P> {
    pub(crate) fn new(nodes: &'a [Node<E, P>]) -> Self {
        Self {
            nodes,
            visited: vec![false; nodes.len()],
        }
    }

    /// Follow initial links from `entry` down to a leaf.
    pub(crate) fn resolve_entry(&mut self, entry: StateId) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut state = entry;
        loop {
            let node = &self.nodes[state.0];
            if self.visited[state.0] {
                return Validation::success(());
            }
            self.visited[state.0] = true;

            // the root must always designate a top-level state to start in
            if state != ROOT && node.is_leaf() {
                return Validation::success(());
            }
            match node.initial {
                Some(initial) => state = initial,
                None if state == ROOT => return Validation::fail(BuildError::MissingTopInitial),
                None => {
                    return Validation::fail(BuildError::MissingInitial {
                        state: node.name.clone(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_alias;

    fn add(nodes: &mut Vec<Node<(), ()>>, name: &str, parent: usize, initial: bool) -> StateId {
        let id = StateId(nodes.len());
        nodes.push(Node::new(
            name.to_string(),
            default_alias(name),
            Some(StateId(parent)),
        ));
        nodes[parent].children.push(id);
        if initial {
            nodes[parent].initial = Some(id);
        }
        id
    }

    #[test]
    fn resolves_through_initial_chain() {
        let mut nodes = vec![Node::root()];
        let s0 = add(&mut nodes, "s0", 0, true);
        let s1 = add(&mut nodes, "s1", s0.0, true);
        add(&mut nodes, "s11", s1.0, true);

        let mut check = StructureCheck::new(&nodes);
        assert!(check.resolve_entry(ROOT).is_success());
        assert!(check.resolve_entry(s1).is_success());
    }

    #[test]
    fn empty_root_is_rejected() {
        let nodes: Vec<Node<(), ()>> = vec![Node::root()];
        let mut check = StructureCheck::new(&nodes);

        match check.resolve_entry(ROOT) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::MissingTopInitial)));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn composite_without_initial_is_reported_once() {
        let mut nodes = vec![Node::root()];
        add(&mut nodes, "top", 0, true);
        let foo = add(&mut nodes, "foo", 0, false);
        add(&mut nodes, "fooChild", foo.0, false);

        let mut check = StructureCheck::new(&nodes);
        assert!(check.resolve_entry(foo).is_failure());
        assert!(check.resolve_entry(foo).is_success());
    }
}
