//! Per-instance shallow and deep history tables.

use crate::core::{HistoryMask, StateId};

/// Last active configuration of composite states, keyed by state index.
///
/// A table is only allocated when the machine has at least one transition of
/// the corresponding history kind. Recorded entries are never cleared.
#[derive(Clone, Debug, Default)]
pub(crate) struct HistoryTables {
    /// state -> last active direct sub-state
    shallow: Option<Vec<Option<StateId>>>,
    /// state -> last active leaf below it
    deep: Option<Vec<Option<StateId>>>,
}

impl HistoryTables {
    pub(crate) fn allocate(mask: HistoryMask, states: usize) -> Self {
        Self {
            shallow: mask.shallow.then(|| vec![None; states]),
            deep: mask.deep.then(|| vec![None; states]),
        }
    }

    /// Record that `child` of `parent` is being exited while `leaf` was active.
    pub(crate) fn record_exit(
        &mut self,
        parent: StateId,
        requested: HistoryMask,
        child: StateId,
        leaf: StateId,
    ) {
        if requested.shallow {
            if let Some(table) = self.shallow.as_mut() {
                table[parent.index()] = Some(child);
            }
        }
        if requested.deep {
            if let Some(table) = self.deep.as_mut() {
                table[parent.index()] = Some(leaf);
            }
        }
    }

    pub(crate) fn shallow(&self, state: StateId) -> Option<StateId> {
        self.shallow.as_ref()?.get(state.index()).copied().flatten()
    }

    pub(crate) fn deep(&self, state: StateId) -> Option<StateId> {
        self.deep.as_ref()?.get(state.index()).copied().flatten()
    }

    #[cfg(test)]
    pub(crate) fn is_allocated(&self) -> (bool, bool) {
        (self.shallow.is_some(), self.deep.is_some())
    }
}
