//! A running instance of a state machine.

use crate::core::{path_below, Event, HistoryKind, Machine, StateId, Target, TransitionKind};
use crate::runtime::error::RuntimeError;
use crate::runtime::history::HistoryTables;
use std::sync::Arc;
use tracing::{debug, trace};

/// Where an instance currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Current {
    /// `initialize` has not been called yet
    Uninitialized,
    /// Settled in a leaf state
    Active(StateId),
    /// A terminating transition was taken; every later event is ignored
    Terminated,
}

/// Outcome of delivering one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A transition fired; `source` is the state that declared it, which may
    /// be an ancestor of the active leaf
    Handled { source: StateId },
    /// No transition matched (or the instance is terminated)
    Ignored,
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }

    /// The state at which the event was matched.
    pub fn matched_at(&self) -> Option<StateId> {
        match self {
            Dispatch::Handled { source } => Some(*source),
            Dispatch::Ignored => None,
        }
    }
}

/// One run of a [`Machine`], owning its extended state.
///
/// Many instances can share the same machine. An instance itself is driven
/// by one caller at a time: `deliver` runs to completion, and guards and
/// actions only ever see the extended state, never the instance.
///
/// # Example
///
/// ```rust
/// use statechart::{Current, Event, Instance, MachineBuilder};
/// use std::sync::Arc;
///
/// let mut sm: MachineBuilder<u32> = MachineBuilder::new();
/// let off = sm.state("Off").initial().build().unwrap();
/// let on = sm
///     .state("On")
///     .entry("count", |_: &Event, switched: &mut u32| *switched += 1)
///     .build()
///     .unwrap();
/// sm.add_transition(off, 0, on).unwrap();
/// sm.add_transition(on, 0, off).unwrap();
/// let machine = Arc::new(sm.finalize().unwrap());
///
/// let mut lamp = Instance::new(Arc::clone(&machine), 0);
/// lamp.initialize(&Event::new(-1)).unwrap();
/// assert_eq!(lamp.current(), Current::Active(off));
///
/// let dispatch = lamp.deliver(&Event::new(0)).unwrap();
/// assert_eq!(dispatch.matched_at(), Some(off));
/// assert_eq!(lamp.current(), Current::Active(on));
/// assert_eq!(*lamp.ext(), 1);
/// ```
pub struct Instance<E, P = ()> {
    machine: Arc<Machine<E, P>>,
    ext: E,
    current: Current,
    history: HistoryTables,
}

impl<E, P> Instance<E, P> {
    /// Create an uninitialized instance with its own extended state.
    pub fn new(machine: Arc<Machine<E, P>>, ext: E) -> Self {
        Self {
            machine,
            ext,
            current: Current::Uninitialized,
            history: HistoryTables::default(),
        }
    }

    pub fn machine(&self) -> &Arc<Machine<E, P>> {
        &self.machine
    }

    pub fn ext(&self) -> &E {
        &self.ext
    }

    pub fn ext_mut(&mut self) -> &mut E {
        &mut self.ext
    }

    pub fn into_ext(self) -> E {
        self.ext
    }

    pub fn current(&self) -> Current {
        self.current
    }

    /// The active leaf, `None` before initialization and after termination.
    pub fn current_state(&self) -> Option<StateId> {
        match self.current {
            Current::Active(state) => Some(state),
            Current::Uninitialized | Current::Terminated => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.current == Current::Terminated
    }

    /// Enter the machine: walk from the root to a leaf through initial
    /// sub-states, running each entry action on the way down.
    ///
    /// `event` is only passed to the entry actions; it is never matched
    /// against transitions.
    pub fn initialize(&mut self, event: &Event<P>) -> Result<(), RuntimeError> {
        if self.current != Current::Uninitialized {
            return Err(RuntimeError::AlreadyInitialized);
        }

        let Self {
            machine,
            ext,
            current,
            history,
        } = self;
        *history = HistoryTables::allocate(machine.history(), machine.len());

        let mut cursor = Some(machine.root());
        while let Some(state) = cursor {
            let node = machine.node(state);
            node.entry.run(event, ext);
            *current = Current::Active(state);
            cursor = node.initial;
        }

        if let Current::Active(leaf) = *current {
            debug!(state = machine.node(leaf).name.as_str(), "state machine initialized");
        }
        Ok(())
    }

    /// Deliver one event and run the resulting transition to completion.
    ///
    /// The transition is looked up from the active leaf outwards; the first
    /// declared transition whose event id matches and whose guards pass
    /// wins. Unmatched events are discarded and reported as
    /// [`Dispatch::Ignored`], as is every event after termination.
    pub fn deliver(&mut self, event: &Event<P>) -> Result<Dispatch, RuntimeError> {
        let leaf = match self.current {
            Current::Uninitialized => return Err(RuntimeError::NotInitialized),
            Current::Terminated => return Ok(Dispatch::Ignored),
            Current::Active(leaf) => leaf,
        };

        let Self {
            machine,
            ext,
            current,
            history,
        } = self;
        let machine: &Machine<E, P> = &**machine;

        let Some((source, transition)) = machine.resolve(leaf, event, ext) else {
            trace!(
                event = event.id,
                state = machine.node(leaf).name.as_str(),
                "event ignored"
            );
            return Ok(Dispatch::Ignored);
        };
        trace!(
            event = event.id,
            source = machine.node(source).name.as_str(),
            target = machine.target_name(transition.target),
            kind = ?transition.kind,
            "transition matched"
        );

        if transition.kind == TransitionKind::Internal {
            transition.actions.run(event, ext);
            return Ok(Dispatch::Handled { source });
        }

        let boundary = machine.exit_boundary(source, transition.target, transition.kind);

        let mut state = leaf;
        while state != boundary {
            let node = machine.node(state);
            node.exit.run(event, ext);
            let Some(parent) = node.parent else {
                break;
            };
            history.record_exit(parent, machine.node(parent).history, state, leaf);
            state = parent;
        }

        transition.actions.run(event, ext);

        let target = match transition.target {
            Target::State(target) => target,
            Target::Terminal => {
                *current = Current::Terminated;
                debug!(
                    event = event.id,
                    source = machine.node(source).name.as_str(),
                    "state machine terminated"
                );
                return Ok(Dispatch::Handled { source });
            }
        };

        for state in path_below(&machine.nodes, boundary, target) {
            machine.node(state).entry.run(event, ext);
        }

        let settled = settle(machine, history, target, transition.history, event, ext);
        *current = Current::Active(settled);
        Ok(Dispatch::Handled { source })
    }
}

/// Descend from a freshly entered `target` into a leaf, running entry actions.
///
/// History targets resume their recorded configuration when one exists and
/// otherwise behave like a plain initial descent.
fn settle<E, P>(
    machine: &Machine<E, P>,
    history: &HistoryTables,
    target: StateId,
    kind: HistoryKind,
    event: &Event<P>,
    ext: &mut E,
) -> StateId {
    let mut state = target;
    match kind {
        HistoryKind::Deep => {
            if let Some(leaf) = history.deep(target) {
                trace!(
                    target = machine.node(target).name.as_str(),
                    leaf = machine.node(leaf).name.as_str(),
                    "resuming deep history"
                );
                for below in path_below(&machine.nodes, target, leaf) {
                    machine.node(below).entry.run(event, ext);
                }
                return leaf;
            }
        }
        HistoryKind::Shallow => {
            if let Some(child) = history.shallow(target) {
                trace!(
                    target = machine.node(target).name.as_str(),
                    child = machine.node(child).name.as_str(),
                    "resuming shallow history"
                );
                machine.node(child).entry.run(event, ext);
                state = child;
            }
        }
        HistoryKind::None => {}
    }

    while let Some(initial) = machine.node(state).initial {
        machine.node(initial).entry.run(event, ext);
        state = initial;
    }
    state
}
