//! Statechart: a hierarchical state machine engine
//!
//! Statechart separates the structure of a machine from its runs. A
//! [`MachineBuilder`] assembles a tree of states with entry/exit actions and
//! guarded transitions; [`MachineBuilder::finalize`] validates it into an
//! immutable [`Machine`]; any number of [`Instance`]s then execute it, each
//! with its own extended state.
//!
//! # Core Concepts
//!
//! - **Composite states**: states containing sub-states, entered through
//!   their initial sub-state and inheriting behavior to their children
//! - **Transitions**: external, local or internal, with guards and actions
//! - **History**: shallow or deep re-entry into previously active states
//! - **Run-to-completion**: each event is fully processed before `deliver`
//!   returns
//!
//! # Example
//!
//! ```rust
//! use statechart::{Current, Event, HistoryKind, Instance, MachineBuilder, Target};
//! use std::sync::Arc;
//!
//! const EV_OPEN: i32 = 0;
//! const EV_CLOSE: i32 = 1;
//! const EV_BAKE: i32 = 2;
//! const EV_OFF: i32 = 3;
//!
//! #[derive(Default)]
//! struct Oven {
//!     opened: u32,
//! }
//!
//! let mut sm: MachineBuilder<Oven> = MachineBuilder::new();
//! let door_open = sm
//!     .state("Door Open")
//!     .entry("light_on", |_: &Event, oven: &mut Oven| oven.opened += 1)
//!     .build()
//!     .unwrap();
//! let door_closed = sm.state("Door Closed").initial().build().unwrap();
//! let baking = sm.substate(door_closed, "Baking").build().unwrap();
//! let off = sm.substate(door_closed, "Off").initial().build().unwrap();
//!
//! sm.transition(door_closed, EV_OPEN, door_open)
//!     .guard("not broken", |_: &Event, oven: &Oven| oven.opened < 100)
//!     .build()
//!     .unwrap();
//! sm.add_transition(door_closed, EV_OPEN, Target::Terminal).unwrap();
//! sm.transition(door_open, EV_CLOSE, door_closed)
//!     .history(HistoryKind::Shallow)
//!     .build()
//!     .unwrap();
//! sm.add_transition(baking, EV_OFF, off).unwrap();
//! sm.add_transition(off, EV_BAKE, baking).unwrap();
//!
//! let machine = Arc::new(sm.finalize().unwrap());
//! let mut oven = Instance::new(machine, Oven::default());
//! oven.initialize(&Event::new(-1)).unwrap();
//! assert_eq!(oven.current(), Current::Active(off));
//!
//! oven.deliver(&Event::new(EV_BAKE)).unwrap();
//! oven.deliver(&Event::new(EV_OPEN)).unwrap();
//! assert_eq!(oven.current(), Current::Active(door_open));
//!
//! oven.deliver(&Event::new(EV_CLOSE)).unwrap();
//! assert_eq!(oven.current(), Current::Active(baking));
//! ```

pub mod builder;
pub mod core;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, FinalizeError, MachineBuilder, StateBuilder, TransitionBuilder};
pub use self::core::{
    Action, Event, EventId, Guard, HistoryKind, HistoryMask, Machine, MachineOptions, StateId,
    StateOutline, StateRef, Target, TransitionInfo, TransitionKind, TransitionOutline,
};
pub use runtime::{Current, Dispatch, Instance, RuntimeError};
