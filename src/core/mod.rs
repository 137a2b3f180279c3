//! Core statechart types.
//!
//! This module contains the structural model shared by the builder and the
//! runtime:
//! - Events and their integer ids
//! - Named guards and actions, composed in registration order
//! - The state arena with parent/child links and history masks
//! - Transition declarations (kind, history, target)
//! - The finalized, immutable `Machine` and its read-only views

mod action;
mod event;
mod guard;
mod machine;
mod naming;
mod options;
mod state;
mod transition;

pub use action::{Action, ActionFn};
pub use event::{Event, EventId};
pub use guard::{Guard, GuardFn};
pub use machine::{Machine, StateOutline, StateRef, TransitionInfo, TransitionOutline};
pub use options::MachineOptions;
pub use state::{HistoryMask, StateId};
pub use transition::{HistoryKind, Target, TransitionKind};

pub(crate) use action::Actions;
pub(crate) use guard::Guards;
pub(crate) use state::{default_alias, path_below, related, Node, ROOT};
pub(crate) use transition::Transition;
