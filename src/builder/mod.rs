//! Builder API for constructing hierarchical state machines.
//!
//! Construction is a single batch: create states and transitions through the
//! fluent builders, commit each with `build()`, then call
//! [`MachineBuilder::finalize`] to validate the structure and obtain an
//! immutable [`Machine`](crate::Machine).
//!
//! Violations local to one builder (two initial siblings, an internal
//! transition that is not a self-transition, a local transition between
//! unrelated states) are returned by that builder's `build()`. Global ones
//! (forgotten builders, composite entry points without an initial sub-state)
//! are all collected by `finalize()`.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;
mod validate;

pub use error::{BuildError, FinalizeError};
pub use machine::MachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
