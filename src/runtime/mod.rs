//! Runtime execution of finalized state machines.
//!
//! An [`Instance`] pairs a shared, immutable [`Machine`](crate::Machine) with
//! its own extended state, active leaf and history tables.
//!
//! # Dispatch
//!
//! `deliver` resolves the transition for an event by searching from the
//! active leaf outwards, then:
//! 1. exits from the leaf up to (excluding) the exit boundary, recording
//!    shallow and deep history on the way,
//! 2. runs the transition action,
//! 3. enters from just below the boundary down to the target,
//! 4. settles into a leaf through initial sub-states or recorded history.
//!
//! Internal transitions only run their action; terminating transitions stop
//! after step 2.

mod error;
mod history;
mod instance;

pub use error::RuntimeError;
pub use instance::{Current, Dispatch, Instance};
