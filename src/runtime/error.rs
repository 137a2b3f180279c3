//! Runtime usage errors.

use thiserror::Error;

/// Misuse of an [`Instance`](crate::Instance).
///
/// Unmatched events are not errors; they are reported as
/// [`Dispatch::Ignored`](crate::Dispatch::Ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("state machine must be initialized before delivering the first event")]
    NotInitialized,

    #[error("state machine instance is already initialized")]
    AlreadyInitialized,
}
