//! Machine-wide construction options.

use serde::{Deserialize, Serialize};

/// Options applied while building a machine.
///
/// Options are plain data so they can be loaded alongside the rest of an
/// application's configuration.
///
/// # Example
///
/// ```rust
/// use statechart::MachineOptions;
///
/// let options = MachineOptions::default().local_default(true);
/// assert!(options.local_default);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Treat transitions between a state and one of its sub-states (or
    /// superstates) as local unless the transition says otherwise.
    pub local_default: bool,
}

impl MachineOptions {
    pub fn local_default(mut self, local: bool) -> Self {
        self.local_default = local;
        self
    }
}
