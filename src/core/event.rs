//! Events delivered to state machine instances.

/// Integer key identifying the kind of an event.
///
/// Transitions are registered against an event id; the payload carried by
/// an [`Event`] never takes part in matching, only guards may inspect it.
pub type EventId = i32;

/// An occurrence delivered to a state machine instance.
///
/// `id` selects the candidate transitions, while `data` is an opaque payload
/// handed to guards and actions untouched.
///
/// # Example
///
/// ```rust
/// use statechart::Event;
///
/// let tick: Event = Event::new(3);
/// assert_eq!(tick.id, 3);
///
/// let reading = Event::with_data(4, 21.5_f64);
/// assert_eq!(reading.data, 21.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Event<P = ()> {
    /// Event kind used for transition matching
    pub id: EventId,
    /// Auxiliary event data
    pub data: P,
}

impl<P: Default> Event<P> {
    /// Create an event carrying the default payload.
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            data: P::default(),
        }
    }
}

impl<P> Event<P> {
    /// Create an event with an explicit payload.
    pub fn with_data(id: impl Into<EventId>, data: P) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_uses_default_payload() {
        let event: Event<Option<String>> = Event::new(7);
        assert_eq!(event.id, 7);
        assert!(event.data.is_none());
    }

    #[test]
    fn with_data_keeps_payload() {
        let event = Event::with_data(-1, "boot");
        assert_eq!(event.id, -1);
        assert_eq!(event.data, "boot");
    }
}
