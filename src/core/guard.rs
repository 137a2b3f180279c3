//! Guard predicates for controlling transitions.
//!
//! Guards are boolean functions of the delivered event and the instance's
//! extended state. A transition may carry several guards; they form a
//! conjunction evaluated in registration order and stop at the first `false`.

use super::event::Event;
use super::naming::combine_names;

/// Type alias for guard predicate functions.
pub type GuardFn<E, P> = Box<dyn Fn(&Event<P>, &E) -> bool + Send + Sync>;

/// Named predicate that determines if a transition can fire.
///
/// The name is used only for introspection (diagrams, outlines); it plays no
/// part in evaluation and need not be unique.
///
/// # Example
///
/// ```rust
/// use statechart::{Event, Guard};
///
/// struct Oven {
///     opened: u32,
/// }
///
/// let broken = Guard::new("broken", |_: &Event, oven: &Oven| oven.opened >= 100);
///
/// assert_eq!(broken.name(), "broken");
/// assert!(broken.check(&Event::new(0), &Oven { opened: 100 }));
/// assert!(!broken.check(&Event::new(0), &Oven { opened: 3 }));
/// ```
pub struct Guard<E, P = ()> {
    name: String,
    predicate: GuardFn<E, P>,
}

impl<E, P> Guard<E, P> {
    /// Create a guard from a name and a predicate.
    ///
    /// The predicate must be thread-safe (Send + Sync) because a finalized
    /// machine is shared between instances.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event<P>, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Display name of this guard.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate against an event and the extended state.
    pub fn check(&self, event: &Event<P>, ext: &E) -> bool {
        (self.predicate)(event, ext)
    }
}

/// Conjunction of guards attached to one transition.
pub(crate) struct Guards<E, P> {
    items: Vec<Guard<E, P>>,
    name: String,
}

impl<E, P> Guards<E, P> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            name: String::new(),
        }
    }

    pub(crate) fn push(&mut self, guard: Guard<E, P>) {
        self.items.push(guard);
        self.name = combine_names(self.items.iter().map(Guard::name));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Combined display name, `None` when no guard was registered.
    pub(crate) fn name(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self.name.as_str())
    }

    /// Short-circuit AND over all guards; an empty set always passes.
    pub(crate) fn check(&self, event: &Event<P>, ext: &E) -> bool {
        self.items.iter().all(|guard| guard.check(event, ext))
    }
}
