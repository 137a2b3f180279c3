//! Named actions run on entry, exit and transition.

use super::event::Event;
use super::naming::combine_names;

/// Type alias for action functions.
pub type ActionFn<E, P> = Box<dyn Fn(&Event<P>, &mut E) + Send + Sync>;

/// A named side effect on the extended state.
///
/// # Example
///
/// ```rust
/// use statechart::{Action, Event};
///
/// let light_on = Action::new("light_on", |_: &Event, opened: &mut u32| *opened += 1);
///
/// let mut opened = 0;
/// light_on.run(&Event::new(0), &mut opened);
/// assert_eq!(opened, 1);
/// assert_eq!(light_on.name(), "light_on");
/// ```
pub struct Action<E, P = ()> {
    name: String,
    action: ActionFn<E, P>,
}

impl<E, P> Action<E, P> {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Event<P>, &mut E) + Send + Sync + 'static,
    {
        Action {
            name: name.into(),
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, event: &Event<P>, ext: &mut E) {
        (self.action)(event, ext)
    }
}

/// Ordered sequence of actions executed as one.
pub(crate) struct Actions<E, P> {
    items: Vec<Action<E, P>>,
    name: String,
}

impl<E, P> Actions<E, P> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            name: String::new(),
        }
    }

    pub(crate) fn push(&mut self, action: Action<E, P>) {
        self.items.push(action);
        self.name = combine_names(self.items.iter().map(Action::name));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn name(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self.name.as_str())
    }

    pub(crate) fn run(&self, event: &Event<P>, ext: &mut E) {
        for action in &self.items {
            action.run(event, ext);
        }
    }
}
