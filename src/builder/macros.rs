//! Macros for ergonomic state machine construction.

/// Generate an event-id enum for simple event vocabularies.
///
/// Variants are numbered from zero unless a discriminant is given. The
/// generated type converts into [`EventId`](crate::EventId), so it can be
/// passed wherever an event id is expected, and maps ids back to names for
/// diagrams and logs.
///
/// # Example
///
/// ```
/// use statechart::{event_enum, Event, EventId};
///
/// event_enum! {
///     pub enum OvenEvent {
///         Open,
///         Close,
///         Bake,
///         Off,
///     }
/// }
///
/// let event: Event = Event::new(OvenEvent::Bake);
/// assert_eq!(event.id, 2);
/// assert_eq!(OvenEvent::name_of(event.id), Some("Bake"));
/// assert_eq!(OvenEvent::from_id(3), Some(OvenEvent::Off));
/// assert_eq!(EventId::from(OvenEvent::Open), 0);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $value)?
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn id(&self) -> $crate::EventId {
                *self as $crate::EventId
            }

            pub fn from_id(id: $crate::EventId) -> Option<Self> {
                Self::ALL.iter().copied().find(|event| event.id() == id)
            }

            pub fn name_of(id: $crate::EventId) -> Option<&'static str> {
                Self::from_id(id).map(|event| event.name())
            }
        }

        impl From<$name> for $crate::EventId {
            fn from(event: $name) -> Self {
                event.id()
            }
        }
    };
}
