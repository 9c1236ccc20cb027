//! Host element abstraction.
//!
//! Auto transitions only need a thin slice of a live document: inline styles,
//! a resolved size per dimension, a way to force layout, and a transition-end
//! subscription. Hosts (a browser binding, a headless document, a test double)
//! implement [`StyledElement`] for their element handle.

use crate::dimension::{Dimension, StyleProperty};

/// Payload of a transition-finished notification
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEndEvent {
    /// CSS property whose transition completed (e.g. `"height"`)
    pub property_name: String,
    /// Seconds the transition ran for, excluding delay
    pub elapsed_time: f64,
}

impl TransitionEndEvent {
    pub fn new(property_name: impl Into<String>, elapsed_time: f64) -> Self {
        Self {
            property_name: property_name.into(),
            elapsed_time,
        }
    }
}

/// What a transition-end handler wants after running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerControl {
    /// Stay subscribed
    Keep,
    /// Unsubscribe this handler
    Remove,
}

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Transition-end handler; receives the element the event was dispatched on
pub type TransitionEndHandler<E> = Box<dyn FnMut(&E, &TransitionEndEvent) -> ListenerControl>;

/// An element whose inline size can be animated.
///
/// Methods take `&self`: element handles are references into a document the
/// caller owns, and mutation goes through the host.
pub trait StyledElement: Sized {
    /// Current inline value of `property` (empty string when unset)
    fn style(&self, property: StyleProperty) -> String;

    /// Set the inline value of `property` (empty string clears it)
    fn set_style(&self, property: StyleProperty, value: &str);

    /// Resolved size in pixels along `dimension`, as computed style reports it
    fn computed_size(&self, dimension: Dimension) -> f64;

    /// Force a synchronous layout, committing pending style changes
    ///
    /// Returns the laid-out size along `dimension`, like reading `offsetHeight`.
    fn flush_layout(&self, dimension: Dimension) -> f64;

    /// Subscribe to transition-finished notifications
    ///
    /// The handler stays registered until it returns [`ListenerControl::Remove`].
    fn add_transition_end_listener(&self, handler: TransitionEndHandler<Self>) -> ListenerId;
}
