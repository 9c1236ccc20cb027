//! # auto-transition-dom
//!
//! Headless document host for `auto-transition`.
//!
//! This crate implements [`auto_transition::StyledElement`] for an in-memory
//! element tree with inline styles, a small vertical-stacking layout, and CSS
//! transitions driven by a virtual clock. It behaves like a browser where the
//! technique cares: `auto` snaps instead of animating, style writes coalesce
//! until a recalculation, and `transitionend` fires per property.
//!
//! ## Core Types
//!
//! - [`Document`] - Owns elements and the clock; [`Document::advance`] renders a frame
//! - [`Element`] - Cheap handle implementing `StyledElement`
//! - [`StyleMutation`] - Journal entry of an inline style write
//!
//! ## CSS Values
//!
//! - [`TimingFunction`] - Keywords, `cubic-bezier()` and `steps()`
//! - [`TransitionSpec`] - One entry of the `transition` shorthand
//! - [`LengthValue`] - `auto` or a pixel length

mod document;
pub mod easing;
mod error;
mod layout;
mod style;
mod transition;

pub use document::*;
pub use easing::{StepPosition, TimingFunction};
pub use error::*;
pub use layout::*;
pub use style::*;
pub use transition::*;
