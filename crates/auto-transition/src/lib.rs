//! # auto-transition
//!
//! Animate an element's width or height to and from its intrinsic (`auto`) size.
//!
//! CSS cannot transition to or from `auto`. This crate measures the natural size
//! by briefly setting the dimension to `auto`, restores the previous value, forces
//! a layout, and then transitions between concrete pixel lengths. Hosts plug in
//! through the [`StyledElement`] trait.
//!
//! ## Entry points
//!
//! - [`width_to_auto`] / [`height_to_auto`] - expand to the natural size, ending at `auto`
//! - [`width_from_auto`] / [`height_from_auto`] - collapse to a fixed length (default `0px`)
//!
//! ## Options
//!
//! - [`TransitionOptions`] - duration, timing function and delay
//! - [`OptionValue`] - loosely typed option input (strings verbatim, numbers get a unit)

mod dimension;
mod element;
mod options;
mod transition;

pub use dimension::*;
pub use element::*;
pub use options::*;
pub use transition::*;
