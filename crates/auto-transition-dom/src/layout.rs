//! Specified sizes and intrinsic measurement.

use auto_transition::Dimension;

use crate::error::ParseError;

/// A specified `width`/`height` value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LengthValue {
    /// Size to content
    #[default]
    Auto,
    /// Fixed size in pixels
    Px(f64),
}

impl LengthValue {
    /// Parse an inline value; empty means `auto`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        match text {
            "" | "auto" => return Ok(Self::Auto),
            "0" => return Ok(Self::Px(0.0)),
            _ => {}
        }

        text.strip_suffix("px")
            .and_then(|px| px.trim().parse::<f64>().ok())
            .filter(|px| px.is_finite() && *px >= 0.0)
            .map(Self::Px)
            .ok_or_else(|| ParseError::Length(text.to_string()))
    }

    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Intrinsic content size of an element, excluding children
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: f64,
    pub height: f64,
}

impl IntrinsicSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}

/// Natural size of a box stacking its children vertically
///
/// Width is the widest of the content and the children; height is the content
/// plus every child.
pub fn stacked_size(
    dimension: Dimension,
    content: IntrinsicSize,
    children: impl IntoIterator<Item = f64>,
) -> f64 {
    let own = content.get(dimension);
    match dimension {
        Dimension::Width => children.into_iter().fold(own, f64::max),
        Dimension::Height => own + children.into_iter().sum::<f64>(),
    }
}
