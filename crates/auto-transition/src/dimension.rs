use std::fmt;

/// The literal inline value for intrinsic sizing.
pub const AUTO: &str = "auto";

/// Sizing axis an auto transition operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// CSS property name of this dimension (`"width"` or `"height"`)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }

    /// Inline style property holding this dimension
    pub const fn style_property(&self) -> StyleProperty {
        match self {
            Dimension::Width => StyleProperty::Width,
            Dimension::Height => StyleProperty::Height,
        }
    }

    /// Check if a transition-end property name refers to this dimension
    pub fn matches(&self, property_name: &str) -> bool {
        property_name == self.as_str()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline style properties touched by auto transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Width,
    Height,
    Transition,
}

impl StyleProperty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Transition => "transition",
        }
    }

    /// The dimension this property sizes, if any
    pub const fn dimension(&self) -> Option<Dimension> {
        match self {
            StyleProperty::Width => Some(Dimension::Width),
            StyleProperty::Height => Some(Dimension::Height),
            StyleProperty::Transition => None,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
