use std::collections::HashMap;

use auto_transition::StyleProperty;

/// A recorded inline style write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMutation {
    pub property: StyleProperty,
    pub value: String,
    /// Inline `transition` value right after the write
    pub transition: String,
}

/// Inline style declarations of one element
///
/// Every write is kept in a journal so callers can inspect the order of
/// mutations, not only the final state.
#[derive(Debug, Clone, Default)]
pub struct InlineStyle {
    values: HashMap<StyleProperty, String>,
    journal: Vec<StyleMutation>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value (empty string when unset)
    pub fn get(&self, property: StyleProperty) -> &str {
        self.values.get(&property).map(String::as_str).unwrap_or("")
    }

    /// Set a value; an empty string removes the declaration
    pub fn set(&mut self, property: StyleProperty, value: &str) {
        if value.is_empty() {
            self.values.remove(&property);
        } else {
            self.values.insert(property, value.to_string());
        }

        let transition = self.get(StyleProperty::Transition).to_string();
        self.journal.push(StyleMutation {
            property,
            value: value.to_string(),
            transition,
        });
    }

    pub fn mutations(&self) -> &[StyleMutation] {
        &self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_removes_declaration() {
        let mut style = InlineStyle::new();
        style.set(StyleProperty::Height, "10px");
        assert_eq!(style.get(StyleProperty::Height), "10px");

        style.set(StyleProperty::Height, "");
        assert_eq!(style.get(StyleProperty::Height), "");
        assert_eq!(style.mutations().len(), 2);
    }

    #[test]
    fn test_journal_records_transition() {
        let mut style = InlineStyle::new();
        style.set(StyleProperty::Height, "0px");
        style.set(StyleProperty::Transition, "height 1s");
        style.set(StyleProperty::Height, "40px");

        let last = style.mutations().last().unwrap();
        assert_eq!(last.value, "40px");
        assert_eq!(last.transition, "height 1s");
        assert_eq!(style.mutations()[0].transition, "");
    }
}
