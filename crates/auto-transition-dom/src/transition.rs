//! The `transition` shorthand and transitions in flight.

use auto_transition::Dimension;

use crate::easing::{lerp, TimingFunction};
use crate::error::ParseError;

/// Which property a `transition` entry applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionProperty {
    All,
    None,
    Named(String),
}

impl TransitionProperty {
    pub fn applies_to(&self, property: &str) -> bool {
        match self {
            TransitionProperty::All => true,
            TransitionProperty::None => false,
            TransitionProperty::Named(name) => name == property,
        }
    }
}

/// One comma-separated entry of the `transition` shorthand
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSpec {
    pub property: TransitionProperty,
    /// Duration in seconds
    pub duration: f64,
    pub timing: TimingFunction,
    /// Delay in seconds (may be negative)
    pub delay: f64,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            property: TransitionProperty::All,
            duration: 0.0,
            timing: TimingFunction::EASE,
            delay: 0.0,
        }
    }
}

impl TransitionSpec {
    /// A transition only runs when its combined duration is positive
    pub fn is_animated(&self) -> bool {
        self.duration.max(0.0) + self.delay > 0.0
    }
}

/// Parse a CSS `<time>` (`0.5s`, `200ms`, or a bare `0`) into seconds
pub fn parse_time(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    let invalid = || ParseError::Time(text.to_string());

    let seconds = if let Some(ms) = text.strip_suffix("ms") {
        ms.parse::<f64>().map_err(|_| invalid())? / 1000.0
    } else if let Some(s) = text.strip_suffix('s') {
        s.parse::<f64>().map_err(|_| invalid())?
    } else if text == "0" {
        0.0
    } else {
        return Err(invalid());
    };

    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(invalid())
    }
}

/// Parse the `transition` shorthand into its entries
///
/// An empty value yields no entries.
pub fn parse_transition_list(text: &str) -> Result<Vec<TransitionSpec>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(text, ',')
        .into_iter()
        .map(|entry| parse_transition_entry(entry, text))
        .collect()
}

/// The entry that governs `property`; later entries win over earlier ones
pub fn spec_for<'a>(specs: &'a [TransitionSpec], property: &str) -> Option<&'a TransitionSpec> {
    specs
        .iter()
        .rev()
        .find(|spec| spec.property.applies_to(property))
}

fn parse_transition_entry(entry: &str, whole: &str) -> Result<TransitionSpec, ParseError> {
    let invalid = || ParseError::Transition(whole.to_string());

    let mut spec = TransitionSpec::default();
    let mut times = 0;
    let mut property = None;
    let mut timing = None;

    let tokens = split_top_level(entry, ' ');
    if tokens.is_empty() {
        return Err(invalid());
    }

    for token in tokens {
        if let Ok(seconds) = parse_time(token) {
            match times {
                0 => spec.duration = seconds,
                1 => spec.delay = seconds,
                _ => return Err(invalid()),
            }
            times += 1;
        } else if let Ok(function) = TimingFunction::parse(token) {
            if timing.replace(function).is_some() {
                return Err(invalid());
            }
        } else if is_ident(token) {
            let parsed = match token {
                "all" => TransitionProperty::All,
                "none" => TransitionProperty::None,
                name => TransitionProperty::Named(name.to_string()),
            };
            if property.replace(parsed).is_some() {
                return Err(invalid());
            }
        } else {
            return Err(invalid());
        }
    }

    if spec.duration < 0.0 {
        return Err(invalid());
    }
    if let Some(property) = property {
        spec.property = property;
    }
    if let Some(timing) = timing {
        spec.timing = timing;
    }
    Ok(spec)
}

fn is_ident(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '-' || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Split on `separator` outside parentheses, dropping empty pieces
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                pieces.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// A transition in flight on one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct RunningTransition {
    pub dimension: Dimension,
    /// Start value in pixels
    pub from: f64,
    /// End value in pixels
    pub to: f64,
    /// Document time the style change happened, in seconds
    pub start_time: f64,
    pub duration: f64,
    pub delay: f64,
    pub timing: TimingFunction,
}

impl RunningTransition {
    /// Document time at which the transition completes
    pub fn end_time(&self) -> f64 {
        self.start_time + self.delay + self.duration
    }

    /// Linear progress at `now` (0.0 before the delay elapses, 1.0 when done)
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.end_time() { 1.0 } else { 0.0 };
        }
        ((now - self.start_time - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`
    pub fn value_at(&self, now: f64) -> f64 {
        lerp(self.from, self.to, self.timing.apply(self.progress(now)))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now + 1e-9 >= self.end_time()
    }
}
