//! Transition options and their coercion into CSS values.
//!
//! Callers hand options over as loosely typed [`OptionValue`]s (strings are used
//! verbatim, numbers get an implicit unit). Anything else is reported as an
//! [`OptionTypeError`], logged, and replaced by the documented default. Resolution
//! never fails from the caller's point of view.

use std::fmt;

use auto_transition_macros::WithBuilders;

use crate::dimension::Dimension;

/// Default transition duration
pub const DEFAULT_DURATION: &str = "0.2s";
/// Default timing function
pub const DEFAULT_TIMING: &str = "ease";
/// Default transition delay
pub const DEFAULT_DELAY: &str = "0s";
/// Default target length for collapsing from auto
pub const DEFAULT_LENGTH: &str = "0px";

/// A loosely typed option value
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// Pre-formatted CSS text, used verbatim
    Text(String),
    /// Bare number, gets an implicit unit
    Number(f64),
    Bool(bool),
    Null,
}

impl OptionValue {
    /// Name of the value's type, as reported in diagnostics
    pub const fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Text(_) => "string",
            OptionValue::Number(_) => "number",
            OptionValue::Bool(_) => "boolean",
            OptionValue::Null => "null",
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for OptionValue {
    /// Keeps the shortest decimal form, so `0.1f32` stays `0.1`
    fn from(n: f32) -> Self {
        Self::Number(n.to_string().parse().unwrap_or(f64::from(n)))
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for OptionValue {
    fn from(n: u32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Null)
    }
}

/// Which option a value was supplied for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionName {
    Duration,
    Timing,
    Delay,
    Length,
}

impl OptionName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OptionName::Duration => "duration",
            OptionName::Timing => "timing",
            OptionName::Delay => "delay",
            OptionName::Length => "length",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An option was given a value of an unsupported type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type error: '{option}' has type {found}, expected {expected}")]
pub struct OptionTypeError {
    pub option: OptionName,
    pub found: &'static str,
    pub expected: &'static str,
}

/// A CSS `<time>` value
#[derive(Clone, Debug, PartialEq)]
pub enum CssTime {
    /// Pre-formatted text such as `"150ms"`
    Raw(String),
    /// Seconds, rendered with an `s` suffix
    Seconds(f64),
}

impl fmt::Display for CssTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssTime::Raw(text) => f.write_str(text),
            CssTime::Seconds(seconds) => write!(f, "{}s", seconds),
        }
    }
}

/// A CSS `<length>` value
#[derive(Clone, Debug, PartialEq)]
pub enum CssLength {
    /// Pre-formatted text such as `"3em"`
    Raw(String),
    /// Pixels, rendered with a `px` suffix
    Px(f64),
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssLength::Raw(text) => f.write_str(text),
            CssLength::Px(px) => write!(f, "{}px", px),
        }
    }
}

/// Coerce a duration or delay: strings pass through, numbers are seconds
pub fn coerce_time(value: &OptionValue, option: OptionName) -> Result<CssTime, OptionTypeError> {
    match value {
        OptionValue::Text(text) => Ok(CssTime::Raw(text.clone())),
        OptionValue::Number(seconds) => Ok(CssTime::Seconds(*seconds)),
        other => Err(OptionTypeError {
            option,
            found: other.type_name(),
            expected: "string or number",
        }),
    }
}

/// Coerce a timing function, which must be a string
pub fn coerce_timing(value: &OptionValue) -> Result<String, OptionTypeError> {
    match value {
        OptionValue::Text(text) => Ok(text.clone()),
        other => Err(OptionTypeError {
            option: OptionName::Timing,
            found: other.type_name(),
            expected: "string",
        }),
    }
}

/// Coerce a target length: strings pass through, numbers are pixels
pub fn coerce_length(value: &OptionValue) -> Result<CssLength, OptionTypeError> {
    match value {
        OptionValue::Text(text) => Ok(CssLength::Raw(text.clone())),
        OptionValue::Number(px) => Ok(CssLength::Px(*px)),
        other => Err(OptionTypeError {
            option: OptionName::Length,
            found: other.type_name(),
            expected: "string or number",
        }),
    }
}

/// Resolve a target length, substituting [`DEFAULT_LENGTH`] when absent or invalid
///
/// Returns the error that was recovered from, if any (already logged).
pub fn resolve_length(value: Option<&OptionValue>) -> (CssLength, Option<OptionTypeError>) {
    let Some(value) = value else {
        return (CssLength::Raw(DEFAULT_LENGTH.to_string()), None);
    };

    match coerce_length(value) {
        Ok(length) => (length, None),
        Err(err) => {
            log::error!("{}; using default '{}'", err, DEFAULT_LENGTH);
            (CssLength::Raw(DEFAULT_LENGTH.to_string()), Some(err))
        }
    }
}

/// Duration, timing function and delay of an auto transition
///
/// ```ignore
/// let options = TransitionOptions::default()
///     .with_duration(0.5)
///     .with_timing("linear");
/// ```
#[derive(Clone, Debug, PartialEq, WithBuilders)]
pub struct TransitionOptions {
    /// Duration (string verbatim, number in seconds)
    pub duration: OptionValue,
    /// Timing function name (string only)
    pub timing: OptionValue,
    /// Delay (string verbatim, number in seconds)
    pub delay: OptionValue,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration: OptionValue::from(DEFAULT_DURATION),
            timing: OptionValue::from(DEFAULT_TIMING),
            delay: OptionValue::from(DEFAULT_DELAY),
        }
    }
}

impl TransitionOptions {
    /// Create options with the default duration, timing and delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce every option, logging and defaulting the invalid ones
    pub fn resolve(&self) -> ResolvedOptions {
        let mut errors = Vec::new();

        let duration = recover(
            coerce_time(&self.duration, OptionName::Duration),
            || CssTime::Raw(DEFAULT_DURATION.to_string()),
            &mut errors,
        );
        let timing = recover(
            coerce_timing(&self.timing),
            || DEFAULT_TIMING.to_string(),
            &mut errors,
        );
        let delay = recover(
            coerce_time(&self.delay, OptionName::Delay),
            || CssTime::Raw(DEFAULT_DELAY.to_string()),
            &mut errors,
        );

        ResolvedOptions {
            duration,
            timing,
            delay,
            errors,
        }
    }
}

fn recover<T: fmt::Display>(
    result: Result<T, OptionTypeError>,
    default: impl FnOnce() -> T,
    errors: &mut Vec<OptionTypeError>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            let value = default();
            log::error!("{}; using default '{}'", err, value);
            errors.push(err);
            value
        }
    }
}

/// Options after coercion, ready to be written into a `transition` style
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub duration: CssTime,
    pub timing: String,
    pub delay: CssTime,
    /// Errors recovered from during resolution
    pub errors: Vec<OptionTypeError>,
}

impl ResolvedOptions {
    /// The `transition` shorthand animating `dimension`, e.g. `height 0.5s linear 0s`
    pub fn transition_value(&self, dimension: Dimension) -> String {
        format!(
            "{} {} {} {}",
            dimension, self.duration, self.timing, self.delay
        )
    }
}
