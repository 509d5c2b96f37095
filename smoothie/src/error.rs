use serde::Serialize;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Byte range of a token inside the text it was parsed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Error types for the smoothie engine
///
/// These are failures of the API itself: bad configuration, text that is not
/// a formula, or a call that does not fit the engine's mode. A wrong answer
/// from the player is never an error; it is an invalid [`crate::Verdict`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SmoothieError {
    /// Formula text was empty or held only whitespace
    #[error("Empty formula: nothing to parse")]
    EmptyFormula,

    /// Strict parsing met a token outside the configured alphabet
    #[error("Unknown symbol '{symbol}' at {span} in '{source_text}'")]
    UnknownSymbol {
        symbol: String,
        span: Span,
        source_text: String,
    },

    #[error("Resource limit exceeded: {limit_name} is {limit_value}, got {actual_value}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
    },

    #[error("Unknown rule: '{0}'")]
    UnknownRule(String),

    /// Rule table breaks an invariant (duplicate id, broken composite chain, ...)
    #[error("Invalid rule registry: {0}")]
    InvalidRegistry(String),

    /// Configuration text could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The attempt handed to `serve` belongs to the other strategy
    #[error("Strategy mismatch: engine runs in {expected} mode but got a {actual} attempt")]
    ModeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl From<serde_json::Error> for SmoothieError {
    fn from(err: serde_json::Error) -> Self {
        SmoothieError::InvalidConfig(err.to_string())
    }
}
