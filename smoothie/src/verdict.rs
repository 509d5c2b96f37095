use crate::error::SmoothieError;
use crate::registry::Primitive;
use serde::Serialize;
use std::fmt;

/// Why a validation attempt failed
///
/// All reasons are in-game feedback; none of them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureReason {
    EmptyFormula,
    /// Strict parsing only: a token outside the alphabet
    UnknownSymbol,
    /// Longer than the configured formula size limit
    FormulaTooLong,
    UnknownRule,
    ArityMismatch,
    ShapePatternNotFound,
    ChainMismatch,
    ConclusionMismatch,
    /// The registry knows the rule but nothing can check it
    UnsupportedRule,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::EmptyFormula => "EmptyFormula",
            FailureReason::UnknownSymbol => "UnknownSymbol",
            FailureReason::FormulaTooLong => "FormulaTooLong",
            FailureReason::UnknownRule => "UnknownRule",
            FailureReason::ArityMismatch => "ArityMismatch",
            FailureReason::ShapePatternNotFound => "ShapePatternNotFound",
            FailureReason::ChainMismatch => "ChainMismatch",
            FailureReason::ConclusionMismatch => "ConclusionMismatch",
            FailureReason::UnsupportedRule => "UnsupportedRule",
        };
        write!(f, "{}", name)
    }
}

/// A failed check: the reason plus a sentence the customer can say
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: FailureReason,
    pub detail: String,
}

impl Rejection {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }

    pub(crate) fn from_parse_error(error: &SmoothieError) -> Self {
        match error {
            SmoothieError::UnknownSymbol { symbol, .. } => Rejection::new(
                FailureReason::UnknownSymbol,
                format!("'{}' is not on the menu", symbol),
            ),
            SmoothieError::ResourceLimitExceeded { .. } => Rejection::new(
                FailureReason::FormulaTooLong,
                format!("{}", error),
            ),
            other => Rejection::new(
                FailureReason::EmptyFormula,
                format!("Invalid formula format: {}", other),
            ),
        }
    }
}

/// What happened at one step of a composite rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub rule: Primitive,
    pub premises: Vec<String>,
    pub result: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of one validation call
///
/// Created per call and never stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub rule: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepOutcome>,
}

impl Verdict {
    pub fn pass(rule: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            valid: true,
            rule: rule.into(),
            explanation: explanation.into(),
            error: None,
            detail: None,
            steps: Vec::new(),
        }
    }

    pub fn fail(
        rule: impl Into<String>,
        explanation: impl Into<String>,
        rejection: Rejection,
    ) -> Self {
        Self {
            valid: false,
            rule: rule.into(),
            explanation: explanation.into(),
            error: Some(rejection.reason),
            detail: Some(rejection.detail),
            steps: Vec::new(),
        }
    }

    pub(crate) fn from_check(
        rule: impl Into<String>,
        explanation: impl Into<String>,
        check: Result<(), Rejection>,
    ) -> Self {
        match check {
            Ok(()) => Verdict::pass(rule, explanation),
            Err(rejection) => Verdict::fail(rule, explanation, rejection),
        }
    }

    pub fn with_steps(mut self, steps: Vec<StepOutcome>) -> Self {
        self.steps = steps;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
