use crate::config::StrategyMode;
use crate::derivation::Derivation;
use crate::error::SmoothieError;
use crate::parser::FormulaParser;
use crate::registry::{RuleDefinition, RuleRegistry};
use crate::validator::Validator;
use crate::verdict::{FailureReason, Rejection, Verdict};
use crate::SmoothieResult;
use serde::{Deserialize, Serialize};

/// What a customer asks for: a rule, the premises on the counter, and the drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub rule: String,
    pub premises: Vec<String>,
    pub target: String,
}

impl CustomerRequest {
    pub fn new(rule: impl Into<String>, premises: Vec<String>, target: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            premises,
            target: target.into(),
        }
    }

    /// The example request a rule definition carries
    pub fn from_definition(definition: &RuleDefinition) -> Self {
        Self {
            rule: definition.id.clone(),
            premises: definition.premises.clone(),
            target: definition.conclusion.clone(),
        }
    }

    pub fn premise_refs(&self) -> Vec<&str> {
        self.premises.iter().map(String::as_str).collect()
    }
}

/// What the player hands over when serving
#[derive(Debug, Clone, Copy)]
pub enum Attempt<'a> {
    /// One assembled formula (strict play)
    Conclusion(&'a str),
    /// Everything derived so far (inventory play)
    Inventory(&'a Derivation),
}

impl Attempt<'_> {
    fn mode(&self) -> StrategyMode {
        match self {
            Attempt::Conclusion(_) => StrategyMode::Strict,
            Attempt::Inventory(_) => StrategyMode::Inventory,
        }
    }
}

/// A way of judging whether a customer was served correctly.
///
/// The two implementations make different promises: the strict strategy
/// checks the rule's full schema, the inventory strategy only checks that
/// the target was reached somehow.
pub trait Strategy {
    fn mode(&self) -> StrategyMode;

    fn serve(&self, request: &CustomerRequest, attempt: Attempt<'_>) -> SmoothieResult<Verdict>;

    fn mismatch(&self, attempt: &Attempt<'_>) -> SmoothieError {
        SmoothieError::ModeMismatch {
            expected: self.mode().name(),
            actual: attempt.mode().name(),
        }
    }
}

pub struct StrictStrategy<'a> {
    validator: Validator<'a>,
}

impl<'a> StrictStrategy<'a> {
    pub fn new(validator: Validator<'a>) -> Self {
        Self { validator }
    }
}

impl Strategy for StrictStrategy<'_> {
    fn mode(&self) -> StrategyMode {
        StrategyMode::Strict
    }

    fn serve(&self, request: &CustomerRequest, attempt: Attempt<'_>) -> SmoothieResult<Verdict> {
        let Attempt::Conclusion(conclusion) = attempt else {
            return Err(self.mismatch(&attempt));
        };
        Ok(self
            .validator
            .validate_text(&request.premise_refs(), conclusion, &request.rule))
    }
}

pub struct InventoryStrategy<'a> {
    registry: &'a RuleRegistry,
    parser: FormulaParser<'a>,
}

impl<'a> InventoryStrategy<'a> {
    pub fn new(registry: &'a RuleRegistry, parser: FormulaParser<'a>) -> Self {
        Self { registry, parser }
    }
}

impl Strategy for InventoryStrategy<'_> {
    fn mode(&self) -> StrategyMode {
        StrategyMode::Inventory
    }

    fn serve(&self, request: &CustomerRequest, attempt: Attempt<'_>) -> SmoothieResult<Verdict> {
        let Attempt::Inventory(derivation) = attempt else {
            return Err(self.mismatch(&attempt));
        };

        let explanation = self
            .registry
            .get(&request.rule)
            .map(|d| d.explanation.clone())
            .unwrap_or_default();

        let target = match self.parser.parse(&request.target) {
            Ok(target) => target,
            Err(e) => {
                return Ok(Verdict::fail(
                    &request.rule,
                    explanation,
                    Rejection::from_parse_error(&e),
                ))
            }
        };

        if derivation.contains(&target) {
            Ok(Verdict::pass(&request.rule, explanation))
        } else {
            Ok(Verdict::fail(
                &request.rule,
                explanation,
                Rejection::new(
                    FailureReason::ConclusionMismatch,
                    format!("Target conclusion \"{}\" not found in inventory", target),
                ),
            ))
        }
    }
}
