use crate::alphabet::SymbolKind;
use crate::parser::{Formula, FormulaParser};
use crate::patterns::Patterns;
use crate::registry::{Primitive, RuleDefinition, RuleKind, RuleRegistry, Step};
use crate::verdict::{FailureReason, Rejection, StepOutcome, Verdict};
use tracing::debug;

type Check = Result<(), Rejection>;

fn shape(detail: impl Into<String>) -> Rejection {
    Rejection::new(FailureReason::ShapePatternNotFound, detail)
}

fn mismatch(detail: impl Into<String>) -> Rejection {
    Rejection::new(FailureReason::ConclusionMismatch, detail)
}

/// Strict validator: checks one proposed conclusion against the schema of
/// the requested rule.
///
/// Premises may come in any order. Each rule scans them once for the shapes
/// it needs; when several premises fit, the first one wins.
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    registry: &'a RuleRegistry,
    parser: FormulaParser<'a>,
    patterns: Patterns<'a>,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a RuleRegistry, parser: FormulaParser<'a>) -> Self {
        let patterns = Patterns::new(parser.alphabet());
        Self {
            registry,
            parser,
            patterns,
        }
    }

    /// Parse the texts, then validate
    pub fn validate_text(&self, premises: &[&str], conclusion: &str, rule_id: &str) -> Verdict {
        let explanation = self
            .registry
            .get(rule_id)
            .map(|d| d.explanation.as_str())
            .unwrap_or_default();

        let parsed: Result<Vec<Formula>, _> =
            premises.iter().map(|p| self.parser.parse(p)).collect();
        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return Verdict::fail(rule_id, explanation, Rejection::from_parse_error(&e)),
        };
        let conclusion = match self.parser.parse(conclusion) {
            Ok(conclusion) => conclusion,
            Err(e) => return Verdict::fail(rule_id, explanation, Rejection::from_parse_error(&e)),
        };

        self.validate(&parsed, &conclusion, rule_id)
    }

    pub fn validate(&self, premises: &[Formula], conclusion: &Formula, rule_id: &str) -> Verdict {
        let Some(definition) = self.registry.get(rule_id) else {
            return Verdict::fail(
                rule_id,
                "",
                Rejection::new(FailureReason::UnknownRule, "Unknown inference rule"),
            );
        };

        match definition.kind() {
            RuleKind::Primitive(primitive) => {
                let check = self
                    .check_arity(definition, premises)
                    .and_then(|_| self.check_primitive(primitive, premises, conclusion));
                Verdict::from_check(rule_id, &definition.explanation, check)
            }
            RuleKind::Composite(steps) => {
                let (check, outcomes) = match self.check_arity(definition, premises) {
                    Ok(()) => self.check_composite(steps, premises, conclusion),
                    Err(rejection) => (Err(rejection), Vec::new()),
                };
                Verdict::from_check(rule_id, &definition.explanation, check).with_steps(outcomes)
            }
            RuleKind::Unimplemented => Verdict::fail(
                rule_id,
                &definition.explanation,
                Rejection::new(
                    FailureReason::UnsupportedRule,
                    format!("No technique is known for {}", definition.name),
                ),
            ),
        }
    }

    fn check_arity(&self, definition: &RuleDefinition, premises: &[Formula]) -> Check {
        let expected = definition.arity();
        if premises.len() != expected {
            return Err(Rejection::new(
                FailureReason::ArityMismatch,
                format!(
                    "{} requires exactly {} {}, got {}",
                    definition.name,
                    expected,
                    if expected == 1 { "premise" } else { "premises" },
                    premises.len()
                ),
            ));
        }
        Ok(())
    }

    /// Check a primitive schema, arity aside
    pub fn check_primitive(
        &self,
        primitive: Primitive,
        premises: &[Formula],
        conclusion: &Formula,
    ) -> Check {
        match primitive {
            Primitive::ModusPonens => self.modus_ponens(premises, conclusion),
            Primitive::ModusTollens => self.modus_tollens(premises, conclusion),
            Primitive::HypotheticalSyllogism => self.hypothetical_syllogism(premises, conclusion),
            Primitive::DisjunctiveSyllogism => self.disjunctive_syllogism(premises, conclusion),
            Primitive::Simplification => self.simplification(premises, conclusion),
            Primitive::Addition => self.addition(premises, conclusion),
        }
    }

    // A➡️B, A ⊢ B
    fn modus_ponens(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let a = self.patterns.alphabet();
        let recipe = self.patterns.binary(premises, SymbolKind::Implication);
        let ingredient = self.patterns.fact(premises, SymbolKind::Implication);
        let (Some((_, recipe)), Some(ingredient)) = (recipe, ingredient) else {
            return Err(shape(format!(
                "Could not find recipe{}drink and ingredient pattern",
                a.implication
            )));
        };

        if ingredient.normalized != recipe.left {
            return Err(shape("Available ingredient doesn't match recipe requirement"));
        }
        if conclusion.normalized != recipe.right {
            return Err(mismatch("Served drink doesn't match recipe result"));
        }
        Ok(())
    }

    // A➡️B, ❌B ⊢ ❌A
    fn modus_tollens(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let a = self.patterns.alphabet();
        let recipe = self.patterns.binary(premises, SymbolKind::Implication);
        let refused = self.patterns.refusal(premises, SymbolKind::Implication);
        let (Some((_, recipe)), Some(refused)) = (recipe, refused) else {
            return Err(shape(format!(
                "Could not find recipe{}drink and {}drink pattern",
                a.implication, a.negation
            )));
        };

        if refused != recipe.right {
            return Err(shape("Customer refusal doesn't match expected drink"));
        }
        if conclusion.normalized != self.patterns.negate(&recipe.left) {
            return Err(mismatch("Conclusion doesn't avoid the right ingredient"));
        }
        Ok(())
    }

    // A➡️B, B➡️C ⊢ A➡️C
    fn hypothetical_syllogism(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let a = self.patterns.alphabet();
        let recipes = self.patterns.binaries(premises, SymbolKind::Implication);
        let [(_, first), (_, second)] = recipes.as_slice() else {
            return Err(shape("Both premises must be recipe flows"));
        };
        if !first.is_complete() || !second.is_complete() {
            return Err(shape("Each recipe flow needs an ingredient on both sides"));
        }

        debug!(
            first_left = %first.left,
            first_right = %first.right,
            second_left = %second.left,
            second_right = %second.right,
            "looking for a recipe chain"
        );

        let Some(chain) = self.patterns.chain(first, second) else {
            return Err(Rejection::new(
                FailureReason::ChainMismatch,
                "No valid recipe chain found between the steps",
            ));
        };

        let Some(served) = conclusion.split_at(a, SymbolKind::Implication) else {
            return Err(mismatch("Conclusion must be a recipe flow"));
        };
        if served != chain {
            return Err(mismatch(
                "Conclusion doesn't match expected recipe chain result",
            ));
        }
        Ok(())
    }

    // A🔀B, ❌A ⊢ B
    fn disjunctive_syllogism(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let a = self.patterns.alphabet();
        let choice = self.patterns.binary(premises, SymbolKind::Disjunction);
        let unavailable = self.patterns.refusal(premises, SymbolKind::Disjunction);
        let (Some((_, choice)), Some(unavailable)) = (choice, unavailable) else {
            return Err(shape(format!(
                "Could not find ingredient{}ingredient and {}ingredient pattern",
                a.disjunction, a.negation
            )));
        };

        let expected = if choice.left == unavailable {
            &choice.right
        } else if choice.right == unavailable {
            &choice.left
        } else {
            return Err(shape("Unavailable ingredient doesn't match either choice"));
        };

        if &conclusion.normalized != expected {
            return Err(mismatch("Conclusion doesn't use the available ingredient"));
        }
        Ok(())
    }

    // A🥤B ⊢ A, and equally A🥤B ⊢ B
    fn simplification(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let Some((_, mix)) = self.patterns.binary(premises, SymbolKind::Conjunction) else {
            return Err(shape("Premise must be a mixed drink combination"));
        };

        if conclusion.normalized != mix.left && conclusion.normalized != mix.right {
            return Err(mismatch("Conclusion must be one of the mixed ingredients"));
        }
        Ok(())
    }

    // P, Q ⊢ P🔀Q
    fn addition(&self, premises: &[Formula], conclusion: &Formula) -> Check {
        let [p, q] = premises else {
            return Err(shape("Open Menu needs two things on the counter"));
        };
        let forward = self
            .patterns
            .join(&p.normalized, SymbolKind::Disjunction, &q.normalized);
        let backward = self
            .patterns
            .join(&q.normalized, SymbolKind::Disjunction, &p.normalized);

        if conclusion.normalized != forward && conclusion.normalized != backward {
            return Err(mismatch("The menu must offer exactly the two counter items"));
        }
        Ok(())
    }

    /// Walk the steps in order, each one drawing on the supplied premises and
    /// the results of earlier steps
    fn check_composite(
        &self,
        steps: &[Step],
        premises: &[Formula],
        conclusion: &Formula,
    ) -> (Check, Vec<StepOutcome>) {
        let mut pool: Vec<Formula> = premises.to_vec();
        let mut outcomes = Vec::with_capacity(steps.len());
        let mut last: Option<Formula> = None;

        for (index, step) in steps.iter().enumerate() {
            let number = index + 1;
            let check = self.check_step(number, step, &pool);
            outcomes.push(StepOutcome {
                step: number,
                rule: step.rule,
                premises: step.premises.clone(),
                result: step.result.clone(),
                valid: check.is_ok(),
                error: check.as_ref().err().map(|r| r.reason),
                detail: check.as_ref().err().map(|r| r.detail.clone()),
            });

            match check {
                Ok(result) => {
                    if !pool.contains(&result) {
                        pool.push(result.clone());
                    }
                    last = Some(result);
                }
                Err(rejection) => return (Err(rejection), outcomes),
            }
        }

        let check = match last {
            Some(result) if result == *conclusion => Ok(()),
            Some(result) => Err(mismatch(format!(
                "The chain ends in {}, not {}",
                result, conclusion
            ))),
            None => Err(Rejection::new(
                FailureReason::UnsupportedRule,
                "Composite rule has no steps",
            )),
        };
        (check, outcomes)
    }

    fn check_step(&self, number: usize, step: &Step, pool: &[Formula]) -> Result<Formula, Rejection> {
        let parse = |text: &str| {
            self.parser
                .parse(text)
                .map_err(|e| Rejection::from_parse_error(&e))
        };

        let mut inputs = Vec::with_capacity(step.premises.len());
        for text in &step.premises {
            let premise = parse(text.as_str())?;
            if !pool.contains(&premise) {
                return Err(shape(format!(
                    "Step {} needs {}, which is not available yet",
                    number, premise
                )));
            }
            inputs.push(premise);
        }
        let result = parse(step.result.as_str())?;

        self.check_primitive(step.rule, &inputs, &result)
            .map_err(|r| Rejection::new(r.reason, format!("Step {}: {}", number, r.detail)))?;
        Ok(result)
    }
}
