use crate::alphabet::SymbolKind;
use crate::parser::{Formula, FormulaParser};
use crate::patterns::Patterns;
use crate::registry::{Primitive, RuleDefinition, RuleKind, RuleRegistry};

pub const UNKNOWN_RULE_HINT: &str = "I'm not sure how to help with this recipe.";

/// Writes player guidance for a rule.
///
/// Hints quote the customer's own formulas when they have the shapes the
/// rule looks for, and the rule's example otherwise.
#[derive(Debug, Clone)]
pub struct HintWriter<'a> {
    registry: &'a RuleRegistry,
    parser: FormulaParser<'a>,
    patterns: Patterns<'a>,
}

impl<'a> HintWriter<'a> {
    pub fn new(registry: &'a RuleRegistry, parser: FormulaParser<'a>) -> Self {
        let patterns = Patterns::new(parser.alphabet());
        Self {
            registry,
            parser,
            patterns,
        }
    }

    pub fn hint(&self, rule_id: &str, premises: &[&str], expected: Option<&str>) -> String {
        let Some(definition) = self.registry.get(rule_id) else {
            return UNKNOWN_RULE_HINT.to_string();
        };

        match definition.kind() {
            RuleKind::Primitive(primitive) => {
                let request = self.parse_all(premises);
                let expected = expected.and_then(|e| self.parser.parse(e).ok());
                self.primitive_hint(primitive, &request, expected.as_ref())
                    .or_else(|| {
                        let example = self.parse_example(definition);
                        self.primitive_hint(primitive, &example, None)
                    })
                    .unwrap_or_else(|| definition.explanation.clone())
            }
            RuleKind::Composite(_) => self.plan(definition, expected),
            RuleKind::Unimplemented => definition.explanation.clone(),
        }
    }

    fn parse_all(&self, texts: &[&str]) -> Vec<Formula> {
        texts
            .iter()
            .filter_map(|t| self.parser.parse(t).ok())
            .collect()
    }

    fn parse_example(&self, definition: &RuleDefinition) -> Vec<Formula> {
        definition
            .premises
            .iter()
            .filter_map(|t| self.parser.parse(t).ok())
            .collect()
    }

    fn primitive_hint(
        &self,
        primitive: Primitive,
        premises: &[Formula],
        expected: Option<&Formula>,
    ) -> Option<String> {
        let a = self.patterns.alphabet();
        match primitive {
            Primitive::ModusPonens => {
                let (recipe, parts) = self.patterns.binary(premises, SymbolKind::Implication)?;
                Some(format!(
                    "Look for a recipe flow ({}) and its starting ingredient. If you have {} and {}, you can serve {}.",
                    a.implication, recipe, parts.left, parts.right
                ))
            }
            Primitive::ModusTollens => {
                let (recipe, parts) = self.patterns.binary(premises, SymbolKind::Implication)?;
                Some(format!(
                    "Look for a recipe flow ({}) and customer refusing the result. If you have {} and {}, don't use {}.",
                    a.implication,
                    recipe,
                    self.patterns.negate(&parts.right),
                    parts.left
                ))
            }
            Primitive::HypotheticalSyllogism => {
                let recipes = self.patterns.binaries(premises, SymbolKind::Implication);
                let [(first, head), (second, tail), ..] = recipes.as_slice() else {
                    return None;
                };
                let chain = self.patterns.chain(head, tail)?;
                Some(format!(
                    "Look for two recipe flows that chain together. If you have {} and {}, you get {}.",
                    first,
                    second,
                    self.patterns
                        .join(&chain.left, SymbolKind::Implication, &chain.right)
                ))
            }
            Primitive::DisjunctiveSyllogism => {
                let (choice, parts) = self.patterns.binary(premises, SymbolKind::Disjunction)?;
                let (gone, left_over) =
                    match self.patterns.refusal(premises, SymbolKind::Disjunction) {
                        Some(refused) if refused == parts.right => (parts.right, parts.left),
                        _ => (parts.left, parts.right),
                    };
                Some(format!(
                    "Look for an ingredient choice ({}) and one being unavailable. If you have {} and {}, use {}.",
                    a.disjunction,
                    choice,
                    self.patterns.negate(&gone),
                    left_over
                ))
            }
            Primitive::Simplification => {
                let (mix, _) = self.patterns.binary(premises, SymbolKind::Conjunction)?;
                Some(format!(
                    "Look for a mixed drink ({}). You can serve either ingredient from {}.",
                    a.conjunction, mix
                ))
            }
            Primitive::Addition => {
                let [p, q, ..] = premises else {
                    return None;
                };
                let offer = expected.map(Formula::to_string).unwrap_or_else(|| {
                    self.patterns
                        .join(&p.normalized, SymbolKind::Disjunction, &q.normalized)
                });
                Some(format!(
                    "Put what you have on the menu ({}). From {} and {}, you can offer {}.",
                    a.disjunction, p, q, offer
                ))
            }
        }
    }

    // Composite rules: the explanation, then one clause per step
    fn plan(&self, definition: &RuleDefinition, expected: Option<&str>) -> String {
        let steps: Vec<String> = definition
            .steps
            .iter()
            .map(|step| {
                let name = self
                    .registry
                    .get(step.rule.key())
                    .map(|d| d.name.as_str())
                    .unwrap_or(step.rule.key());
                format!("{} on {} gives {}", name, step.premises.join(" and "), step.result)
            })
            .collect();

        let goal = expected.unwrap_or(&definition.conclusion);
        format!(
            "{}. Work it in {} steps to reach {}: {}.",
            definition.explanation.trim_end_matches('.'),
            steps.len(),
            goal,
            steps.join(", then ")
        )
    }
}
