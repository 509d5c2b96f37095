use crate::alphabet::SymbolKind;
use crate::parser::Formula;
use crate::patterns::Patterns;
use crate::registry::{Primitive, RuleKind, RuleRegistry};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Inventory-mode rule application.
///
/// Uses the same premise classification as the strict validator but
/// produces the derived formula instead of checking a proposed one. There is
/// no arity check: a selection may carry formulas the rule ignores.
#[derive(Debug, Clone)]
pub struct RuleApplier<'a> {
    registry: &'a RuleRegistry,
    patterns: Patterns<'a>,
}

impl<'a> RuleApplier<'a> {
    pub(crate) fn new(registry: &'a RuleRegistry, patterns: Patterns<'a>) -> Self {
        Self { registry, patterns }
    }

    /// Derive one formula from `selected` with the rule named `rule_id`.
    ///
    /// `None` when nothing is selected, when the selection does not fit the
    /// rule, or when the rule is not a primitive. Composite puzzles are
    /// solved one primitive at a time.
    pub fn apply(&self, rule_id: &str, selected: &[Formula]) -> Option<Formula> {
        if selected.is_empty() {
            return None;
        }
        let definition = self.registry.get(rule_id)?;
        match definition.kind() {
            RuleKind::Primitive(primitive) => self.apply_primitive(primitive, selected),
            RuleKind::Composite(_) | RuleKind::Unimplemented => {
                debug!(rule = rule_id, "rule cannot be applied in a single step");
                None
            }
        }
    }

    pub fn apply_primitive(&self, primitive: Primitive, selected: &[Formula]) -> Option<Formula> {
        let derived = match primitive {
            Primitive::ModusPonens => self.modus_ponens(selected),
            Primitive::ModusTollens => self.modus_tollens(selected),
            Primitive::HypotheticalSyllogism => self.hypothetical_syllogism(selected),
            Primitive::DisjunctiveSyllogism => self.disjunctive_syllogism(selected),
            Primitive::Simplification => self.simplification(selected),
            Primitive::Addition => self.addition(selected),
        }?;
        self.formula(&derived)
    }

    fn modus_ponens(&self, selected: &[Formula]) -> Option<String> {
        let (_, recipe) = self.patterns.binary(selected, SymbolKind::Implication)?;
        let ingredient = self.patterns.fact(selected, SymbolKind::Implication)?;
        (ingredient.normalized == recipe.left).then_some(recipe.right)
    }

    fn modus_tollens(&self, selected: &[Formula]) -> Option<String> {
        let (_, recipe) = self.patterns.binary(selected, SymbolKind::Implication)?;
        let refused = self.patterns.refusal(selected, SymbolKind::Implication)?;
        (refused == recipe.right).then(|| self.patterns.negate(&recipe.left))
    }

    // First pair of implications that links up, in selection order
    fn hypothetical_syllogism(&self, selected: &[Formula]) -> Option<String> {
        let recipes = self.patterns.binaries(selected, SymbolKind::Implication);
        recipes.iter().enumerate().find_map(|(i, (_, first))| {
            recipes[i + 1..].iter().find_map(|(_, second)| {
                self.patterns.chain(first, second).map(|chain| {
                    self.patterns
                        .join(&chain.left, SymbolKind::Implication, &chain.right)
                })
            })
        })
    }

    fn disjunctive_syllogism(&self, selected: &[Formula]) -> Option<String> {
        let (_, choice) = self.patterns.binary(selected, SymbolKind::Disjunction)?;
        let unavailable = self.patterns.refusal(selected, SymbolKind::Disjunction)?;
        if choice.left == unavailable {
            Some(choice.right)
        } else if choice.right == unavailable {
            Some(choice.left)
        } else {
            None
        }
    }

    // Left conjunct, unless the selection already holds it or refuses it
    fn simplification(&self, selected: &[Formula]) -> Option<String> {
        let (mix, parts) = self.patterns.binary(selected, SymbolKind::Conjunction)?;
        let left_ruled_out = selected.iter().filter(|s| *s != mix).any(|s| {
            s.normalized == parts.left
                || s.negated_proposition(self.patterns.alphabet()) == Some(parts.left.as_str())
        });
        if left_ruled_out {
            Some(parts.right)
        } else {
            Some(parts.left)
        }
    }

    fn addition(&self, selected: &[Formula]) -> Option<String> {
        let [first, second, ..] = selected else {
            return None;
        };
        Some(
            self.patterns
                .join(&first.normalized, SymbolKind::Disjunction, &second.normalized),
        )
    }

    // Rebuild a formula from derived text; empty sides (`➡️🍓` splits to "") yield nothing
    fn formula(&self, text: &str) -> Option<Formula> {
        let tokens: Vec<String> = text.graphemes(true).map(str::to_string).collect();
        (!tokens.is_empty()).then(|| Formula::from_tokens(tokens))
    }
}
