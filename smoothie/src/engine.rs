use crate::applier::RuleApplier;
use crate::config::{EngineConfig, StrategyMode};
use crate::derivation::{ApplyOutcome, Derivation};
use crate::error::SmoothieError;
use crate::hints::HintWriter;
use crate::parser::{Formula, FormulaParser};
use crate::patterns::Patterns;
use crate::registry::{Primitive, RuleKind, RuleRegistry};
use crate::strategy::{Attempt, CustomerRequest, InventoryStrategy, StrictStrategy, Strategy};
use crate::validator::Validator;
use crate::verdict::Verdict;
use crate::SmoothieResult;
use tracing::debug;

/// The smoothie shop inference engine.
///
/// Holds the alphabet, the rule table and the judging strategy. It never
/// changes after construction, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    registry: RuleRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration and the built-in rules
    pub fn with_config(config: EngineConfig) -> SmoothieResult<Self> {
        Self::with_registry(config, RuleRegistry::default())
    }

    pub fn with_registry(config: EngineConfig, registry: RuleRegistry) -> SmoothieResult<Self> {
        config.check()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn parser(&self) -> FormulaParser<'_> {
        FormulaParser::new(
            &self.config.alphabet,
            self.config.parse_mode,
            self.config.max_formula_bytes,
        )
    }

    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.registry, self.parser())
    }

    pub fn applier(&self) -> RuleApplier<'_> {
        RuleApplier::new(&self.registry, Patterns::new(&self.config.alphabet))
    }

    pub fn hints(&self) -> HintWriter<'_> {
        HintWriter::new(&self.registry, self.parser())
    }

    /// The judging strategy the configuration selects
    pub fn strategy(&self) -> Box<dyn Strategy + '_> {
        match self.config.strategy {
            StrategyMode::Strict => Box::new(StrictStrategy::new(self.validator())),
            StrategyMode::Inventory => {
                Box::new(InventoryStrategy::new(&self.registry, self.parser()))
            }
        }
    }

    pub fn parse_formula(&self, text: &str) -> SmoothieResult<Formula> {
        self.parser().parse(text)
    }

    /// Check `conclusion` against the schema of `rule_id`
    pub fn validate_inference(&self, premises: &[&str], conclusion: &str, rule_id: &str) -> Verdict {
        self.validator().validate_text(premises, conclusion, rule_id)
    }

    /// Derive one formula from the selected formulas; `None` when the rule
    /// does not fit or any selected text fails to parse
    pub fn apply_rule(&self, rule_id: &str, selected: &[&str]) -> Option<String> {
        let parser = self.parser();
        let formulas: Vec<Formula> = selected
            .iter()
            .map(|s| parser.parse(s))
            .collect::<Result<_, _>>()
            .ok()?;
        self.applier()
            .apply(rule_id, &formulas)
            .map(|f| f.normalized)
    }

    /// Apply `rule_id` to a derivation's current selection
    pub fn apply_to(&self, derivation: &mut Derivation, rule_id: &str) -> ApplyOutcome {
        let applier = self.applier();
        let outcome = derivation.apply_with(|selected| applier.apply(rule_id, selected));
        debug!(rule = rule_id, ?outcome, "applied rule to selection");
        outcome
    }

    /// Name the first primitive rule under which the inference is valid.
    ///
    /// Tries modus ponens, modus tollens, hypothetical syllogism, disjunctive
    /// syllogism and simplification, in that order. Each is looked up by its
    /// schema, not its id; techniques missing from the registry are skipped.
    pub fn identify_rule(&self, premises: &[&str], conclusion: &str) -> Option<String> {
        let validator = self.validator();
        Primitive::IDENTIFY_ORDER
            .iter()
            .filter_map(|primitive| {
                self.registry.iter().find(
                    |d| matches!(d.kind(), RuleKind::Primitive(p) if p == *primitive),
                )
            })
            .find(|d| validator.validate_text(premises, conclusion, &d.id).valid)
            .map(|d| d.id.clone())
    }

    pub fn generate_hint(&self, rule_id: &str, premises: &[&str], expected: Option<&str>) -> String {
        self.hints().hint(rule_id, premises, expected)
    }

    /// The customer request a rule's example describes
    pub fn request_for(&self, rule_id: &str) -> SmoothieResult<CustomerRequest> {
        self.registry
            .get(rule_id)
            .map(CustomerRequest::from_definition)
            .ok_or_else(|| SmoothieError::UnknownRule(rule_id.to_string()))
    }

    /// A fresh inventory holding the request's premises
    pub fn start_derivation(&self, request: &CustomerRequest) -> SmoothieResult<Derivation> {
        let parser = self.parser();
        let premises = request
            .premises
            .iter()
            .map(|p| parser.parse(p))
            .collect::<SmoothieResult<Vec<_>>>()?;
        Ok(Derivation::from_premises(premises))
    }

    /// Judge a served attempt with the configured strategy
    pub fn serve(&self, request: &CustomerRequest, attempt: Attempt<'_>) -> SmoothieResult<Verdict> {
        self.strategy().serve(request, attempt)
    }
}
