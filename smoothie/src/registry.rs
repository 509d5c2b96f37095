use crate::error::SmoothieError;
use crate::SmoothieResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The base inference schemas the engine knows how to check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    ModusPonens,
    ModusTollens,
    HypotheticalSyllogism,
    DisjunctiveSyllogism,
    Simplification,
    Addition,
}

impl Primitive {
    /// Order in which `identify_rule` tries the rules
    pub const IDENTIFY_ORDER: [Primitive; 5] = [
        Primitive::ModusPonens,
        Primitive::ModusTollens,
        Primitive::HypotheticalSyllogism,
        Primitive::DisjunctiveSyllogism,
        Primitive::Simplification,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Primitive::ModusPonens => "modusPonens",
            Primitive::ModusTollens => "modusTollens",
            Primitive::HypotheticalSyllogism => "hypotheticalSyllogism",
            Primitive::DisjunctiveSyllogism => "disjunctiveSyllogism",
            Primitive::Simplification => "simplification",
            Primitive::Addition => "addition",
        }
    }

    /// Exact number of premises the schema consumes
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Simplification => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Primitive {
    type Err = SmoothieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modusPonens" => Ok(Primitive::ModusPonens),
            "modusTollens" => Ok(Primitive::ModusTollens),
            "hypotheticalSyllogism" => Ok(Primitive::HypotheticalSyllogism),
            "disjunctiveSyllogism" => Ok(Primitive::DisjunctiveSyllogism),
            "simplification" => Ok(Primitive::Simplification),
            "addition" => Ok(Primitive::Addition),
            _ => Err(SmoothieError::UnknownRule(s.to_string())),
        }
    }
}

/// One primitive application inside a composite rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub rule: Primitive,
    pub premises: Vec<String>,
    pub result: String,
}

/// Static metadata for one rule, as a customer request would present it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub explanation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Example request premises
    #[serde(default)]
    pub premises: Vec<String>,
    /// Example request target
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<Primitive>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

fn default_difficulty() -> u8 {
    1
}

/// How a definition is checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind<'a> {
    Primitive(Primitive),
    Composite(&'a [Step]),
    /// Known to the table, but with no schema to check against
    Unimplemented,
}

impl RuleDefinition {
    pub fn kind(&self) -> RuleKind<'_> {
        match (self.primitive, self.steps.is_empty()) {
            (Some(primitive), _) => RuleKind::Primitive(primitive),
            (None, false) => RuleKind::Composite(&self.steps),
            (None, true) => RuleKind::Unimplemented,
        }
    }

    pub fn arity(&self) -> usize {
        match self.kind() {
            RuleKind::Primitive(primitive) => primitive.arity(),
            RuleKind::Composite(_) | RuleKind::Unimplemented => self.premises.len(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind(), RuleKind::Composite(_))
    }

    fn check(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("rule with an empty id".to_string());
        }
        if self.primitive.is_some() && !self.steps.is_empty() {
            return Err(format!(
                "rule '{}' declares both a primitive schema and steps",
                self.id
            ));
        }
        if let Some(primitive) = self.primitive {
            if !self.premises.is_empty() && self.premises.len() != primitive.arity() {
                return Err(format!(
                    "rule '{}' is {} which takes {} premises, but its example has {}",
                    self.id,
                    primitive,
                    primitive.arity(),
                    self.premises.len()
                ));
            }
        }
        if self.is_composite() {
            self.check_chain()?;
        }
        Ok(())
    }

    fn check_chain(&self) -> Result<(), String> {
        if self.premises.is_empty() {
            return Err(format!("composite rule '{}' has no premises", self.id));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.premises.len() != step.rule.arity() {
                return Err(format!(
                    "step {} of '{}' gives {} {} premises, it takes {}",
                    i + 1,
                    self.id,
                    step.rule,
                    step.premises.len(),
                    step.rule.arity()
                ));
            }
            if let Some(next) = self.steps.get(i + 1) {
                let result = compact(&step.result);
                if !next.premises.iter().any(|p| compact(p) == result) {
                    return Err(format!(
                        "step {} of '{}' produces '{}', which step {} never uses",
                        i + 1,
                        self.id,
                        step.result,
                        i + 2
                    ));
                }
            }
        }
        let last = self.steps.last().map(|s| s.result.as_str());
        if last.map(compact) != Some(compact(&self.conclusion)) {
            return Err(format!(
                "composite rule '{}' ends in '{}' but its conclusion is '{}'",
                self.id,
                last.unwrap_or_default(),
                self.conclusion
            ));
        }
        Ok(())
    }
}

/// Read-only lookup from rule id to definition.
///
/// Built once and shared by the validator, the applier and the hints.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    definitions: Vec<RuleDefinition>,
    index: HashMap<String, usize>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new(default_definitions()).unwrap_or_else(|e| {
            warn!("built-in rule table rejected: {}", e);
            Self {
                definitions: Vec::new(),
                index: HashMap::new(),
            }
        })
    }
}

impl RuleRegistry {
    pub fn new(definitions: Vec<RuleDefinition>) -> SmoothieResult<Self> {
        let mut index = HashMap::new();
        for (i, definition) in definitions.iter().enumerate() {
            definition.check().map_err(SmoothieError::InvalidRegistry)?;
            if index.insert(definition.id.clone(), i).is_some() {
                return Err(SmoothieError::InvalidRegistry(format!(
                    "rule '{}' is defined twice",
                    definition.id
                )));
            }
            if definition.kind() == RuleKind::Unimplemented {
                warn!(rule = %definition.id, "rule has neither a primitive schema nor steps");
            }
        }
        Ok(Self { definitions, index })
    }

    /// Load a table from a JSON array of definitions
    pub fn from_json(json: &str) -> SmoothieResult<Self> {
        let definitions: Vec<RuleDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    pub fn to_json(&self) -> SmoothieResult<String> {
        Ok(serde_json::to_string_pretty(&self.definitions)?)
    }

    pub fn get(&self, id: &str) -> Option<&RuleDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Rule ids in declaration order
    pub fn ids(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Rules a player at `difficulty` may be asked for
    pub fn up_to_difficulty(&self, difficulty: u8) -> Vec<&RuleDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.difficulty <= difficulty)
            .collect()
    }
}

// Table text is compared as it parses, whitespace aside
fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn primitive(
    rule: Primitive,
    name: &str,
    description: &str,
    explanation: &str,
    difficulty: u8,
    premises: &[&str],
    conclusion: &str,
    context: &str,
) -> RuleDefinition {
    RuleDefinition {
        id: rule.key().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        explanation: explanation.to_string(),
        difficulty,
        premises: strings(premises),
        conclusion: conclusion.to_string(),
        context: context.to_string(),
        primitive: Some(rule),
        steps: Vec::new(),
    }
}

fn step(rule: Primitive, premises: &[&str], result: &str) -> Step {
    Step {
        rule,
        premises: strings(premises),
        result: result.to_string(),
    }
}

/// The shop's standard recipe book
pub fn default_definitions() -> Vec<RuleDefinition> {
    vec![
        primitive(
            Primitive::ModusPonens,
            "Classic Recipe",
            "If the recipe calls for ingredient A leading to drink B, and you have A, then serve B",
            "From 🍋➡️🍓 recipe and having 🍋, we serve 🍓",
            1,
            &["🍋➡️🍓", "🍋"],
            "🍓",
            "Recipe says: If you use lemon, then add strawberry. You have lemon available. Therefore, add strawberry to the smoothie.",
        ),
        primitive(
            Primitive::ModusTollens,
            "Reverse Logic",
            "If the recipe calls for A leading to B, but customer doesn't want B, then don't use A",
            "From 🍋➡️🍓 recipe and customer refusing 🍓, we don't use 🍋",
            2,
            &["🍋➡️🍓", "❌🍓"],
            "❌🍋",
            "Recipe says: If you use lemon, then add strawberry. Customer doesn't want strawberry. Therefore, don't use lemon.",
        ),
        primitive(
            Primitive::HypotheticalSyllogism,
            "Recipe Chain",
            "If A leads to B, and B leads to C, then A leads directly to C",
            "From 🍋➡️🍓 and 🍓➡️🥝, we get 🍋➡️🥝",
            3,
            &["🍋➡️🍓", "🍓➡️🥝"],
            "🍋➡️🥝",
            "Recipe says: Lemon leads to strawberry, and strawberry leads to kiwi. Therefore, lemon leads directly to kiwi.",
        ),
        primitive(
            Primitive::DisjunctiveSyllogism,
            "Either-Or Choice",
            "If you can use either A or B, and A is unavailable, then use B",
            "From 🍋🔀🍓 choice and no 🍋 available, we use 🍓",
            2,
            &["🍋🔀🍓", "❌🍋"],
            "🍓",
            "Recipe allows either lemon or strawberry. Lemon is not available. Therefore, use strawberry.",
        ),
        primitive(
            Primitive::Simplification,
            "Ingredient Split",
            "If the recipe combines A and B together, you can use just A alone",
            "From 🍋🥤🍓 mixed together, we can serve just 🍋",
            1,
            &["🍋🥤🍓"],
            "🍋",
            "Recipe combines lemon and strawberry together. You can serve just the lemon part.",
        ),
        primitive(
            Primitive::Addition,
            "Open Menu",
            "If you have A and B on the counter, you can offer A or B",
            "From 🍋 and 🍓 on the counter, we can offer 🍋🔀🍓",
            2,
            &["🍋", "🍓"],
            "🍋🔀🍓",
            "Both lemon and strawberry are ready. The menu can offer lemon or strawberry.",
        ),
        RuleDefinition {
            id: "chainedModusPonens".to_string(),
            name: "Double Recipe Chain".to_string(),
            description: "Follow two recipe steps in sequence to reach the final ingredient"
                .to_string(),
            explanation: "From 🍋➡️🍓, 🍓➡️🥝, and having 🍋, we can serve 🥝".to_string(),
            difficulty: 4,
            premises: strings(&["🍋➡️🍓", "🍓➡️🥝", "🍋"]),
            conclusion: "🥝".to_string(),
            context: "Recipe chain: Lemon makes strawberry, strawberry makes kiwi. You have lemon. Follow the chain to make kiwi.".to_string(),
            primitive: None,
            steps: vec![
                step(Primitive::ModusPonens, &["🍋➡️🍓", "🍋"], "🍓"),
                step(Primitive::ModusPonens, &["🍓➡️🥝", "🍓"], "🥝"),
            ],
        },
        RuleDefinition {
            id: "complexDisjunction".to_string(),
            name: "Choice Elimination Chain".to_string(),
            description: "Eliminate choices step by step to find the right ingredient"
                .to_string(),
            explanation: "From 🍋➡️🍓 and no 🍓, we rule out 🍋; from 🍋🔀🥝, we then choose 🥝"
                .to_string(),
            difficulty: 4,
            premises: strings(&["🍋🔀🥝", "🍋➡️🍓", "❌🍓"]),
            conclusion: "🥝".to_string(),
            context: "Customer wants either lemon or kiwi. Lemon always brings strawberry, and strawberry is out. Work through the choices.".to_string(),
            primitive: None,
            steps: vec![
                step(Primitive::ModusTollens, &["🍋➡️🍓", "❌🍓"], "❌🍋"),
                step(Primitive::DisjunctiveSyllogism, &["🍋🔀🥝", "❌🍋"], "🥝"),
            ],
        },
        RuleDefinition {
            id: "mixedLogicChain".to_string(),
            name: "Mixed Logic Challenge".to_string(),
            description: "Combine different logical techniques to solve the recipe".to_string(),
            explanation:
                "From 🍋🥤🍓 mix, 🍓➡️🥝 recipe, and no 🍋, we extract 🍓 then make 🥝"
                    .to_string(),
            difficulty: 4,
            premises: strings(&["🍋🥤🍓", "🍓➡️🥝", "❌🍋"]),
            conclusion: "🥝".to_string(),
            context: "You have a lemon-strawberry mix, strawberry leads to kiwi, but lemon is spoiled. Extract strawberry from the mix and follow the recipe.".to_string(),
            primitive: None,
            steps: vec![
                step(Primitive::Simplification, &["🍋🥤🍓"], "🍓"),
                step(Primitive::ModusPonens, &["🍓➡️🥝", "🍓"], "🥝"),
            ],
        },
    ]
}
