use crate::alphabet::Alphabet;
use crate::error::SmoothieError;
use crate::SmoothieResult;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FORMULA_BYTES: usize = 1024;

/// How the parser treats tokens outside the alphabet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Keep every token; the rule that consumes the formula decides
    #[default]
    Lenient,
    /// Reject unknown tokens at parse time
    Strict,
}

/// Which of the two judging strategies a session plays with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    /// The player proposes one conclusion, checked against the rule's schema
    #[default]
    Strict,
    /// The player grows an inventory step by step; serving checks membership
    Inventory,
}

impl StrategyMode {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyMode::Strict => "strict",
            StrategyMode::Inventory => "inventory",
        }
    }
}

/// Static configuration handed to the engine at construction.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub alphabet: Alphabet,
    pub parse_mode: ParseMode,
    pub strategy: StrategyMode,
    /// Largest formula text accepted, in bytes.
    /// Real formulas are a few dozen bytes.
    pub max_formula_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            parse_mode: ParseMode::default(),
            strategy: StrategyMode::default(),
            max_formula_bytes: DEFAULT_MAX_FORMULA_BYTES,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> SmoothieResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyMode) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub(crate) fn check(&self) -> SmoothieResult<()> {
        self.alphabet.check().map_err(SmoothieError::InvalidConfig)?;
        if self.max_formula_bytes == 0 {
            return Err(SmoothieError::InvalidConfig(
                "maxFormulaBytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
