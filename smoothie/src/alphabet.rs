use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// What a single token means under a given [`Alphabet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Proposition,
    Implication,
    Disjunction,
    Conjunction,
    Negation,
    /// Declared operator with no inference semantics
    Auxiliary,
    Unknown,
}

impl SymbolKind {
    pub fn is_known(&self) -> bool {
        !matches!(self, SymbolKind::Unknown)
    }

    pub fn is_connective(&self) -> bool {
        matches!(
            self,
            SymbolKind::Implication | SymbolKind::Disjunction | SymbolKind::Conjunction
        )
    }
}

/// The closed symbol set a game is played with.
///
/// Every symbol is one user-perceived character; several of the default
/// emoji span more than one code point (`➡️` is U+27A1 followed by the
/// variation selector U+FE0F).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alphabet {
    pub propositions: Vec<String>,
    pub implication: String,
    pub disjunction: String,
    pub conjunction: String,
    pub negation: String,
    pub auxiliary: Vec<String>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            propositions: vec!["🍋".to_string(), "🍓".to_string(), "🥝".to_string()],
            implication: "➡️".to_string(),
            disjunction: "🔀".to_string(),
            conjunction: "🥤".to_string(),
            negation: "❌".to_string(),
            auxiliary: vec!["🫙".to_string(), "🍸".to_string()],
        }
    }
}

impl Alphabet {
    pub fn classify(&self, token: &str) -> SymbolKind {
        if token == self.implication {
            SymbolKind::Implication
        } else if token == self.disjunction {
            SymbolKind::Disjunction
        } else if token == self.conjunction {
            SymbolKind::Conjunction
        } else if token == self.negation {
            SymbolKind::Negation
        } else if self.propositions.iter().any(|p| p == token) {
            SymbolKind::Proposition
        } else if self.auxiliary.iter().any(|a| a == token) {
            SymbolKind::Auxiliary
        } else {
            SymbolKind::Unknown
        }
    }

    pub fn is_proposition(&self, token: &str) -> bool {
        self.classify(token) == SymbolKind::Proposition
    }

    /// The token that stands for `kind`, for the four fixed connectives
    pub fn symbol(&self, kind: SymbolKind) -> Option<&str> {
        match kind {
            SymbolKind::Implication => Some(self.implication.as_str()),
            SymbolKind::Disjunction => Some(self.disjunction.as_str()),
            SymbolKind::Conjunction => Some(self.conjunction.as_str()),
            SymbolKind::Negation => Some(self.negation.as_str()),
            _ => None,
        }
    }

    /// Every legal symbol, operators first
    pub fn symbols(&self) -> Vec<&str> {
        let mut all = vec![
            self.implication.as_str(),
            self.disjunction.as_str(),
            self.conjunction.as_str(),
            self.negation.as_str(),
        ];
        all.extend(self.auxiliary.iter().map(String::as_str));
        all.extend(self.propositions.iter().map(String::as_str));
        all
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        let all = self.symbols();
        if self.propositions.is_empty() {
            return Err("alphabet declares no propositions".to_string());
        }
        for (i, symbol) in all.iter().enumerate() {
            if symbol.trim().is_empty() {
                return Err("alphabet contains an empty symbol".to_string());
            }
            if symbol.graphemes(true).count() != 1 {
                return Err(format!(
                    "symbol '{}' is not a single character; formulas could not be split back into it",
                    symbol
                ));
            }
            if all[..i].contains(symbol) {
                return Err(format!("symbol '{}' is declared twice", symbol));
            }
        }
        Ok(())
    }
}
