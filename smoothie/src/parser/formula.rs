use crate::alphabet::{Alphabet, SymbolKind};
use serde::Serialize;
use std::fmt;

/// A parsed formula: the text it came from, its symbols, and the string
/// used to compare it against other formulas.
///
/// Equality is syntactic. `🍋🔀🍓` and `🍓🔀🍋` are different formulas.
#[derive(Debug, Clone, Serialize)]
pub struct Formula {
    pub source: String,
    pub tokens: Vec<String>,
    pub normalized: String,
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Formula {}

impl std::hash::Hash for Formula {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl Formula {
    /// Build a formula straight from tokens the caller already trusts
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let normalized = normalize(&tokens);
        Self {
            source: normalized.clone(),
            tokens,
            normalized,
        }
    }

    /// Join two sides around a connective, as a rule conclusion would be written
    pub fn join(left: &str, connective: &str, right: &str) -> String {
        format!("{}{}{}", left, connective, right)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.tokens.iter().any(|t| t == symbol)
    }

    pub fn contains_kind(&self, alphabet: &Alphabet, kind: SymbolKind) -> bool {
        alphabet
            .symbol(kind)
            .map(|symbol| self.contains(symbol))
            .unwrap_or(false)
    }

    /// Split around the first occurrence of `kind`'s connective.
    ///
    /// Either side may be empty (`➡️🍓` splits into `""` and `"🍓"`).
    pub fn split_at(&self, alphabet: &Alphabet, kind: SymbolKind) -> Option<Binary> {
        let symbol = alphabet.symbol(kind)?;
        let index = self.tokens.iter().position(|t| t == symbol)?;
        Some(Binary {
            left: normalize(&self.tokens[..index]),
            right: normalize(&self.tokens[index + 1..]),
        })
    }

    /// A lone proposition such as `🍋`
    pub fn is_single_proposition(&self, alphabet: &Alphabet) -> bool {
        self.tokens.len() == 1 && alphabet.is_proposition(&self.tokens[0])
    }

    /// The proposition behind a two-symbol negation such as `❌🍋`
    pub fn negated_proposition(&self, alphabet: &Alphabet) -> Option<&str> {
        match self.tokens.as_slice() {
            [marker, inner]
                if alphabet.classify(marker) == SymbolKind::Negation
                    && alphabet.is_proposition(inner) =>
            {
                Some(inner.as_str())
            }
            _ => None,
        }
    }
}

/// The two sides of a binary formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub left: String,
    pub right: String,
}

impl Binary {
    /// Both sides hold something; `➡️🍓` and `🍋➡️` do not
    pub fn is_complete(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }
}

pub(crate) fn normalize<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(AsRef::as_ref).collect()
}
