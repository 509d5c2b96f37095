use crate::alphabet::Alphabet;
use crate::config::ParseMode;
use crate::error::{SmoothieError, Span};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

pub mod formula;

pub use formula::{Binary, Formula};

/// Formula parser bound to one alphabet.
///
/// Parsing only tokenizes: whitespace is dropped and the rest is split into
/// user-perceived characters. Whether the tokens form a sensible formula is
/// decided later by the rule that consumes them.
#[derive(Debug, Clone)]
pub struct FormulaParser<'a> {
    alphabet: &'a Alphabet,
    mode: ParseMode,
    max_bytes: usize,
}

impl<'a> FormulaParser<'a> {
    pub fn new(alphabet: &'a Alphabet, mode: ParseMode, max_bytes: usize) -> Self {
        Self {
            alphabet,
            mode,
            max_bytes,
        }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn parse(&self, source: &str) -> Result<Formula, SmoothieError> {
        if source.len() > self.max_bytes {
            return Err(SmoothieError::ResourceLimitExceeded {
                limit_name: "max_formula_bytes".to_string(),
                limit_value: format!("{} bytes", self.max_bytes),
                actual_value: format!("{} bytes", source.len()),
            });
        }

        // origin[i] is the source offset of byte i of the stripped text
        let mut stripped = String::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        for (offset, c) in source.char_indices().filter(|(_, c)| !c.is_whitespace()) {
            stripped.push(c);
            origin.extend(offset..offset + c.len_utf8());
        }

        let mut tokens = Vec::new();
        for (start, grapheme) in stripped.grapheme_indices(true) {
            if self.mode == ParseMode::Strict && !self.alphabet.classify(grapheme).is_known() {
                let end = start + grapheme.len();
                return Err(SmoothieError::UnknownSymbol {
                    symbol: grapheme.to_string(),
                    span: Span::new(origin[start], origin[end - 1] + 1),
                    source_text: source.to_string(),
                });
            }
            tokens.push(grapheme.to_string());
        }

        if tokens.is_empty() {
            return Err(SmoothieError::EmptyFormula);
        }

        debug!(source, ?tokens, "parsed formula");

        let normalized = formula::normalize(&tokens);
        Ok(Formula {
            source: source.to_string(),
            tokens,
            normalized,
        })
    }
}

/// Parse with the default alphabet, leniently
pub fn parse(source: &str) -> Result<Formula, SmoothieError> {
    let alphabet = Alphabet::default();
    FormulaParser::new(
        &alphabet,
        ParseMode::Lenient,
        crate::config::DEFAULT_MAX_FORMULA_BYTES,
    )
    .parse(source)
}
