//! Premise classification shared by the validator and the applier.
//!
//! Every lookup scans premises in the order given and takes the first
//! formula that fits. When two premises fit the same shape, the later one is
//! never looked at.

use crate::alphabet::{Alphabet, SymbolKind};
use crate::parser::{Binary, Formula};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Patterns<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Patterns<'a> {
    pub(crate) fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    pub(crate) fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// First premise holding `kind`, split around it. A premise with an empty
    /// side does not count as the shape.
    pub(crate) fn binary<'p>(
        &self,
        premises: &'p [Formula],
        kind: SymbolKind,
    ) -> Option<(&'p Formula, Binary)> {
        premises
            .iter()
            .find_map(|p| p.split_at(self.alphabet, kind).map(|parts| (p, parts)))
            .filter(|(_, parts)| parts.is_complete())
    }

    /// Every premise holding `kind`, in order, empty sides included
    pub(crate) fn binaries<'p>(
        &self,
        premises: &'p [Formula],
        kind: SymbolKind,
    ) -> Vec<(&'p Formula, Binary)> {
        premises
            .iter()
            .filter_map(|p| p.split_at(self.alphabet, kind).map(|parts| (p, parts)))
            .collect()
    }

    /// First lone proposition among the premises that do not hold `besides`
    pub(crate) fn fact<'p>(
        &self,
        premises: &'p [Formula],
        besides: SymbolKind,
    ) -> Option<&'p Formula> {
        premises.iter().find(|p| {
            !p.contains_kind(self.alphabet, besides) && p.is_single_proposition(self.alphabet)
        })
    }

    /// First `❌X` among the premises that do not hold `besides`; yields `X`
    pub(crate) fn refusal<'p>(
        &self,
        premises: &'p [Formula],
        besides: SymbolKind,
    ) -> Option<&'p str> {
        premises
            .iter()
            .filter(|p| !p.contains_kind(self.alphabet, besides))
            .find_map(|p| p.negated_proposition(self.alphabet))
    }

    /// Link two implications into one, trying `first` then `second` as the head
    pub(crate) fn chain(&self, first: &Binary, second: &Binary) -> Option<Binary> {
        if !first.is_complete() || !second.is_complete() {
            return None;
        }
        if first.right == second.left {
            Some(Binary {
                left: first.left.clone(),
                right: second.right.clone(),
            })
        } else if second.right == first.left {
            Some(Binary {
                left: second.left.clone(),
                right: first.right.clone(),
            })
        } else {
            None
        }
    }

    pub(crate) fn negate(&self, text: &str) -> String {
        format!("{}{}", self.alphabet.negation, text)
    }

    pub(crate) fn join(&self, left: &str, kind: SymbolKind, right: &str) -> String {
        let connective = self.alphabet.symbol(kind).unwrap_or_default();
        Formula::join(left, connective, right)
    }
}
