use crate::alphabet::{Alphabet, SymbolKind};

#[test]
fn test_default_alphabet_classifies_symbols() {
    let alphabet = Alphabet::default();
    assert_eq!(alphabet.classify("🍋"), SymbolKind::Proposition);
    assert_eq!(alphabet.classify("➡️"), SymbolKind::Implication);
    assert_eq!(alphabet.classify("🔀"), SymbolKind::Disjunction);
    assert_eq!(alphabet.classify("🥤"), SymbolKind::Conjunction);
    assert_eq!(alphabet.classify("❌"), SymbolKind::Negation);
    assert_eq!(alphabet.classify("🫙"), SymbolKind::Auxiliary);
    assert_eq!(alphabet.classify("🍌"), SymbolKind::Unknown);
}

#[test]
fn test_bare_arrow_without_variation_selector_is_unknown() {
    let alphabet = Alphabet::default();
    assert_eq!(alphabet.classify("\u{27A1}"), SymbolKind::Unknown);
}

#[test]
fn test_default_alphabet_passes_checks() {
    assert!(Alphabet::default().check().is_ok());
    assert_eq!(Alphabet::default().symbols().len(), 9);
}

#[test]
fn test_alphabet_rejects_duplicates_and_multi_symbol_tokens() {
    let mut duplicated = Alphabet::default();
    duplicated.disjunction = "🥤".to_string();
    assert!(duplicated.check().unwrap_err().contains("declared twice"));

    let mut wide = Alphabet::default();
    wide.propositions.push("🍋🍓".to_string());
    assert!(wide.check().unwrap_err().contains("not a single character"));

    let mut empty = Alphabet::default();
    empty.propositions.clear();
    assert!(empty.check().is_err());
}
