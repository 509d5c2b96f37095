use crate::alphabet::{Alphabet, SymbolKind};
use crate::config::ParseMode;
use crate::error::{SmoothieError, Span};
use crate::parser::{parse, Binary, FormulaParser};

#[test]
fn test_parse_splits_emoji_into_symbols() {
    let formula = parse("🍋➡️🍓").unwrap();
    assert_eq!(formula.tokens, vec!["🍋", "➡️", "🍓"]);
    assert_eq!(formula.len(), 3);
    assert_eq!(formula.normalized, "🍋➡️🍓");
}

#[test]
fn test_parse_keeps_variation_selector_with_arrow() {
    let formula = parse("➡️").unwrap();
    assert_eq!(formula.tokens.len(), 1);
    assert_eq!(formula.tokens[0], "\u{27A1}\u{FE0F}");
}

#[test]
fn test_parse_drops_whitespace() {
    let formula = parse("  🍋 ➡️\t🍓 \n").unwrap();
    assert_eq!(formula.normalized, "🍋➡️🍓");
    assert_eq!(formula.source, "  🍋 ➡️\t🍓 \n");
}

#[test]
fn test_parse_is_idempotent() {
    for text in ["🍋➡️🍓", "❌🍋", " 🍋 🔀 🥝", "🍋🥤🍓"] {
        let once = parse(text).unwrap();
        let twice = parse(&once.normalized).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.tokens, twice.tokens);
    }
}

#[test]
fn test_parse_empty_and_blank() {
    assert_eq!(parse(""), Err(SmoothieError::EmptyFormula));
    assert_eq!(parse("   \t\n"), Err(SmoothieError::EmptyFormula));
}

#[test]
fn test_lenient_parse_keeps_unknown_symbols() {
    let formula = parse("🍌➡️🍓").unwrap();
    assert_eq!(formula.tokens, vec!["🍌", "➡️", "🍓"]);
}

#[test]
fn test_strict_parse_reports_unknown_symbol_with_span() {
    let alphabet = Alphabet::default();
    let parser = FormulaParser::new(&alphabet, ParseMode::Strict, 1024);

    let err = parser.parse("🍋➡️🍌").unwrap_err();
    match err {
        SmoothieError::UnknownSymbol {
            symbol,
            span,
            source_text,
        } => {
            assert_eq!(symbol, "🍌");
            // 🍋 is four bytes, ➡️ is six
            assert_eq!(span, Span::new(10, 14));
            assert_eq!(&source_text[span.range()], "🍌");
        }
        other => panic!("Expected UnknownSymbol, got {:?}", other),
    }
}

#[test]
fn test_strict_parse_accepts_auxiliary_symbols() {
    let alphabet = Alphabet::default();
    let parser = FormulaParser::new(&alphabet, ParseMode::Strict, 1024);
    assert!(parser.parse("🫙🍸").is_ok());
}

#[test]
fn test_parse_rejects_oversized_formula() {
    let alphabet = Alphabet::default();
    let parser = FormulaParser::new(&alphabet, ParseMode::Lenient, 8);

    let err = parser.parse("🍋🍋🍋").unwrap_err();
    assert!(matches!(
        err,
        SmoothieError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_formula_bytes"
    ));
    assert!(parser.parse("🍋🍋").is_ok());
}

#[test]
fn test_equality_is_syntactic() {
    let left = parse("🍋🔀🍓").unwrap();
    let right = parse("🍓🔀🍋").unwrap();
    assert_ne!(left, right);
    assert_eq!(left, parse("🍋 🔀 🍓").unwrap());
}

#[test]
fn test_split_at_first_connective() {
    let alphabet = Alphabet::default();

    let formula = parse("🍋➡️🍓➡️🥝").unwrap();
    assert_eq!(
        formula.split_at(&alphabet, SymbolKind::Implication),
        Some(Binary {
            left: "🍋".to_string(),
            right: "🍓➡️🥝".to_string(),
        })
    );

    let headless = parse("➡️🍓").unwrap();
    assert_eq!(
        headless.split_at(&alphabet, SymbolKind::Implication),
        Some(Binary {
            left: String::new(),
            right: "🍓".to_string(),
        })
    );

    assert_eq!(formula.split_at(&alphabet, SymbolKind::Disjunction), None);
}

#[test]
fn test_negated_proposition() {
    let alphabet = Alphabet::default();
    assert_eq!(
        parse("❌🍋").unwrap().negated_proposition(&alphabet),
        Some("🍋")
    );
    assert_eq!(parse("❌🍋🍓").unwrap().negated_proposition(&alphabet), None);
    assert_eq!(parse("❌❌").unwrap().negated_proposition(&alphabet), None);
    assert_eq!(parse("🍋").unwrap().negated_proposition(&alphabet), None);
}

#[test]
fn test_single_proposition() {
    let alphabet = Alphabet::default();
    assert!(parse("🥝").unwrap().is_single_proposition(&alphabet));
    assert!(!parse("🍌").unwrap().is_single_proposition(&alphabet));
    assert!(!parse("🍋🍓").unwrap().is_single_proposition(&alphabet));
}

#[test]
fn test_whitespace_is_stripped_before_splitting() {
    let formula = parse("🍋➡ \u{FE0F}🍓").unwrap();
    assert_eq!(formula.tokens, vec!["🍋", "➡️", "🍓"]);
    assert_eq!(formula.normalized, "🍋➡️🍓");
}

#[test]
fn test_regional_indicators_join_once_spaces_go() {
    let once = parse("🇺 🇸").unwrap();
    assert_eq!(once.tokens, vec!["🇺🇸"]);
    let twice = parse(&once.normalized).unwrap();
    assert_eq!(once.tokens, twice.tokens);
}

#[test]
fn test_unknown_symbol_span_points_into_source() {
    let alphabet = Alphabet::default();
    let parser = FormulaParser::new(&alphabet, ParseMode::Strict, 1024);
    let err = parser.parse(" 🍋 ➡️ 🍌").unwrap_err();
    match err {
        SmoothieError::UnknownSymbol { symbol, span, .. } => {
            assert_eq!(symbol, "🍌");
            assert_eq!(span, Span::new(13, 17));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
