use ariadne::{Color, Label, Report, ReportKind, Source};
use smoothie::SmoothieError;

const SOURCE_ID: &str = "formula";

/// Format a SmoothieError with fancy terminal output using Ariadne
pub fn format_error(error: &SmoothieError) -> String {
    match error {
        SmoothieError::UnknownSymbol {
            symbol,
            span,
            source_text,
        } => {
            let mut output = Vec::new();

            // Ariadne counts characters, spans count bytes
            let start = char_offset(source_text, span.start);
            let end = char_offset(source_text, span.end);

            let report = Report::build(ReportKind::Error, SOURCE_ID, start)
                .with_message(format!("'{}' is not on the menu", symbol))
                .with_label(
                    Label::new((SOURCE_ID, start..end))
                        .with_message("unknown symbol")
                        .with_color(Color::Red),
                )
                .with_help("Use fruits 🍋 🍓 🥝 and the operators ➡️ 🔀 🥤 ❌")
                .finish();

            match report.write((SOURCE_ID, Source::from(source_text.as_str())), &mut output) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        SmoothieError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}",
                limit_name, limit_value, actual_value
            )
        }
        SmoothieError::EmptyFormula => "Empty formula: nothing to parse".to_string(),
        SmoothieError::UnknownRule(rule) => {
            format!("Unknown rule '{}'. Run `smoothie rules` to see the recipe book.", rule)
        }
        SmoothieError::InvalidRegistry(msg) => format!("Invalid recipe book: {}", msg),
        SmoothieError::InvalidConfig(msg) => format!("Invalid configuration: {}", msg),
        SmoothieError::ModeMismatch { .. } => format!("{}", error),
    }
}

fn char_offset(text: &str, byte: usize) -> usize {
    text.get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smoothie::Span;

    #[test]
    fn test_unknown_symbol_report_names_the_symbol() {
        let error = SmoothieError::UnknownSymbol {
            symbol: "🍌".to_string(),
            span: Span::new(10, 14),
            source_text: "🍋➡️🍌".to_string(),
        };
        let output = format_error(&error);
        assert!(output.contains("'🍌' is not on the menu"));
        assert!(output.contains("unknown symbol"));
    }

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("🍋➡️🍌", 10), 3);
        assert_eq!(char_offset("abc", 2), 2);
    }

    #[test]
    fn test_unknown_rule_message() {
        let output = format_error(&SmoothieError::UnknownRule("nope".to_string()));
        assert!(output.contains("smoothie rules"));
    }
}
