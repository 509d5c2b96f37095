use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use smoothie::{ApplyOutcome, Derivation, RuleDefinition, RuleKind, StepOutcome, Verdict};

enum LineType {
    Step,
    LastStep,
    Selected,
    Unselected,
}

impl LineType {
    fn format_line(&self, content: &str) -> String {
        let symbol = match self {
            LineType::Step => "├─",
            LineType::LastStep => "└─",
            LineType::Selected => "[x]",
            LineType::Unselected => "[ ]",
        };
        format!("{} {}\n", symbol, content)
    }
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_verdict(&self, verdict: &Verdict) -> String {
        let title = match verdict.error {
            None => format!("✓ {} served", verdict.rule),
            Some(reason) => format!("✗ {} rejected: {}", verdict.rule, reason),
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new(&title)]));

        if let Some(detail) = &verdict.detail {
            table.add_row(Row::from(vec![Cell::new(detail)]));
        }
        if !verdict.explanation.is_empty() {
            table.add_row(Row::from(vec![Cell::new(&verdict.explanation)]));
        }

        let steps = self.format_steps(&verdict.steps);
        let steps = steps.trim_end();
        if !steps.is_empty() {
            table.add_row(Row::from(vec![Cell::new(steps)]));
        }

        format!("{}\n", table)
    }

    fn format_steps(&self, steps: &[StepOutcome]) -> String {
        let mut output = String::new();
        for (i, step) in steps.iter().enumerate() {
            let line = if i + 1 == steps.len() {
                LineType::LastStep
            } else {
                LineType::Step
            };
            let mark = if step.valid { "✓" } else { "✗" };
            output.push_str(&line.format_line(&format!(
                "{}. {}({}) = {} {}",
                step.step,
                step.rule,
                step.premises.join(", "),
                step.result,
                mark
            )));
        }
        output
    }

    pub fn format_rules(&self, rules: &[&RuleDefinition]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Rule").set_alignment(CellAlignment::Left),
            Cell::new("Name").set_alignment(CellAlignment::Left),
            Cell::new("Level").set_alignment(CellAlignment::Center),
            Cell::new("Kind").set_alignment(CellAlignment::Left),
            Cell::new("Example").set_alignment(CellAlignment::Left),
        ]));

        for rule in rules {
            let kind = match rule.kind() {
                RuleKind::Primitive(_) => "primitive".to_string(),
                RuleKind::Composite(steps) => format!("{} steps", steps.len()),
                RuleKind::Unimplemented => "no technique".to_string(),
            };
            let example = format!("{} ⊢ {}", rule.premises.join(", "), rule.conclusion);
            table.add_row(Row::from(vec![
                Cell::new(&rule.id),
                Cell::new(&rule.name),
                Cell::new("★".repeat(rule.difficulty as usize))
                    .set_alignment(CellAlignment::Center),
                Cell::new(kind),
                Cell::new(example),
            ]));
        }

        format!("{}\n", table)
    }

    pub fn format_inventory(&self, derivation: &Derivation) -> String {
        let mut output = String::new();
        for (i, formula) in derivation.inventory().iter().enumerate() {
            let line = if derivation.selected_indices().contains(&i) {
                LineType::Selected
            } else {
                LineType::Unselected
            };
            output.push_str(&line.format_line(&format!("{}. {}", i + 1, formula)));
        }
        output
    }

    pub fn format_outcome(&self, rule: &str, outcome: &ApplyOutcome) -> String {
        match outcome {
            ApplyOutcome::Derived(formula) => format!("{} gives {}", rule, formula),
            ApplyOutcome::AlreadyKnown(formula) => {
                format!("{} gives {}, which is already on the counter", rule, formula)
            }
            ApplyOutcome::NotApplicable => {
                format!("{} does not apply to the selection", rule)
            }
            ApplyOutcome::NothingSelected => "Select something first".to_string(),
        }
    }
}
