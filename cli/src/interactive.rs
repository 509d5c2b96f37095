use crate::formatter::Formatter;
use anyhow::{Context, Result};
use inquire::{MultiSelect, Select, Text};
use smoothie::{Attempt, CustomerRequest, Derivation, Engine, RuleKind, StrategyMode};

const APPLY: &str = "Apply a rule";
const SERVE: &str = "Serve the drink";
const HINT: &str = "Ask for a hint";
const QUIT: &str = "Close the shop";

pub fn play(engine: &Engine, rule: Option<String>) -> Result<()> {
    let rule = match rule {
        Some(rule) => rule,
        None => select_request(engine)?,
    };
    let request = engine.request_for(&rule)?;
    let definition = engine
        .registry()
        .get(&rule)
        .context("Selected rule disappeared from the recipe book")?;

    println!("\n{}", definition.name);
    if !definition.context.is_empty() {
        println!("{}", definition.context);
    }
    println!(
        "On the counter: {}\nThe customer wants: {}\n",
        request.premises.join(", "),
        request.target
    );

    let mut derivation = engine.start_derivation(&request)?;
    let formatter = Formatter::default();

    loop {
        let mut actions = vec![SERVE, HINT, QUIT];
        if engine.config().strategy == StrategyMode::Inventory {
            actions.insert(0, APPLY);
            print!("{}", formatter.format_inventory(&derivation));
        }

        let action = Select::new("What next?", actions)
            .prompt()
            .context("Failed to get action")?;

        match action {
            APPLY => apply_step(engine, &mut derivation, &formatter)?,
            SERVE => {
                if serve(engine, &request, &derivation, &formatter)? {
                    return Ok(());
                }
            }
            HINT => {
                let premises = request.premise_refs();
                println!(
                    "{}\n",
                    engine.generate_hint(&request.rule, &premises, Some(request.target.as_str()))
                );
            }
            _ => return Ok(()),
        }
    }
}

fn select_request(engine: &Engine) -> Result<String> {
    let rules: Vec<_> = engine.registry().iter().collect();

    if rules.is_empty() {
        anyhow::bail!("The recipe book is empty. Load one with --rules FILE.");
    }

    if rules.len() == 1 {
        return Ok(rules[0].id.clone());
    }

    let display_options: Vec<String> = rules
        .iter()
        .map(|rule| {
            format!(
                "{} ({}) {}",
                rule.name,
                rule.id,
                "★".repeat(rule.difficulty as usize)
            )
        })
        .collect();

    let selected = Select::new("Who is at the counter?", display_options.clone())
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt()
        .context("Failed to get request selection")?;

    let index = display_options
        .iter()
        .position(|d| d == &selected)
        .context("Failed to find selected request index")?;

    Ok(rules[index].id.clone())
}

fn apply_step(engine: &Engine, derivation: &mut Derivation, formatter: &Formatter) -> Result<()> {
    let items: Vec<String> = derivation
        .inventory()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f))
        .collect();

    let picked = MultiSelect::new("Pick the formulas to use:", items.clone())
        .prompt()
        .context("Failed to get formula selection")?;

    derivation.clear_selection();
    for label in &picked {
        if let Some(index) = items.iter().position(|item| item == label) {
            derivation.select(index);
        }
    }

    // Composite rules are solved one primitive at a time
    let primitives: Vec<String> = engine
        .registry()
        .iter()
        .filter(|d| matches!(d.kind(), RuleKind::Primitive(_)))
        .map(|d| format!("{} ({})", d.name, d.id))
        .collect();
    let ids: Vec<&str> = engine
        .registry()
        .iter()
        .filter(|d| matches!(d.kind(), RuleKind::Primitive(_)))
        .map(|d| d.id.as_str())
        .collect();

    let choice = Select::new("Which technique?", primitives.clone())
        .prompt()
        .context("Failed to get rule selection")?;
    let rule = primitives
        .iter()
        .position(|p| p == &choice)
        .map(|i| ids[i])
        .context("Failed to find selected rule")?;

    let outcome = engine.apply_to(derivation, rule);
    println!("{}\n", formatter.format_outcome(rule, &outcome));
    Ok(())
}

fn serve(
    engine: &Engine,
    request: &CustomerRequest,
    derivation: &Derivation,
    formatter: &Formatter,
) -> Result<bool> {
    let verdict = match engine.config().strategy {
        StrategyMode::Inventory => engine.serve(request, Attempt::Inventory(derivation))?,
        StrategyMode::Strict => {
            let conclusion = Text::new("What do you serve?")
                .with_help_message(&format!("Example: {}", request.target))
                .prompt()
                .context("Failed to get conclusion")?;
            engine.serve(request, Attempt::Conclusion(&conclusion))?
        }
    };

    print!("{}", formatter.format_verdict(&verdict));
    Ok(verdict.valid)
}
