mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use smoothie::{Engine, EngineConfig, ParseMode, RuleRegistry, StrategyMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "smoothie")]
#[command(about = "Serve drinks, learn inference rules.")]
#[command(
    long_about = "The Boolean Smoothie Shop rule engine.\nCustomers order drinks written as emoji formulas; you serve them by applying rules of inference.\nThe CLI checks inferences, derives formulas, gives hints, plays an interactive shift, or runs the engine as an HTTP server."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Recipe book to use instead of the built-in one (JSON array of rules)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Engine configuration (JSON: alphabet, parseMode, strategy, maxFormulaBytes)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reject symbols that are not on the menu while parsing
    #[arg(long, global = true)]
    strict_symbols: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a proposed conclusion against one rule
    ///
    /// Exits with status 1 when the inference is not valid.
    ///
    /// Example: smoothie validate modusPonens 🍓 🍋➡️🍓 🍋
    Validate {
        /// Rule id (see `smoothie rules`)
        rule: String,
        /// The drink being served
        conclusion: String,
        /// Formulas on the counter
        premises: Vec<String>,
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Derive a formula by applying a rule to selected formulas
    ///
    /// Example: smoothie apply modusTollens 🍋➡️🍓 ❌🍓
    Apply {
        rule: String,
        /// Selected formulas, in any order
        selected: Vec<String>,
    },
    /// Name the primitive rule that justifies an inference
    Identify {
        conclusion: String,
        premises: Vec<String>,
    },
    /// Get a hint for a rule
    Hint {
        rule: String,
        /// The customer's formulas, used to tailor the hint
        premises: Vec<String>,
        /// The drink the customer wants
        #[arg(short, long)]
        expected: Option<String>,
    },
    /// List the rules in the recipe book
    Rules {
        /// Only rules up to this difficulty
        #[arg(short, long)]
        difficulty: Option<u8>,
        /// Print the recipe book as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a shift at the counter
    ///
    /// Derive the customer's drink one rule at a time, then serve it.
    Play {
        /// Rule id of the customer request (prompted when omitted)
        rule: Option<String>,
        /// Serve by proposing one conclusion instead of building an inventory
        #[arg(long)]
        strict: bool,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// API: GET /health, GET /rules, GET /rules/:id,
    /// POST /validate, /apply, /identify, /hint
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Validate {
            rule,
            conclusion,
            premises,
            json,
        } => validate_command(&cli, rule, conclusion, premises, *json),
        Commands::Apply { rule, selected } => apply_command(&cli, rule, selected),
        Commands::Identify {
            conclusion,
            premises,
        } => identify_command(&cli, conclusion, premises),
        Commands::Hint {
            rule,
            premises,
            expected,
        } => hint_command(&cli, rule, premises, expected.as_deref()),
        Commands::Rules { difficulty, json } => rules_command(&cli, *difficulty, *json),
        Commands::Play { rule, strict } => play_command(&cli, rule.clone(), *strict),
        Commands::Server { host, port } => server_command(&cli, host, *port),
    };

    if let Err(e) = result {
        if let Some(smoothie_err) = e.downcast_ref::<smoothie::SmoothieError>() {
            eprintln!("{}", error_formatter::format_error(smoothie_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn validate_command(
    cli: &Cli,
    rule: &str,
    conclusion: &str,
    premises: &[String],
    json: bool,
) -> Result<()> {
    let engine = build_engine(cli, None)?;
    let refs = as_refs(premises);
    let verdict = engine.validate_inference(&refs, conclusion, rule);

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print!("{}", Formatter::default().format_verdict(&verdict));
    }

    if !verdict.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn apply_command(cli: &Cli, rule: &str, selected: &[String]) -> Result<()> {
    let engine = build_engine(cli, None)?;
    if !engine.registry().contains(rule) {
        return Err(smoothie::SmoothieError::UnknownRule(rule.to_string()).into());
    }

    let formulas = selected
        .iter()
        .map(|s| engine.parse_formula(s))
        .collect::<smoothie::SmoothieResult<Vec<_>>>()?;

    match engine.applier().apply(rule, &formulas) {
        Some(derived) => {
            println!("{}", derived);
            Ok(())
        }
        None => {
            eprintln!("{} does not apply to the selection", rule);
            std::process::exit(1);
        }
    }
}

fn identify_command(cli: &Cli, conclusion: &str, premises: &[String]) -> Result<()> {
    let engine = build_engine(cli, None)?;
    match engine.identify_rule(&as_refs(premises), conclusion) {
        Some(rule) => println!("{}", rule),
        None => println!("no rule"),
    }
    Ok(())
}

fn hint_command(cli: &Cli, rule: &str, premises: &[String], expected: Option<&str>) -> Result<()> {
    let engine = build_engine(cli, None)?;
    println!("{}", engine.generate_hint(rule, &as_refs(premises), expected));
    Ok(())
}

fn rules_command(cli: &Cli, difficulty: Option<u8>, json: bool) -> Result<()> {
    let engine = build_engine(cli, None)?;
    let rules = match difficulty {
        Some(tier) => engine.registry().up_to_difficulty(tier),
        None => engine.registry().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
    } else {
        print!("{}", Formatter::default().format_rules(&rules));
    }
    Ok(())
}

fn play_command(cli: &Cli, rule: Option<String>, strict: bool) -> Result<()> {
    let strategy = if strict {
        StrategyMode::Strict
    } else {
        StrategyMode::Inventory
    };
    let engine = build_engine(cli, Some(strategy))?;
    interactive::play(&engine, rule)
}

fn server_command(cli: &Cli, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let engine = build_engine(cli, None)?;
        let rt = Runtime::new()?;
        rt.block_on(async {
            println!(
                "Starting HTTP server with {} rule(s) in the recipe book",
                engine.registry().len()
            );
            server::http::start_server(engine, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (cli, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// Build the engine from the global flags
fn build_engine(cli: &Cli, strategy: Option<StrategyMode>) -> Result<Engine> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json(&read(path)?)?,
        None => EngineConfig::default(),
    };
    if cli.strict_symbols {
        config = config.with_parse_mode(ParseMode::Strict);
    }
    if let Some(strategy) = strategy {
        config = config.with_strategy(strategy);
    }

    let registry = match &cli.rules {
        Some(path) => RuleRegistry::from_json(&read(path)?)?,
        None => RuleRegistry::default(),
    };

    Ok(Engine::with_registry(config, registry)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn as_refs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}
