//! # Smoothie Engine
//!
//! **Serve drinks, learn inference rules**
//!
//! The rule engine behind the Boolean Smoothie Shop: customers ask for drinks
//! written as emoji formulas, and the player serves them by applying classic
//! rules of propositional inference.
//!
//! ## Quick Start
//!
//! ```rust
//! use smoothie::Engine;
//!
//! let engine = Engine::new();
//!
//! // Check a proposed conclusion against one rule
//! let verdict = engine.validate_inference(&["🍋➡️🍓", "🍋"], "🍓", "modusPonens");
//! assert!(verdict.valid);
//!
//! // Derive a formula the way the inventory game does
//! let derived = engine.apply_rule("modusPonens", &["🍋➡️🍓", "🍋"]);
//! assert_eq!(derived.as_deref(), Some("🍓"));
//! ```
//!
//! ## Core Concepts
//!
//! ### Formulas
//! A formula is a string of emoji. Fruits are propositions; `➡️`, `🔀`, `🥤`
//! and `❌` stand for implication, disjunction, conjunction and negation.
//! Parsing only splits the text into symbols; each rule looks for the shapes
//! it needs.
//!
//! ### Rules
//! The registry maps rule ids to definitions. Primitive rules check one
//! schema such as modus ponens; composite rules chain primitives in order.
//!
//! ### Strategies
//! In strict play the player proposes a conclusion and the rule's schema is
//! checked. In inventory play the player grows a [`Derivation`] one rule at
//! a time, and serving only asks whether the target was reached.

pub mod alphabet;
pub mod applier;
pub mod config;
pub mod derivation;
pub mod engine;
pub mod error;
pub mod hints;
pub mod parser;
mod patterns;
pub mod registry;
pub mod strategy;
pub mod validator;
pub mod verdict;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use alphabet::{Alphabet, SymbolKind};
pub use applier::RuleApplier;
pub use config::{EngineConfig, ParseMode, StrategyMode};
pub use derivation::{ApplyOutcome, Derivation};
pub use engine::Engine;
pub use error::{SmoothieError, Span};
pub use hints::{HintWriter, UNKNOWN_RULE_HINT};
pub use parser::{parse, Formula, FormulaParser};
pub use registry::{default_definitions, Primitive, RuleDefinition, RuleKind, RuleRegistry, Step};
pub use strategy::{Attempt, CustomerRequest, InventoryStrategy, StrictStrategy, Strategy};
pub use validator::Validator;
pub use verdict::{FailureReason, Rejection, StepOutcome, Verdict};

/// Result type for smoothie engine operations
pub type SmoothieResult<T> = Result<T, SmoothieError>;

#[cfg(test)]
mod tests;
