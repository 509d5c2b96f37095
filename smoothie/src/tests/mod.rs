// Parser tests
mod alphabet;
mod parsing;

// Rule tests
mod applier;
mod registry;
