#![no_main]

use libfuzzer_sys::fuzz_target;
use smoothie::Engine;

const RULES: [&str; 9] = [
    "modusPonens",
    "modusTollens",
    "hypotheticalSyllogism",
    "disjunctiveSyllogism",
    "simplification",
    "addition",
    "chainedModusPonens",
    "complexDisjunction",
    "mixedLogicChain",
];

fuzz_target!(|input: (u8, Vec<String>, String)| {
    let (rule, premises, conclusion) = input;
    let rule = RULES[rule as usize % RULES.len()];
    let premises: Vec<&str> = premises.iter().take(4).map(String::as_str).collect();

    let engine = Engine::new();
    let verdict = engine.validate_inference(&premises, &conclusion, rule);
    assert_eq!(verdict.valid, verdict.error.is_none());

    let _ = engine.apply_rule(rule, &premises);
    let _ = engine.identify_rule(&premises, &conclusion);
    let _ = engine.generate_hint(rule, &premises, Some(conclusion.as_str()));
});
