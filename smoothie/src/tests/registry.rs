use crate::error::SmoothieError;
use crate::registry::{default_definitions, Primitive, RuleKind, RuleRegistry};
use std::str::FromStr;

#[test]
fn test_default_registry_contents() {
    let registry = RuleRegistry::default();
    assert_eq!(
        registry.ids(),
        vec![
            "modusPonens",
            "modusTollens",
            "hypotheticalSyllogism",
            "disjunctiveSyllogism",
            "simplification",
            "addition",
            "chainedModusPonens",
            "complexDisjunction",
            "mixedLogicChain",
        ]
    );
    assert_eq!(registry.get("addition").unwrap().name, "Open Menu");
    assert!(registry.get("constructiveDilemma").is_none());
}

#[test]
fn test_rule_kinds() {
    let registry = RuleRegistry::default();
    assert_eq!(
        registry.get("modusTollens").unwrap().kind(),
        RuleKind::Primitive(Primitive::ModusTollens)
    );
    let chain = registry.get("complexDisjunction").unwrap();
    assert!(chain.is_composite());
    assert_eq!(chain.arity(), 3);
    assert_eq!(registry.get("simplification").unwrap().arity(), 1);
}

#[test]
fn test_up_to_difficulty() {
    let registry = RuleRegistry::default();
    let easy: Vec<&str> = registry
        .up_to_difficulty(1)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(easy, vec!["modusPonens", "simplification"]);
    assert_eq!(registry.up_to_difficulty(4).len(), registry.len());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut definitions = default_definitions();
    definitions.push(definitions[0].clone());
    let err = RuleRegistry::new(definitions).unwrap_err();
    assert_eq!(
        err,
        SmoothieError::InvalidRegistry("rule 'modusPonens' is defined twice".to_string())
    );
}

#[test]
fn test_broken_chain_is_rejected() {
    let mut definitions = default_definitions();
    let chain = definitions
        .iter_mut()
        .find(|d| d.id == "chainedModusPonens")
        .unwrap();
    chain.steps[1].premises = vec!["🍓➡️🥝".to_string(), "🥝".to_string()];

    let err = RuleRegistry::new(definitions).unwrap_err();
    assert!(matches!(err, SmoothieError::InvalidRegistry(ref msg) if msg.contains("never uses")));
}

#[test]
fn test_chain_must_end_in_conclusion() {
    let mut definitions = default_definitions();
    let chain = definitions
        .iter_mut()
        .find(|d| d.id == "mixedLogicChain")
        .unwrap();
    chain.conclusion = "🍓".to_string();

    assert!(RuleRegistry::new(definitions).is_err());
}

#[test]
fn test_primitive_with_wrong_example_arity_is_rejected() {
    let mut definitions = default_definitions();
    definitions[0].premises.push("🥝".to_string());
    assert!(RuleRegistry::new(definitions).is_err());
}

#[test]
fn test_registry_json_round_trip() {
    let registry = RuleRegistry::default();
    let json = registry.to_json().unwrap();
    let loaded = RuleRegistry::from_json(&json).unwrap();
    assert_eq!(loaded.ids(), registry.ids());
    assert_eq!(
        loaded.get("mixedLogicChain"),
        registry.get("mixedLogicChain")
    );
}

#[test]
fn test_registry_from_minimal_json() {
    let json = r#"[
        {
            "id": "modusPonens",
            "name": "House Special",
            "explanation": "Follow the recipe",
            "primitive": "modusPonens"
        }
    ]"#;
    let registry = RuleRegistry::from_json(json).unwrap();
    let definition = registry.get("modusPonens").unwrap();
    assert_eq!(definition.difficulty, 1);
    assert!(definition.premises.is_empty());
    assert_eq!(definition.kind(), RuleKind::Primitive(Primitive::ModusPonens));
}

#[test]
fn test_registry_from_bad_json() {
    assert!(matches!(
        RuleRegistry::from_json("not json"),
        Err(SmoothieError::InvalidConfig(_))
    ));
}

#[test]
fn test_primitive_keys_round_trip() {
    for primitive in Primitive::IDENTIFY_ORDER {
        assert_eq!(Primitive::from_str(primitive.key()).unwrap(), primitive);
    }
    assert_eq!(Primitive::from_str("addition").unwrap(), Primitive::Addition);
    assert!(Primitive::from_str("teleportation").is_err());
}

#[test]
fn test_chain_links_ignore_whitespace() {
    let mut definitions = default_definitions();
    let chain = definitions
        .iter_mut()
        .find(|d| d.id == "chainedModusPonens")
        .unwrap();
    chain.steps[0].result = "🍓 ".to_string();
    chain.conclusion = " 🥝".to_string();

    assert!(RuleRegistry::new(definitions).is_ok());
}
