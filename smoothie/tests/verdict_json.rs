use smoothie::{ApplyOutcome, Engine};

#[test]
fn valid_verdict_json() {
    let verdict = Engine::new().validate_inference(&["🍋➡️🍓", "🍋"], "🍓", "modusPonens");
    let json = serde_json::to_string(&verdict).unwrap();
    insta::assert_snapshot!(json, @r#"{"valid":true,"rule":"modusPonens","explanation":"From 🍋➡️🍓 recipe and having 🍋, we serve 🍓"}"#);
}

#[test]
fn invalid_verdict_json() {
    let verdict = Engine::new().validate_inference(&["🍋🥤🍓"], "🥝", "simplification");
    let json = serde_json::to_string(&verdict).unwrap();
    insta::assert_snapshot!(json, @r#"{"valid":false,"rule":"simplification","explanation":"From 🍋🥤🍓 mixed together, we can serve just 🍋","error":"ConclusionMismatch","detail":"Conclusion must be one of the mixed ingredients"}"#);
}

#[test]
fn composite_verdict_lists_steps() {
    let verdict = Engine::new().validate_inference(
        &["🍋🥤🍓", "🍓➡️🥝", "❌🍋"],
        "🥝",
        "mixedLogicChain",
    );
    let value = serde_json::to_value(&verdict).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["steps"][0]["rule"], "simplification");
    assert_eq!(value["steps"][1]["rule"], "modusPonens");
    assert_eq!(value["steps"][1]["result"], "🥝");
    assert!(value["steps"][0].get("error").is_none());
}

#[test]
fn apply_outcome_json() {
    let outcome = ApplyOutcome::NotApplicable;
    assert_eq!(
        serde_json::to_string(&outcome).unwrap(),
        r#"{"outcome":"not_applicable"}"#
    );
}
