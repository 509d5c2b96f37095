use crate::engine::Engine;

fn apply(rule: &str, selected: &[&str]) -> Option<String> {
    Engine::new().apply_rule(rule, selected)
}

#[test]
fn test_apply_each_primitive() {
    assert_eq!(apply("modusPonens", &["🍋➡️🍓", "🍋"]).as_deref(), Some("🍓"));
    assert_eq!(apply("modusTollens", &["🍋➡️🍓", "❌🍓"]).as_deref(), Some("❌🍋"));
    assert_eq!(
        apply("hypotheticalSyllogism", &["🍋➡️🍓", "🍓➡️🥝"]).as_deref(),
        Some("🍋➡️🥝")
    );
    assert_eq!(
        apply("disjunctiveSyllogism", &["🍋🔀🍓", "❌🍋"]).as_deref(),
        Some("🍓")
    );
    assert_eq!(apply("simplification", &["🍋🥤🍓"]).as_deref(), Some("🍋"));
    assert_eq!(apply("addition", &["🍋", "🍓"]).as_deref(), Some("🍋🔀🍓"));
}

#[test]
fn test_apply_rejects_mismatched_selection() {
    assert_eq!(apply("modusPonens", &["🍋➡️🍓", "🥝"]), None);
    assert_eq!(apply("modusTollens", &["🍋➡️🍓", "❌🍋"]), None);
    assert_eq!(apply("hypotheticalSyllogism", &["🍋➡️🍓", "🍋➡️🥝"]), None);
    assert_eq!(apply("disjunctiveSyllogism", &["🍋🔀🍓", "❌🥝"]), None);
    assert_eq!(apply("simplification", &["🍋🔀🍓"]), None);
    assert_eq!(apply("addition", &["🍋"]), None);
}

#[test]
fn test_apply_empty_or_unknown() {
    assert_eq!(apply("modusPonens", &[]), None);
    assert_eq!(apply("constructiveDilemma", &["🍋➡️🍓", "🍋"]), None);
    assert_eq!(apply("modusPonens", &["🍋➡️🍓", "  "]), None);
}

#[test]
fn test_apply_composite_is_not_a_single_step() {
    assert_eq!(
        apply("chainedModusPonens", &["🍋➡️🍓", "🍓➡️🥝", "🍋"]),
        None
    );
}

#[test]
fn test_apply_ignores_extra_formulas() {
    assert_eq!(
        apply("modusPonens", &["🍋", "🥝🔀🍓", "🍋➡️🍓"]).as_deref(),
        Some("🍓")
    );
}

#[test]
fn test_apply_takes_first_matching_fact() {
    // 🥝 is the first lone ingredient, so the recipe never fires
    assert_eq!(apply("modusPonens", &["🥝", "🍋➡️🍓", "🍋"]), None);
}

#[test]
fn test_disjunctive_syllogism_with_right_disjunct_refused() {
    assert_eq!(
        apply("disjunctiveSyllogism", &["🍋🔀🍓", "❌🍓"]).as_deref(),
        Some("🍋")
    );
}

#[test]
fn test_simplification_skips_refused_left_conjunct() {
    assert_eq!(
        apply("simplification", &["🍋🥤🍓", "❌🍋"]).as_deref(),
        Some("🍓")
    );
    assert_eq!(
        apply("simplification", &["🍋🥤🍓", "🍋"]).as_deref(),
        Some("🍓")
    );
}

#[test]
fn test_headless_recipe_derives_nothing() {
    assert_eq!(apply("modusPonens", &["🍋➡️", "🍋"]), None);
    assert_eq!(apply("modusTollens", &["➡️🍓", "❌🍓"]), None);
}
