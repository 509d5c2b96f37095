use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn smoothie() -> Command {
    Command::cargo_bin("smoothie").unwrap()
}

#[test]
fn test_validate_valid_inference() {
    smoothie()
        .args(["validate", "modusPonens", "🍓", "🍋➡️🍓", "🍋"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modusPonens served"));
}

#[test]
fn test_validate_invalid_inference_exits_with_failure() {
    smoothie()
        .args(["validate", "simplification", "🥝", "🍋🥤🍓"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ConclusionMismatch"));
}

#[test]
fn test_validate_json() {
    smoothie()
        .args(["validate", "modusTollens", "❌🍋", "🍋➡️🍓", "❌🍓", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"rule\": \"modusTollens\""));
}

#[test]
fn test_validate_composite_shows_steps() {
    smoothie()
        .args([
            "validate",
            "complexDisjunction",
            "🥝",
            "🍋🔀🥝",
            "🍋➡️🍓",
            "❌🍓",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. modusTollens"))
        .stdout(predicate::str::contains("2. disjunctiveSyllogism"));
}

#[test]
fn test_apply() {
    smoothie()
        .args(["apply", "hypotheticalSyllogism", "🍋➡️🍓", "🍓➡️🥝"])
        .assert()
        .success()
        .stdout("🍋➡️🥝\n");
}

#[test]
fn test_apply_not_applicable() {
    smoothie()
        .args(["apply", "modusPonens", "🍋➡️🍓", "🥝"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not apply"));
}

#[test]
fn test_apply_unknown_rule() {
    smoothie()
        .args(["apply", "teleportation", "🍋"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rule 'teleportation'"));
}

#[test]
fn test_apply_with_strict_symbols_reports_unknown_symbol() {
    smoothie()
        .args(["apply", "modusPonens", "🍋➡️🍌", "🍋", "--strict-symbols"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'🍌' is not on the menu"));
}

#[test]
fn test_identify() {
    smoothie()
        .args(["identify", "🍓", "🍋🔀🍓", "❌🍋"])
        .assert()
        .success()
        .stdout("disjunctiveSyllogism\n");

    smoothie()
        .args(["identify", "🥝", "🍋➡️🍓", "🍋"])
        .assert()
        .success()
        .stdout("no rule\n");
}

#[test]
fn test_hint() {
    smoothie()
        .args(["hint", "modusPonens", "🍓➡️🥝", "🍓"])
        .assert()
        .success()
        .stdout(predicate::str::contains("you can serve 🥝"));

    smoothie()
        .args(["hint", "teleportation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm not sure how to help"));
}

#[test]
fn test_rules_table() {
    smoothie()
        .args(["rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classic Recipe"))
        .stdout(predicate::str::contains("mixedLogicChain"));

    smoothie()
        .args(["rules", "--difficulty", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingredient Split"))
        .stdout(predicate::str::contains("Recipe Chain").not());
}

#[test]
fn test_custom_recipe_book() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.json");
    fs::write(
        &rules_file,
        r#"[
            {
                "id": "modusPonens",
                "name": "House Special",
                "explanation": "Follow the recipe",
                "primitive": "modusPonens"
            }
        ]"#,
    )
    .unwrap();

    smoothie()
        .arg("--rules")
        .arg(&rules_file)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("House Special"))
        .stdout(predicate::str::contains("Classic Recipe").not());

    smoothie()
        .arg("--rules")
        .arg(&rules_file)
        .args(["validate", "modusTollens", "❌🍋", "🍋➡️🍓", "❌🍓"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("UnknownRule"));
}

#[test]
fn test_broken_recipe_book() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.json");
    fs::write(&rules_file, "not json").unwrap();

    smoothie()
        .arg("--rules")
        .arg(&rules_file)
        .arg("rules")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_missing_recipe_book() {
    smoothie()
        .args(["--rules", "/nonexistent/rules.json", "rules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
