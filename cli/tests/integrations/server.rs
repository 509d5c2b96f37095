use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("smoothie").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"));
}

#[test]
fn test_server_rejects_bad_recipe_book() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.json");
    std::fs::write(&rules_file, "[{\"id\": \"\"}]").unwrap();

    let mut cmd = Command::cargo_bin("smoothie").unwrap();
    cmd.arg("server").arg("--rules").arg(&rules_file);

    cmd.assert().failure();
}
