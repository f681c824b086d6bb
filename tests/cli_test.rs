use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/events.jsonl");

    let output = cmd.output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 7);

    assert_eq!(lines[0]["id"], "door-1");
    assert_eq!(lines[1]["name"], "Back");
    assert!(!lines[1]["id"].as_str().unwrap().is_empty());
    assert_eq!(lines[2], serde_json::json!({"id": "door-1", "inventory": 5}));
    assert_eq!(lines[3]["inventory"], 5);
    assert_eq!(lines[3]["name"], "Front");
    assert!(lines[4].is_null());
    assert_eq!(lines[5], "door-1");
    assert!(lines[6].is_null());

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("direct-campaign"));
    cmd.arg("tests/fixtures/does-not-exist.jsonl");

    cmd.assert().failure();
}

#[test]
fn test_cli_table_names_from_env() {
    let mut cmd = Command::new(cargo_bin!("direct-campaign"));
    cmd.arg("tests/fixtures/events.jsonl")
        .env("DOOR_TABLE", "doors-prod");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"door-1\""));
}
