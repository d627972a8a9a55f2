use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[allow(deprecated)]
fn docschema() -> Command {
    Command::cargo_bin("docschema").expect("Failed to find docschema binary")
}

fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be valid JSON")
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_schema() {
    docschema()
        .arg("check")
        .arg(fixture_path("person_schema.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema is valid"))
        .stdout(predicate::str::contains("Fields:    7"))
        .stdout(predicate::str::contains("email: str (optional)"))
        .stdout(predicate::str::contains("address, friend"));
}

#[test]
fn test_check_json_output() {
    let output = docschema()
        .args(["check", "--format", "json"])
        .arg(fixture_path("tree_schema.yml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report = parse_json(&output.stdout);
    assert_eq!(report["valid"], true);
    assert_eq!(report["fields"], serde_json::json!(["root"]));
    assert_eq!(report["includes"], serde_json::json!(["node"]));
}

#[test]
fn test_check_invalid_schema() {
    docschema()
        .arg("check")
        .arg(fixture_path("invalid_schema.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("flag"))
        .stderr(predicate::str::contains("not applicable"));
}

#[test]
fn test_check_unresolved_include() {
    docschema()
        .arg("check")
        .arg(fixture_path("unresolved_schema.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("undefined schema 'person'"));
}

#[test]
fn test_check_missing_file() {
    docschema()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_passing_document() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("valid_person.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_reports_every_failure() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("invalid_person.yml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("name: Length of  is less than 1"))
        .stdout(predicate::str::contains("age: 200 is greater than 150"))
        .stdout(predicate::str::contains("does not match pattern"))
        .stdout(predicate::str::contains("role: 'owner' not in"))
        .stdout(predicate::str::contains("address.city: Required field missing"))
        .stdout(predicate::str::contains("friends.0.nickname: Unexpected element"))
        .stdout(predicate::str::contains("Total failures: 6"));
}

#[test]
fn test_validate_json_output() {
    let output = docschema()
        .args(["validate", "--format", "json"])
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("invalid_person.yml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report = parse_json(&output.stdout);
    assert_eq!(report["passed"], false);
    assert_eq!(report["summary"]["failure_count"], 6);

    let failures = report["documents"][0]["failures"].as_array().unwrap();
    let city = failures
        .iter()
        .find(|f| f["reason"] == "Required field missing")
        .expect("missing field failure");
    assert_eq!(city["path"], serde_json::json!(["address", "city"]));
    assert_eq!(city["kind"], "missing_field");
    assert_eq!(city["validator_tag"], "str");

    assert!(report["documents"][0]["stats"]["nodes_visited"].as_u64().unwrap() > 0);
}

#[test]
fn test_validate_multi_document_stream() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("people_stream.yml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(document 1)"))
        .stdout(predicate::str::contains("(document 2)"))
        .stdout(predicate::str::contains("age: -1 is less than 0"))
        .stdout(predicate::str::contains("Documents:      2"))
        .stdout(predicate::str::contains("Failed:         1"));
}

#[test]
fn test_validate_json_and_toml_documents() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("person.json"))
        .arg(fixture_path("person.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("person.json"))
        .stdout(predicate::str::contains("person.toml"));
}

#[test]
fn test_validate_lenient_accepts_extra_keys() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("extra_keys.yml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("nickname: Unexpected element"));

    docschema()
        .args(["validate", "--lenient"])
        .arg(fixture_path("person_schema.yml"))
        .arg(fixture_path("extra_keys.yml"))
        .assert()
        .success();
}

#[test]
fn test_validate_recursive_schema_and_depth_limit() {
    docschema()
        .arg("validate")
        .arg(fixture_path("tree_schema.yml"))
        .arg(fixture_path("deep_tree.yml"))
        .assert()
        .success();

    docschema()
        .args(["validate", "--max-depth", "3"])
        .arg(fixture_path("tree_schema.yml"))
        .arg(fixture_path("deep_tree.yml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Maximum nesting depth of 3 exceeded"));
}

#[test]
fn test_validate_unsupported_document_format() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.txt");
    fs::write(&data, "name: x").unwrap();

    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: txt"));
}

#[test]
fn test_validate_with_generated_files() {
    let temp_dir = TempDir::new().unwrap();
    let schema = temp_dir.path().join("schema.yaml");
    let data = temp_dir.path().join("data.json");

    fs::write(
        &schema,
        "tags: list(str(), int())\nlimits: map(num(max=10))\n",
    )
    .unwrap();
    fs::write(
        &data,
        r#"{"tags": ["a", 1, true], "limits": {"cpu": 2.5, "mem": 12}}"#,
    )
    .unwrap();

    let output = docschema()
        .args(["validate", "-f", "json"])
        .arg(&schema)
        .arg(&data)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report = parse_json(&output.stdout);
    let reasons: Vec<_> = report["documents"][0]["failures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["reason"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        reasons,
        vec![
            "'true' does not match any of (str, int)".to_string(),
            "12 is greater than 10".to_string(),
        ]
    );
}

#[test]
fn test_validate_requires_data_argument() {
    docschema()
        .arg("validate")
        .arg(fixture_path("person_schema.yml"))
        .assert()
        .failure();
}
