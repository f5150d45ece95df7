use predicates::prelude::*;
use rcengine::test_utils::TestProject;

use super::rcengine;

#[test]
fn test_validate_all_valid() {
    let project = TestProject::new().unwrap();
    project
        .write_resource("page", "main:\n  - md: ~\n    with:\n      - raw: \"# hi\"\n  - out: raw\n")
        .unwrap();

    rcengine(&project)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ page"));
}

#[test]
fn test_validate_reports_nested_unknown_directive() {
    let project = TestProject::new().unwrap();
    project.write_resource("good", "main:\n  - raw: a\n").unwrap();
    project
        .write_resource("bad", "main:\n  - md: ~\n    with:\n      - bogus: 1\n")
        .unwrap();

    rcengine(&project)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("✓ good"))
        .stdout(predicate::str::contains("✗ bad: Unknown directive 'bogus'"))
        .stderr(predicate::str::contains("1 of 2 resource(s) failed validation"));
}

#[test]
fn test_validate_selected_names_json() {
    let project = TestProject::new().unwrap();
    project.write_resource("good", "main:\n  - raw: a\n").unwrap();
    project.write_resource("bad", "main:\n  - out: xml\n").unwrap();

    let output = rcengine(&project)
        .args(["validate", "good", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valid"], serde_json::json!(true));
    assert_eq!(value["resources"].as_array().unwrap().len(), 1);
}
