use predicates::prelude::*;
use rcengine::test_utils::TestProject;

use super::rcengine;

#[test]
fn test_list_text() {
    let project = TestProject::new().unwrap();
    project.write_resource("about", "main:\n  - raw: a\n  - raw: b\n").unwrap();
    project.write_file("resources/index/resource.yml", "main:\n  - raw: i\n").unwrap();

    rcengine(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("about (2 operation(s))"))
        .stdout(predicate::str::contains("index (1 operation(s))"));
}

#[test]
fn test_list_json() {
    let project = TestProject::new().unwrap();
    project.write_resource("about", "main:\n  - raw: a\n").unwrap();

    let output = rcengine(&project).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!([{"name": "about", "operations": 1}]));
}

#[test]
fn test_list_empty_project() {
    let project = TestProject::new().unwrap();

    rcengine(&project).arg("list").assert().success().stdout("No resources found.\n");
}
