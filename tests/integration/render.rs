use predicates::prelude::*;
use rcengine::test_utils::TestProject;

use super::rcengine;

fn site() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write_content("pages/intro.md", "# Welcome\n\nHello *there*.\n").unwrap();
    project.write_content("templates/card.njk", "<div>{{ title }}</div>").unwrap();
    project
        .write_resource(
            "index",
            r#"
main:
  - md: ~
    with:
      - file: { path: pages, name: intro.md }
  - njk: { path: templates, name: card.njk }
    with:
      - raw: { title: Card }
      - out: first_serve
"#,
        )
        .unwrap();
    project
}

#[test]
fn test_render_from_disk() {
    let project = site();

    rcengine(&project)
        .args(["render", "index"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Welcome</h1>"))
        .stdout(predicate::str::contains("<em>there</em>"))
        .stdout(predicate::str::contains("<div>Card</div>"));
}

#[test]
fn test_render_directory_definition_with_input() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "resources/pick/resource.yml",
            "main:\n  - raw: { a: first, b: second }\n    as: ~\n  - out: property\n",
        )
        .unwrap();

    rcengine(&project)
        .args(["render", "pick", "--input", "\"b\""])
        .assert()
        .success()
        .stdout("second\n");
}

#[test]
fn test_render_structured_output() {
    let project = TestProject::new().unwrap();
    project
        .write_resource("data", "main:\n  - yml: ~\n    with: { raw: \"n: 1\" }\n  - out: first_serve\n")
        .unwrap();

    rcengine(&project)
        .args(["render", "data", "--pretty"])
        .assert()
        .success()
        .stdout("{\n  \"n\": 1\n}\n");
}

#[test]
fn test_render_custom_folders() {
    let project = TestProject::new().unwrap();
    project.write_config("[folders]\nfile = \"content\"\nrc = \"defs\"\n").unwrap();
    project.write_file("content/a.txt", "from content").unwrap();
    project.write_file("defs/page.yml", "main:\n  - file: { name: a.txt }\n").unwrap();

    rcengine(&project)
        .args(["render", "page"])
        .assert()
        .success()
        .stdout("from content\n");
}

#[test]
fn test_render_unknown_resource_fails() {
    let project = site();

    rcengine(&project)
        .args(["render", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_render_duplicate_primary_fails() {
    let project = TestProject::new().unwrap();
    project.write_resource("bad", "main:\n  - raw: a\n    md: ~\n").unwrap();

    rcengine(&project)
        .args(["render", "bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one primary directive"));
}

#[test]
fn test_render_invalid_input_json() {
    let project = site();

    rcengine(&project)
        .args(["render", "index", "--input", "{"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}
