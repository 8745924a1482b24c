use crate::LEIN_TREE;
use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_roots_without_cache() {
    let project = TestProject::new();
    project
        .command()
        .arg("roots")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cache"));
    project.command().args(["roots", "--json"]).assert().success().stdout("[]\n");
}

#[test]
fn test_roots_lists_each_present_jar_once() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("app");
    project.write_lein_project("lib");
    let clojure = project.add_jar("org.clojure", "clojure", "1.9.0");
    let spec = project.add_jar("org.clojure", "spec.alpha", "0.1.143");
    project.command().arg("sync").assert().success();

    let output = project.command().arg("roots").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines, vec![clojure.display().to_string(), spec.display().to_string()]);
    assert!(!stdout.contains("ring-1.7.0.jar"));
}

#[test]
fn test_roots_json_output() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.add_jar("ring", "ring", "1.7.0");
    project.command().arg("sync").assert().success();

    let output = project.command().args(["roots", "--json"]).output().unwrap();
    assert!(output.status.success());
    let roots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(roots.len(), 1);
    let url = roots[0]["url"].as_str().unwrap();
    assert!(url.starts_with("jar://"));
    assert!(url.ends_with("ring-1.7.0.jar!/"));
    assert_eq!(roots[0]["entries"], 1);
}

#[test]
fn test_roots_without_jars() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.command().arg("sync").assert().success();

    project
        .command()
        .arg("roots")
        .assert()
        .success()
        .stdout(predicate::str::contains("No resolved jars found"));
}
