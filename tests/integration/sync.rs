use crate::LEIN_TREE;
use crate::common::TestProject;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_sync_all_writes_sorted_cache() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("lib");
    project.write_lein_project("app");

    project
        .command()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 2 manifest file(s), 6 coordinate(s)"));

    let content = fs::read_to_string(project.cache_file()).unwrap();
    let app = content.find("app/project.clj\n").unwrap();
    let lib = content.find("lib/project.clj\n").unwrap();
    assert!(app < lib);
    assert!(content.contains(
        "app/project.clj\n [org.clojure/clojure \"1.9.0\"]\n   [org.clojure/spec.alpha \"0.1.143\"]\n [ring \"1.7.0\"]\n"
    ));
    assert!(!content.contains("Retrieving"));
}

#[test]
fn test_repeated_sync_is_byte_identical() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.write_lein_project("modules/api");

    project.command().arg("sync").assert().success();
    let first = fs::read(project.cache_file()).unwrap();
    project.command().arg("sync").assert().success();
    let second = fs::read(project.cache_file()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sync_selected_keeps_other_entries() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    let app = project.write_lein_project("app");
    project.write_lein_project("lib");
    project.command().arg("sync").assert().success();

    project.fake_lein(" [compojure \"1.6.1\"]\n", 0);
    project
        .command()
        .arg("sync")
        .arg(&app)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 manifest file(s), 1 coordinate(s)"));

    let content = fs::read_to_string(project.cache_file()).unwrap();
    assert!(content.contains("app/project.clj\n [compojure \"1.6.1\"]\n"));
    assert!(content.contains("lib/project.clj\n [org.clojure/clojure \"1.9.0\"]\n"));
}

#[test]
fn test_sync_selected_skips_non_manifests() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    let manifest = project.write_lein_project("");
    let source = project.write_file("src/example/core.clj", "(ns example.core)\n");

    project
        .command()
        .arg("sync")
        .arg(&manifest)
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 manifest file(s)"));

    let content = fs::read_to_string(project.cache_file()).unwrap();
    assert!(!content.contains("core.clj"));
}

#[test]
fn test_boot_projects_use_boot() {
    let mut project = TestProject::new();
    project.fake_boot("[adzerk/boot-test \"1.2.0\"]\n\u{2514}\u{2500}\u{2500} [org.clojure/tools.namespace \"0.2.11\"]\n");
    project.write_file("build.boot", "(set-env! :dependencies '[[adzerk/boot-test \"1.2.0\"]])\n");

    project.command().arg("sync").assert().success();

    let content = fs::read_to_string(project.cache_file()).unwrap();
    assert!(content.contains("build.boot\n[adzerk/boot-test \"1.2.0\"]\n    [org.clojure/tools.namespace \"0.2.11\"]\n"));
}

#[test]
fn test_failing_tool_keeps_partial_output() {
    let mut project = TestProject::new();
    project.fake_lein(" [org.clojure/clojure \"1.9.0\"]\nCould not find artifact ring:ring:jar:9.9\n", 1);
    project.write_lein_project("");

    project
        .command()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 coordinate(s)"));
}

#[test]
fn test_missing_tool_stores_empty_entry() {
    let project = TestProject::new();
    project.write_lein_project("");

    project
        .command()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 manifest file(s), 0 coordinate(s)"));

    let content = fs::read_to_string(project.cache_file()).unwrap();
    assert!(content.ends_with("project.clj\n"));
}

#[test]
fn test_target_directories_are_not_synced() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.write_lein_project("target/stale");

    project
        .command()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 manifest file(s)"));
}
