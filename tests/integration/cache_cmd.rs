use crate::common::TestProject;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cache_path_is_under_cache_dir() {
    let project = TestProject::new();
    let path = project.cache_file();

    assert!(path.starts_with(project.cache_path().join("projects")));
    assert_eq!(path.extension().unwrap(), "deps");
}

#[test]
fn test_cache_show_and_clear_without_cache() {
    let project = TestProject::new();
    project
        .command()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cache"));
    project.command().args(["cache", "show", "--json"]).assert().success().stdout("{}\n");
    project
        .command()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cache to remove"));
}

#[test]
fn test_cache_show_after_sync() {
    let project = TestProject::new();
    let manifest = project.write_lein_project("");
    let cache_file = project.cache_file();
    fs::create_dir_all(cache_file.parent().unwrap()).unwrap();
    fs::write(&cache_file, format!("{}\n [ring \"1.7.0\"]\n", manifest.display())).unwrap();

    project
        .command()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project.clj"))
        .stdout(predicate::str::contains(" [ring \"1.7.0\"]"));

    let output = project.command().args(["cache", "show", "--json"]).output().unwrap();
    let mapping: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(mapping[manifest.display().to_string()][0], " [ring \"1.7.0\"]");

    project.command().args(["cache", "clear"]).assert().success();
    assert!(!cache_file.exists());
}
