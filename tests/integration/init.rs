use crate::LEIN_TREE;
use crate::common::TestProject;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cold_init_resolves_and_creates_cache() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");

    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cache"))
        .stdout(predicate::str::contains("Resolved 1 manifest file(s), 3 coordinate(s)"));

    assert!(project.cache_file().is_file());
}

#[test]
fn test_init_restores_without_running_tools() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.command().arg("sync").assert().success();
    let before = fs::read(project.cache_file()).unwrap();

    // A restore must not consult the build tool at all
    project.fake_lein("", 1);
    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 manifest file(s), 3 coordinate(s)"));

    assert_eq!(fs::read(project.cache_file()).unwrap(), before);
}

#[test]
fn test_init_after_cache_clear_resolves_again() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    project.write_lein_project("");
    project.command().arg("init").assert().success();

    project.command().args(["cache", "clear"]).assert().success();
    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 manifest file(s)"));
}

#[test]
fn test_init_ignores_malformed_cache_lines() {
    let mut project = TestProject::new();
    project.fake_lein(LEIN_TREE, 0);
    let manifest = project.write_lein_project("");
    let cache_file = project.cache_file();
    fs::create_dir_all(cache_file.parent().unwrap()).unwrap();
    fs::write(
        &cache_file,
        format!("garbage\n{}\n [ring \"1.7.0\"]\nhalf a line [\n", manifest.display()),
    )
    .unwrap();

    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 manifest file(s), 1 coordinate(s)"));
}
