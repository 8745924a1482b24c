use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let project = TestProject::new();
    project
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("roots"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_sync_without_manifests_fails() {
    let project = TestProject::new();
    project
        .command()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project.clj or build.boot files found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_sync_selection_without_manifest_fails() {
    let project = TestProject::new();
    project.write_lein_project("");
    let notes = project.write_file("notes.md", "# notes\n");

    project
        .command()
        .arg("sync")
        .arg(&notes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project.clj or build.boot files found"));
}

#[test]
fn test_unknown_config_field_is_reported() {
    let project = TestProject::new();
    let config = project.write_file("bad-config.toml", "unknown_setting = 1\n");

    project
        .command()
        .args(["cache", "path", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let project = TestProject::new();
    project.command().args(["-v", "-q", "cache", "path"]).assert().failure();
}

#[test]
fn test_project_dir_flag_selects_project() {
    let project = TestProject::new();
    let nested = project.project_path().join("nested");
    std::fs::create_dir_all(&nested).unwrap();

    let from_root = project.cache_file();
    let output = project
        .command()
        .args(["cache", "path", "--project-dir"])
        .arg(&nested)
        .output()
        .unwrap();
    let from_nested = String::from_utf8_lossy(&output.stdout).trim().to_string();

    assert!(output.status.success());
    assert_ne!(from_root.display().to_string(), from_nested);
}
