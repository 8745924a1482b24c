//! Common test utilities for cljdeps integration tests
//!
//! Every [`TestProject`] lives in its own temp dir with a private cache
//! directory, local repository and config file, so tests never touch the
//! user's `~/.m2` or `~/.cljdeps` and never launch a real JVM.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for both tools when a test does not install a fake one.
pub const MISSING_TOOL: &str = "cljdeps-test-no-such-tool deps";

pub struct TestProject {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    cache_dir: PathBuf,
    repo_dir: PathBuf,
    tools_dir: PathBuf,
    config_path: PathBuf,
    lein: String,
    boot: String,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().join("project");
        let cache_dir = temp_dir.path().join("cache");
        let repo_dir = temp_dir.path().join("m2");
        let tools_dir = temp_dir.path().join("tools");
        let config_path = temp_dir.path().join("config.toml");
        fs::create_dir_all(&project_dir).unwrap();

        let project = Self {
            _temp_dir: temp_dir,
            project_dir,
            cache_dir,
            repo_dir,
            tools_dir,
            config_path,
            lein: MISSING_TOOL.to_string(),
            boot: MISSING_TOOL.to_string(),
        };
        project.write_config();
        project
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_dir
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_dir
    }

    /// Writes a file relative to the project root and returns its path.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_lein_project(&self, relative_dir: &str) -> PathBuf {
        let relative = if relative_dir.is_empty() {
            "project.clj".to_string()
        } else {
            format!("{relative_dir}/project.clj")
        };
        self.write_file(&relative, "(defproject example \"0.1.0-SNAPSHOT\")\n")
    }

    /// Installs a fake `lein` printing `stdout`.
    #[cfg(unix)]
    pub fn fake_lein(&mut self, stdout: &str, exit_code: i32) {
        let script =
            cljdeps_cli::test_utils::write_tool_script(&self.tools_dir, "lein", stdout, exit_code);
        self.lein = format!("{} deps :tree", script.display());
        self.write_config();
    }

    /// Installs a fake `boot` printing `stdout`.
    #[cfg(unix)]
    pub fn fake_boot(&mut self, stdout: &str) {
        let script = cljdeps_cli::test_utils::write_tool_script(&self.tools_dir, "boot", stdout, 0);
        self.boot = format!("{} --no-colors show --deps", script.display());
        self.write_config();
    }

    /// Writes an empty-ish jar at the Maven location of `group/artifact/version`.
    pub fn add_jar(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        let path = self
            .repo_dir
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
            .join(format!("{artifact}-{version}.jar"));
        cljdeps_cli::test_utils::write_jar(&path, &["META-INF/MANIFEST.MF"]);
        path
    }

    /// The cache file the CLI reports for this project.
    pub fn cache_file(&self) -> PathBuf {
        let output = self.command().args(["cache", "path"]).output().unwrap();
        assert!(output.status.success());
        PathBuf::from(String::from_utf8_lossy(&output.stdout).trim())
    }

    /// `cljdeps` with an isolated environment, run from the project root.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cljdeps").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("CLJDEPS_CACHE_DIR", &self.cache_dir)
            .env("CLJDEPS_LOCAL_REPO", &self.repo_dir)
            .env("CLJDEPS_CONFIG", &self.config_path)
            .env("CLJDEPS_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_config(&self) {
        let content = format!(
            "[tools]\nlein = {}\nboot = {}\n",
            toml_string(&self.lein),
            toml_string(&self.boot)
        );
        fs::write(&self.config_path, content).unwrap();
    }
}

fn toml_string(value: &str) -> String {
    format!("'{value}'")
}
