//! Shared setup and output for CLI commands.

use crate::config::GlobalConfig;
use crate::host::{FsProjectHost, ProjectHost};
use crate::resolver::{ProjectContext, RunKind, RunReport};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs to open the project.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_dir: PathBuf,
    config: GlobalConfig,
    show_progress: bool,
}

impl CommandContext {
    pub fn new(project_dir: PathBuf, config: GlobalConfig, show_progress: bool) -> Self {
        let project_dir = std::path::absolute(&project_dir).unwrap_or(project_dir);
        Self {
            project_dir,
            config,
            show_progress,
        }
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Builds the project's resolution context over a filesystem host.
    pub fn open_project(&self) -> Result<(ProjectContext, Arc<FsProjectHost>)> {
        let mut host = FsProjectHost::new(&self.project_dir);
        if let Some(skip_dirs) = &self.config.skip_dirs {
            host = host.with_skip_dirs(skip_dirs.clone());
        }
        let host = Arc::new(host);
        let project_host: Arc<dyn ProjectHost> = host.clone();

        let ctx = ProjectContext::builder(&self.project_dir, project_host)
            .config(self.config.clone())
            .show_progress(self.show_progress)
            .build()?;
        Ok((ctx, host))
    }
}

/// Prints the outcome of a run.
pub fn print_report(report: &RunReport) {
    let verb = match report.kind {
        RunKind::Restored => "Restored",
        RunKind::Full | RunKind::Partial => "Resolved",
    };
    println!(
        "✅ {} {} manifest file(s), {} coordinate(s)",
        verb,
        report.files_resolved.to_string().bold(),
        report.coordinates
    );
    if report.files_skipped > 0 {
        println!("   Skipped {} file(s) that are not project.clj or build.boot", report.files_skipped);
    }
    if report.kind != RunKind::Restored && !report.cache_written {
        println!("{} dependency cache was not written; run with --verbose for details", "Warning:".yellow());
    }
}
