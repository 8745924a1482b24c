//! Resolve dependencies now.
//!
//! With file arguments only those manifests are re-resolved and the rest of
//! the cached mapping is kept. Without arguments every manifest of the project
//! is discovered and resolved from scratch.
//!
//! ```bash
//! cljdeps sync                          # whole project
//! cljdeps sync project.clj api/build.boot
//! ```

use super::common::{CommandContext, print_report};
use crate::actions;
use crate::core::CljdepsError;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SyncCommand {
    /// Manifest files to re-resolve (default: all)
    files: Vec<PathBuf>,
}

impl SyncCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (project, _host) = ctx.open_project()?;

        // Keep the entries of manifests not named on the command line
        if let Some(cached) = project.cache().read()? {
            project.mapping().replace_all(cached);
        }

        let handle = if self.files.is_empty() {
            actions::sync_all(&project)?
        } else {
            let files: Vec<PathBuf> = self
                .files
                .into_iter()
                .map(|file| std::path::absolute(&file).unwrap_or(file))
                .collect();
            actions::sync_selected(&project, &files)?
        };

        let report = handle.wait().await?;
        if report.files_total == 0 {
            return Err(CljdepsError::NoManifestFiles.into());
        }
        print_report(&report);
        Ok(())
    }
}
