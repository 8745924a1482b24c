//! Open a project the way an editor session does.
//!
//! If the project has a dependency cache, the mapping is restored from it and
//! no build tool runs. Otherwise every manifest is resolved and the cache is
//! created.

use super::common::{CommandContext, print_report};
use crate::resolver::InitOutcome;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (project, _host) = ctx.open_project()?;

        let handle = match project.initialize()? {
            InitOutcome::Restored {
                entries,
                handle,
            } => {
                tracing::info!("Restoring {} entries from {}", entries, project.cache().path().display());
                handle
            }
            InitOutcome::Resolving(handle) => {
                println!("No dependency cache for {}; resolving", ctx.project_dir().display());
                handle
            }
        };

        print_report(&handle.wait().await?);
        Ok(())
    }
}
