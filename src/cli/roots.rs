//! Print the library roots of the cached mapping.

use super::common::CommandContext;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

#[derive(Args)]
pub struct RootsCommand {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RootEntry {
    path: String,
    url: String,
    entries: usize,
}

impl RootsCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (project, _host) = ctx.open_project()?;

        let Some(cached) = project.cache().read()? else {
            if self.json {
                println!("[]");
            } else {
                println!("No dependency cache for {}", ctx.project_dir().display());
                println!("\n{}", "Tip:".yellow());
                println!("  Run 'cljdeps sync' to resolve dependencies");
            }
            return Ok(());
        };
        project.mapping().replace_all(cached);

        let roots = project.library_roots();
        if self.json {
            let entries: Vec<RootEntry> = roots
                .iter()
                .map(|root| RootEntry {
                    path: root.path().display().to_string(),
                    url: root.url(),
                    entries: root.entries().len(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if roots.is_empty() {
            println!("No resolved jars found in {}", project.locator().repo_root().display());
            return Ok(());
        }
        for root in &roots {
            println!("{}", root.path().display());
        }
        Ok(())
    }
}
