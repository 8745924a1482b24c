//! Inspect the project's dependency cache.
//!
//! ```bash
//! cljdeps cache path        # where the cache file lives
//! cljdeps cache show        # manifest -> coordinate lines
//! cljdeps cache show --json
//! cljdeps cache clear       # force the next `init` to resolve from scratch
//! ```

use super::common::CommandContext;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommands,
}

#[derive(Subcommand)]
enum CacheSubcommands {
    /// Print the cached mapping
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the location of the cache file
    Path,
    /// Delete the cache file
    Clear,
}

impl CacheCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (project, _host) = ctx.open_project()?;
        let cache = project.cache();

        match self.command {
            CacheSubcommands::Path => println!("{}", cache.path().display()),
            CacheSubcommands::Show {
                json,
            } => {
                let mapping = cache.read()?.unwrap_or_default();
                if json {
                    println!("{}", serde_json::to_string_pretty(&mapping)?);
                } else if mapping.is_empty() {
                    println!("No dependency cache for {}", ctx.project_dir().display());
                } else {
                    for (manifest, lines) in &mapping {
                        println!("{}", manifest.bold());
                        for line in lines {
                            println!("{line}");
                        }
                    }
                }
            }
            CacheSubcommands::Clear => {
                if cache.clear()? {
                    println!("✅ Removed {}", cache.path().display());
                } else {
                    println!("No dependency cache to remove");
                }
            }
        }
        Ok(())
    }
}
