//! Command-line interface for cljdeps.
//!
//! # Available Commands
//!
//! - `sync [FILES...]` - resolve the given manifests, or the whole project
//! - `init` - restore the classpath from the cache, resolving only if there is none
//! - `roots` - list the jars the current mapping resolves to
//! - `cache show | path | clear` - inspect the project's dependency cache
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - log level (debug / error; default warn, `RUST_LOG` honored)
//! - `--config` - path to the global config file
//! - `--project-dir` - project root (default: current directory)
//! - `--no-progress` - disable the progress bar
//!
//! # Example
//!
//! ```bash
//! cljdeps init
//! cljdeps sync modules/api/project.clj
//! cljdeps roots --json
//! ```

mod cache;
mod common;
mod init;
mod roots;
mod sync;

pub use common::CommandContext;

use crate::config::GlobalConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter forced by `--verbose`/`--quiet`. `None` defers to `RUST_LOG`.
    pub log_level: Option<String>,

    pub no_progress: bool,

    /// Explicit global config file.
    pub config_path: Option<PathBuf>,

    /// Project root; the current directory when `None`.
    pub project_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global tracing subscriber, writing to stderr.
    ///
    /// Precedence: the forced level, then `RUST_LOG`, then `warn`.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Background dependency resolution for Leiningen and Boot projects.
#[derive(Parser)]
#[command(
    name = "cljdeps",
    about = "Resolve Leiningen and Boot dependencies into library roots",
    version,
    long_about = "cljdeps runs `lein deps :tree` or `boot show --deps` for every manifest in a project, \
                  maps the reported coordinates to jars in the local Maven repository and caches the \
                  result so the classpath can be restored without starting a JVM."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file.
    #[arg(short, long, global = true, env = "CLJDEPS_CONFIG")]
    config: Option<PathBuf>,

    /// Project root directory.
    #[arg(short, long, global = true)]
    project_dir: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve dependencies of the given manifests, or of every manifest in the project.
    Sync(sync::SyncCommand),

    /// Restore the mapping from the cache, or resolve everything when there is none.
    Init(init::InitCommand),

    /// Print the jars the cached mapping resolves to.
    Roots(roots::RootsCommand),

    /// Inspect or clear the project's dependency cache.
    Cache(cache::CacheCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translates the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
            project_dir: self.project_dir.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;
        let project_dir = match config.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let ctx = CommandContext::new(project_dir, global, !config.no_progress);

        match self.command {
            Commands::Sync(cmd) => cmd.execute(&ctx).await,
            Commands::Init(cmd) => cmd.execute(&ctx).await,
            Commands::Roots(cmd) => cmd.execute(&ctx).await,
            Commands::Cache(cmd) => cmd.execute(&ctx).await,
        }
    }
}
