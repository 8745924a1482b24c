//! cljdeps - background dependency resolution for Clojure build tools
//!
//! This crate resolves the transitive dependencies of Leiningen (`project.clj`) and
//! Boot (`build.boot`) projects by running the build tool's own dependency-listing
//! command, maps every reported coordinate to a jar in the local Maven repository,
//! and persists the result so later sessions can restore the classpath without
//! launching a JVM.
//!
//! # Architecture
//!
//! The pipeline is split into small leaf modules and one orchestrator:
//!
//! - [`coordinate`] - lexer and parser for `[group/artifact "version"]` expressions
//! - [`locator`] - maps a coordinate to a jar in the local repository and opens it
//! - [`invoker`] - runs `lein deps :tree` / `boot show --deps` and filters its output
//! - [`cache`] - durable, sorted text store of manifest path to coordinate lines
//! - [`resolver`] - the coordinator: background runs, busy flag, reindex scheduling
//! - [`host`] - collaborator traits for the embedding environment
//! - [`actions`] - enablement rules for the two user-facing sync triggers
//!
//! Supporting modules provide configuration ([`config`]), error types ([`core`]),
//! the command line interface ([`cli`]) and filesystem/progress helpers ([`utils`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use cljdeps_cli::host::FsProjectHost;
//! use cljdeps_cli::resolver::ProjectContext;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let host = Arc::new(FsProjectHost::new("/path/to/project"));
//! let ctx = ProjectContext::builder("/path/to/project", host).build()?;
//!
//! let report = ctx.resolve_all()?.wait().await?;
//! println!("resolved {} manifest files", report.files_resolved);
//!
//! for root in ctx.library_roots() {
//!     println!("{}", root.path().display());
//! }
//! # Ok(())
//! # }
//! ```

// Core pipeline
pub mod cache;
pub mod coordinate;
pub mod invoker;
pub mod locator;
pub mod resolver;

// Embedding surface
pub mod actions;
pub mod cli;
pub mod host;
pub mod tool;

// Supporting modules
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
