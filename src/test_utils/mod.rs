//! Test utilities for cljdeps
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`RecordingHost`], a [`ProjectHost`](crate::host::ProjectHost) that records
//!   what the engine asked of it
//! - fixtures that write jars into a fake local repository and fake
//!   `lein`/`boot` executables with canned output
//! - one-time tracing setup
//!
//! # Example
//!
//! ```rust,no_run
//! use cljdeps_cli::test_utils::{RecordingHost, write_jar};
//! use cljdeps_cli::tool::Tool;
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! write_jar(&temp.path().join("m2/ring/ring/1.7.0/ring-1.7.0.jar"), &["ring/core.clj"]);
//! let host = RecordingHost::new().with_manifests(Tool::Lein, vec![temp.path().join("project.clj")]);
//! ```

mod fixtures;
mod host;

pub use fixtures::write_jar;
#[cfg(unix)]
pub use fixtures::write_tool_script;
pub use host::RecordingHost;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG` when set, otherwise leaves logging off.
///
/// ```bash
/// RUST_LOG=cljdeps_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
