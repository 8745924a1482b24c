//! Filesystem and progress helpers shared across modules.

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, project_id};
pub use progress::ProgressBar;
