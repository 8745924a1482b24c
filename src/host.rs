//! The embedding environment.
//!
//! The resolution engine does not own a project model. Whatever hosts it (an IDE
//! plugin, the `cljdeps` CLI, a test) implements [`ProjectHost`] to list manifest
//! files, to signal when resolution may start, and to receive the
//! "library roots changed" notification after every completed cycle.
//!
//! [`FsProjectHost`] is the host used by the CLI: it discovers manifests by
//! walking the project directory and counts notifications.

use crate::constants::DEFAULT_SKIP_DIRS;
use crate::tool::Tool;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

/// Collaborator interface of the embedding environment.
pub trait ProjectHost: Send + Sync {
    /// Absolute paths of every manifest file of `tool` in the project.
    fn list_manifest_files(&self, tool: Tool) -> Vec<PathBuf>;

    /// Blocks until the host can tolerate a resolution run (e.g. indexing finished).
    ///
    /// Called once per run, on a blocking thread.
    fn wait_until_ready(&self) {}

    /// The resolved classpath changed; recompute library roots.
    ///
    /// Called from the roots-change queue, never concurrently with itself.
    fn notify_library_roots_changed(&self);
}

/// Filesystem-backed host rooted at a project directory.
pub struct FsProjectHost {
    root: PathBuf,
    skip_dirs: Vec<String>,
    notifications: AtomicUsize,
}

impl FsProjectHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| (*s).to_string()).collect(),
            notifications: AtomicUsize::new(0),
        }
    }

    /// Replaces the directory names skipped during discovery.
    #[must_use]
    pub fn with_skip_dirs(mut self, skip_dirs: Vec<String>) -> Self {
        self.skip_dirs = skip_dirs;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How many times library roots were reported as changed.
    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.load(Ordering::SeqCst)
    }

    fn is_skipped(&self, entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || self.skip_dirs.iter().any(|skip| *skip == name)
    }
}

impl ProjectHost for FsProjectHost {
    fn list_manifest_files(&self, tool: Tool) -> Vec<PathBuf> {
        let wanted = tool.manifest_file_name();
        let mut found: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_skipped(entry))
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == wanted)
            .map(walkdir::DirEntry::into_path)
            .collect();
        found.sort();
        tracing::debug!("Found {} {} files under {}", found.len(), wanted, self.root.display());
        found
    }

    fn notify_library_roots_changed(&self) {
        let count = self.notifications.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("Library roots changed for {} (#{count})", self.root.display());
    }
}
