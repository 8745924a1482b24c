//! Opening jars as browsable archive roots.

use crate::core::CljdepsError;
use anyhow::{Context, Result};
use dashmap::DashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// An opened jar: its location plus the entry names it contains.
///
/// Cloning is cheap; the entry list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRoot {
    path: PathBuf,
    entries: Arc<[String]>,
}

impl ArchiveRoot {
    pub fn new(path: impl Into<PathBuf>, entries: Vec<String>) -> Self {
        Self {
            path: path.into(),
            entries: entries.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// `jar://` URL of the archive root, the form IDEs use for library roots.
    #[must_use]
    pub fn url(&self) -> String {
        format!("jar://{}!/", self.path.display())
    }
}

/// Filesystem collaborator that turns a jar path into an [`ArchiveRoot`].
pub trait ArchiveOpener: Send + Sync {
    /// Refreshes and opens `path`. Fails when the file is unreadable or not an archive.
    fn open(&self, path: &Path) -> Result<ArchiveRoot>;
}

/// Default opener reading jars with the `zip` crate.
///
/// Opened roots are cached by path and reopened when the file's modification
/// time changes.
#[derive(Default)]
pub struct ZipArchiveOpener {
    cache: DashMap<PathBuf, (Option<SystemTime>, ArchiveRoot)>,
}

impl ZipArchiveOpener {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(path: &Path) -> Result<Vec<String>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let archive = zip::ZipArchive::new(file).map_err(|e| CljdepsError::ArchiveOpenFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(archive.file_names().map(str::to_string).collect())
    }
}

impl ArchiveOpener for ZipArchiveOpener {
    fn open(&self, path: &Path) -> Result<ArchiveRoot> {
        let modified = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .modified()
            .ok();

        if let Some(entry) = self.cache.get(path) {
            let (cached_modified, root) = entry.value();
            if *cached_modified == modified && modified.is_some() {
                return Ok(root.clone());
            }
        }

        let mut entries = Self::read_entries(path)?;
        entries.sort();
        let root = ArchiveRoot::new(path, entries);
        self.cache.insert(path.to_path_buf(), (modified, root.clone()));
        Ok(root)
    }
}
