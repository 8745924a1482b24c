//! Mapping coordinates to jars in the local Maven repository.
//!
//! Given a [`Coordinate`], [`ArtifactLocator`] computes
//! `<repo>/<group_path>/<artifact>/<version>/<artifact>-<version>.jar`, checks
//! that it exists and asks an [`ArchiveOpener`] to open it as an archive root.
//! Every failure is logged and reported as `None`; locating never errors.
//!
//! The locator only reads. It holds no state besides the repository root and
//! the opener, so it can be shared freely between threads.

mod archive;

pub use archive::{ArchiveOpener, ArchiveRoot, ZipArchiveOpener};

use crate::coordinate::{Coordinate, parse_coordinate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves coordinates to opened jar archives.
#[derive(Clone)]
pub struct ArtifactLocator {
    repo_root: PathBuf,
    opener: Arc<dyn ArchiveOpener>,
}

impl std::fmt::Debug for ArtifactLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactLocator").field("repo_root", &self.repo_root).finish()
    }
}

impl ArtifactLocator {
    /// Creates a locator over `repo_root` using the default zip opener.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self::with_opener(repo_root, Arc::new(ZipArchiveOpener::new()))
    }

    pub fn with_opener(repo_root: impl Into<PathBuf>, opener: Arc<dyn ArchiveOpener>) -> Self {
        Self {
            repo_root: repo_root.into(),
            opener,
        }
    }

    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Expected location of the coordinate's jar.
    #[must_use]
    pub fn jar_path(&self, coordinate: &Coordinate) -> PathBuf {
        self.repo_root.join(coordinate.repository_dir()).join(coordinate.jar_file_name())
    }

    /// Locates and opens the jar for `coordinate`.
    ///
    /// Returns `None` when the jar is missing or cannot be opened.
    pub fn locate(&self, coordinate: &Coordinate) -> Option<ArchiveRoot> {
        let path = self.jar_path(coordinate);
        if !path.is_file() {
            info!("Artifact {} not found at {}", coordinate, path.display());
            return None;
        }

        match self.opener.open(&path) {
            Ok(root) => Some(root),
            Err(e) => {
                info!("Artifact {} could not be opened: {:#}", coordinate, e);
                None
            }
        }
    }

    /// Parses a raw coordinate expression and locates it.
    ///
    /// Unparseable expressions are skipped with a debug log.
    pub fn locate_expression(&self, expression: &str) -> Option<ArchiveRoot> {
        let Some(coordinate) = parse_coordinate(expression) else {
            debug!("Skipping unparseable coordinate: {}", expression.trim());
            return None;
        };
        self.locate(&coordinate)
    }
}
