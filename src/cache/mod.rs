//! Durable store of resolved dependency lines.
//!
//! One cache file per project maps each manifest path to the coordinate lines
//! its build tool printed. The format is plain text so it diffs well and
//! survives format drift by skipping what it does not understand:
//!
//! ```text
//! /work/app/project.clj
//!  [org.clojure/clojure "1.9.0"]
//!    [org.clojure/spec.alpha "0.1.143"]
//! /work/app/modules/api/project.clj
//!  [ring "1.7.0"]
//! ```
//!
//! A line ending with one of the configured key suffixes (`.clj`, `.boot`)
//! starts a block; a line ending with `]` (after trimming trailing whitespace)
//! belongs to the current block; anything else is ignored. Keys are always
//! written in sorted order, so writing the same mapping twice produces
//! byte-identical files.
//!
//! Writes are atomic and serialized across processes through [`CacheLock`].

pub mod lock;

pub use lock::CacheLock;

use crate::constants::{CACHE_FILE_EXTENSION, PROJECTS_CACHE_DIR, PROJECT_ID_LEN};
use crate::core::CljdepsError;
use crate::utils::fs::{atomic_write, project_id};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Ordered manifest-path to coordinate-lines mapping as stored on disk.
pub type CachedMapping = BTreeMap<String, Vec<String>>;

/// Location of the cache file for `project_dir` under `cache_dir`.
#[must_use]
pub fn cache_file_for_project(cache_dir: &Path, project_dir: &Path) -> PathBuf {
    cache_dir
        .join(PROJECTS_CACHE_DIR)
        .join(format!("{}.{}", project_id(project_dir, PROJECT_ID_LEN), CACHE_FILE_EXTENSION))
}

/// A text-file backed dependency cache.
#[derive(Debug, Clone)]
pub struct DependencyCache {
    path: PathBuf,
    key_suffixes: Vec<String>,
}

impl DependencyCache {
    /// Creates a cache at `path` whose key lines end with one of `key_suffixes`.
    pub fn new(path: impl Into<PathBuf>, key_suffixes: Vec<String>) -> Self {
        Self {
            path: path.into(),
            key_suffixes,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the cache. Returns `Ok(None)` when no cache file exists.
    pub fn read(&self) -> Result<Option<CachedMapping>> {
        if !self.exists() {
            return Ok(None);
        }

        let _lock = CacheLock::shared(&self.path)?;
        let bytes = std::fs::read(&self.path).map_err(|e| CljdepsError::CacheReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(self.parse(&String::from_utf8_lossy(&bytes))))
    }

    /// Parses cache text; malformed lines are skipped.
    #[must_use]
    pub fn parse(&self, content: &str) -> CachedMapping {
        let mut mapping = CachedMapping::new();
        let mut key = String::new();
        let mut lines: Vec<String> = Vec::new();

        for raw in content.lines() {
            let line = raw.trim_end();
            if line.ends_with(']') {
                lines.push(line.to_string());
            } else if self.is_key(line) {
                if !key.is_empty() {
                    mapping.insert(std::mem::take(&mut key), std::mem::take(&mut lines));
                }
                // Lines seen before the first key have no owner
                lines.clear();
                key = line.to_string();
            } else if !line.is_empty() {
                tracing::debug!("Skipping malformed cache line: {}", line);
            }
        }

        if !key.is_empty() {
            mapping.insert(key, lines);
        }
        mapping
    }

    /// Serializes `mapping` in the on-disk format.
    #[must_use]
    pub fn render(mapping: &CachedMapping) -> String {
        let mut out = String::new();
        for (key, lines) in mapping {
            out.push_str(key);
            out.push('\n');
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Atomically replaces the cache with `mapping`.
    pub fn write(&self, mapping: &CachedMapping) -> Result<()> {
        let content = Self::render(mapping);
        let write_failed = |e: anyhow::Error| CljdepsError::CacheWriteFailed {
            path: self.path.display().to_string(),
            reason: format!("{e:#}"),
        };

        let _lock = CacheLock::exclusive(&self.path).map_err(write_failed)?;
        atomic_write(&self.path, content.as_bytes()).map_err(write_failed)?;

        tracing::debug!("Wrote {} manifest entries to {}", mapping.len(), self.path.display());
        Ok(())
    }

    /// Deletes the cache file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        let _lock = CacheLock::exclusive(&self.path)?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CljdepsError::IoError(e).into()),
        }
    }

    fn is_key(&self, line: &str) -> bool {
        self.key_suffixes.iter().any(|suffix| line.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(dir: &Path) -> DependencyCache {
        DependencyCache::new(dir.join("projects").join("p.deps"), vec![".clj".into(), ".boot".into()])
    }

    fn sample() -> CachedMapping {
        let mut mapping = CachedMapping::new();
        mapping.insert(
            "/work/b/project.clj".to_string(),
            vec![" [ring \"1.7.0\"]".to_string(), "   [ring/ring-core \"1.7.0\"]".to_string()],
        );
        mapping.insert("/work/a/build.boot".to_string(), vec![" [org.clojure/clojure \"1.9.0\"]".to_string()]);
        mapping.insert("/work/c/project.clj".to_string(), Vec::new());
        mapping
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(temp.path());

        cache.write(&sample()).unwrap();
        assert_eq!(cache.read().unwrap(), Some(sample()));
    }

    #[test]
    fn test_missing_file_reads_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(cache_in(temp.path()).read().unwrap(), None);
    }

    #[test]
    fn test_render_sorts_keys() {
        let rendered = DependencyCache::render(&sample());
        assert_eq!(
            rendered,
            "/work/a/build.boot\n [org.clojure/clojure \"1.9.0\"]\n\
             /work/b/project.clj\n [ring \"1.7.0\"]\n   [ring/ring-core \"1.7.0\"]\n\
             /work/c/project.clj\n"
        );
    }

    #[test]
    fn test_write_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(temp.path());

        cache.write(&sample()).unwrap();
        let first = std::fs::read(cache.path()).unwrap();
        cache.write(&sample()).unwrap();
        let second = std::fs::read(cache.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_skips_malformed_and_orphan_lines() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(temp.path());
        let content = " [orphan \"1\"]\n\
                       garbage line\n\
                       /p/project.clj\n\
                       \t[a \"1\"]   \n\
                       not a coordinate\n\
                       \n\
                       /q/project.clj\n";

        let mapping = cache.parse(content);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["/p/project.clj"], vec!["\t[a \"1\"]".to_string()]);
        assert!(mapping["/q/project.clj"].is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(temp.path());
        cache.write(&sample()).unwrap();

        assert!(cache.clear().unwrap());
        assert!(!cache.exists());
        assert!(!cache.clear().unwrap());
    }

    #[test]
    fn test_cache_file_for_project_is_stable() {
        let temp = TempDir::new().unwrap();
        let a = cache_file_for_project(Path::new("/cache"), temp.path());
        let b = cache_file_for_project(Path::new("/cache"), temp.path());
        assert_eq!(a, b);
        assert!(a.starts_with("/cache/projects"));
        assert_eq!(a.extension().unwrap(), "deps");
    }
}
