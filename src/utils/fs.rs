//! File system helpers.
//!
//! Writes that must survive interruption go through [`atomic_write`]: the
//! content is written and synced to a temporary file in the destination
//! directory, then renamed over the target. A crash at any point leaves either
//! the old file or the new one, never a truncated mix.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Creates `path` and its parents if missing.
///
/// Fails when `path` exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Atomically replaces `path` with `content`, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_dir(&parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Stable identifier of a project directory.
///
/// The canonical path (or the path as given when it cannot be canonicalized) is
/// hashed with SHA-256 and the first `len` hex characters are returned.
#[must_use]
pub fn project_id(project_dir: &Path, len: usize) -> String {
    let canonical = canonical_or_given(project_dir);
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(len);
    id
}

fn canonical_or_given(path: &Path) -> PathBuf {
    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    // Strip the verbatim prefix Windows adds so ids match across call sites
    #[cfg(windows)]
    {
        let s = canonical.to_string_lossy();
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a").join("b").join("file.txt");

        atomic_write(&target, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_atomic_write_replaces_and_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file.txt");

        atomic_write(&target, b"one").unwrap();
        atomic_write(&target, b"two").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "two");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn test_project_id_is_stable() {
        let temp = TempDir::new().unwrap();
        let a = project_id(temp.path(), 16);
        let b = project_id(&temp.path().join("."), 16);
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);
        assert_ne!(a, project_id(&temp.path().join("other"), 16));
    }
}
