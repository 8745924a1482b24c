//! File locking for dependency cache files.
//!
//! Two IDE windows or CLI invocations may share one cache directory. Writers
//! take an exclusive lock on a sibling `<cache>.lock` file, readers a shared
//! one. Locks are released when the [`CacheLock`] is dropped.

use crate::core::{FileOperation, FileResultExt};
use anyhow::Result;
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// A held lock on a cache file.
#[derive(Debug)]
pub struct CacheLock {
    file: File,
    path: PathBuf,
}

impl CacheLock {
    /// Blocks until an exclusive lock for `cache_file` is held.
    pub fn exclusive(cache_file: &Path) -> Result<Self> {
        Self::acquire(cache_file, true)
    }

    /// Blocks until a shared lock for `cache_file` is held.
    pub fn shared(cache_file: &Path) -> Result<Self> {
        Self::acquire(cache_file, false)
    }

    fn acquire(cache_file: &Path, exclusive: bool) -> Result<Self> {
        let path = lock_path_for(cache_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_file_context(
                FileOperation::CreateDir,
                parent,
                "creating cache directory",
            )?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .with_file_context(FileOperation::Write, &path, "opening cache lock file")?;

        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.with_file_context(FileOperation::Lock, &path, "locking dependency cache")?;

        Ok(Self {
            file,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        // Closing the file releases the lock too; unlock explicitly to log failures
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

fn lock_path_for(cache_file: &Path) -> PathBuf {
    let mut name = cache_file.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    cache_file.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_file_is_sibling() {
        let temp = TempDir::new().unwrap();
        let cache_file = temp.path().join("projects").join("abc.deps");

        let lock = CacheLock::exclusive(&cache_file).unwrap();
        assert_eq!(lock.path(), temp.path().join("projects").join("abc.deps.lock"));
        assert!(lock.path().exists());
    }

    #[test]
    fn test_shared_locks_coexist() {
        let temp = TempDir::new().unwrap();
        let cache_file = temp.path().join("abc.deps");

        let _a = CacheLock::shared(&cache_file).unwrap();
        let _b = CacheLock::shared(&cache_file).unwrap();
    }

    #[test]
    fn test_exclusive_lock_blocks_until_released() {
        let temp = TempDir::new().unwrap();
        let cache_file = Arc::new(temp.path().join("abc.deps"));
        let released = Arc::new(AtomicBool::new(false));

        let lock = CacheLock::exclusive(&cache_file).unwrap();

        let waiter = {
            let cache_file = Arc::clone(&cache_file);
            let released = Arc::clone(&released);
            std::thread::spawn(move || {
                let _lock = CacheLock::exclusive(&cache_file).unwrap();
                assert!(released.load(Ordering::SeqCst));
            })
        };

        std::thread::sleep(Duration::from_millis(100));
        released.store(true, Ordering::SeqCst);
        drop(lock);
        waiter.join().unwrap();
    }
}
