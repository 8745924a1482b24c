//! Run bookkeeping: the busy flag, run reports and completion handles.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Read-only view of a project's "resolution in progress" flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the flag if it is clear. Dropping the guard clears it again.
    pub(crate) fn try_acquire(&self) -> Option<BusyGuard> {
        self.0.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).ok()?;
        Some(BusyGuard {
            flag: Arc::clone(&self.0),
        })
    }
}

/// Ownership of a set busy flag.
///
/// Moved from the entry point into the worker and from there into the
/// reindex job, so the flag clears exactly when the last step of a run has
/// executed, or when a step is abandoned (panic, closed queue).
#[derive(Debug)]
pub(crate) struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// What triggered a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Every manifest of the project was re-resolved.
    Full,
    /// Only the given manifests were re-resolved.
    Partial,
    /// The mapping was restored from the cache file; no tool ran.
    Restored,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub kind: RunKind,
    /// Files in the run's input, after de-duplication.
    pub files_total: usize,
    /// Files whose entry was replaced.
    pub files_resolved: usize,
    /// Files ignored because they are not a recognized manifest.
    pub files_skipped: usize,
    /// Coordinate lines stored across resolved (or restored) files.
    pub coordinates: usize,
    /// Whether the cache file was written successfully.
    pub cache_written: bool,
}

impl RunReport {
    pub(crate) fn new(kind: RunKind) -> Self {
        Self {
            kind,
            files_total: 0,
            files_resolved: 0,
            files_skipped: 0,
            coordinates: 0,
            cache_written: false,
        }
    }
}

/// Progress of the file currently being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RunProgress {
    /// `index / count` of the current file, in `[0, 1)`.
    pub fraction: f64,
    /// The manifest file being resolved.
    pub label: String,
}

/// Completion handle of a scheduled run.
///
/// Dropping the handle does not cancel the run.
#[derive(Debug)]
pub struct ResolutionHandle {
    task: JoinHandle<RunReport>,
}

impl ResolutionHandle {
    pub(crate) fn new(task: JoinHandle<RunReport>) -> Self {
        Self {
            task,
        }
    }

    /// Waits until the run has finished, including its roots notification.
    pub async fn wait(self) -> anyhow::Result<RunReport> {
        self.task.await.map_err(|e| anyhow::anyhow!("Resolution worker failed: {e}"))
    }
}
