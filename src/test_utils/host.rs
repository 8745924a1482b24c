use crate::host::ProjectHost;
use crate::resolver::BusyFlag;
use crate::tool::Tool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};

/// A [`ProjectHost`] with fixed manifest lists that records every call.
#[derive(Default)]
pub struct RecordingHost {
    manifests: Mutex<HashMap<Tool, Vec<PathBuf>>>,
    notifications: AtomicUsize,
    ready_calls: AtomicUsize,
    ready_gate: Mutex<Option<mpsc::Receiver<()>>>,
    busy_probe: OnceLock<BusyFlag>,
    busy_at_notify: Mutex<Vec<bool>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_manifests(self, tool: Tool, files: Vec<PathBuf>) -> Self {
        self.set_manifests(tool, files);
        self
    }

    pub fn set_manifests(&self, tool: Tool, files: Vec<PathBuf>) {
        self.manifests.lock().unwrap().insert(tool, files);
    }

    /// Makes the next `wait_until_ready` block until the returned sender
    /// sends or is dropped.
    pub fn gate_readiness(&self) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        *self.ready_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Records the value of `flag` at every notification.
    pub fn watch_busy(&self, flag: BusyFlag) {
        let _ = self.busy_probe.set(flag);
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.load(Ordering::SeqCst)
    }

    pub fn ready_calls(&self) -> usize {
        self.ready_calls.load(Ordering::SeqCst)
    }

    pub fn busy_at_notify(&self) -> Vec<bool> {
        self.busy_at_notify.lock().unwrap().clone()
    }
}

impl ProjectHost for RecordingHost {
    fn list_manifest_files(&self, tool: Tool) -> Vec<PathBuf> {
        self.manifests.lock().unwrap().get(&tool).cloned().unwrap_or_default()
    }

    fn wait_until_ready(&self) {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.ready_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
    }

    fn notify_library_roots_changed(&self) {
        if let Some(flag) = self.busy_probe.get() {
            self.busy_at_notify.lock().unwrap().push(flag.is_set());
        }
        self.notifications.fetch_add(1, Ordering::SeqCst);
    }
}
