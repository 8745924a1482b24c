//! Exclusive queue for library-roots change notifications.
//!
//! Roots changes must never run concurrently with each other. Jobs are sent to
//! a single consumer task that runs them one at a time on the blocking pool, so
//! a host notification may block without stalling the async runtime.

use tokio::runtime::Handle;
use tokio::sync::mpsc;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to the roots-change consumer task.
///
/// The task ends once every handle is dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct RootsChangeQueue {
    sender: mpsc::UnboundedSender<Job>,
}

impl RootsChangeQueue {
    /// Spawns the consumer on `runtime`.
    pub fn start(runtime: &Handle) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        runtime.spawn(async move {
            while let Some(job) = receiver.recv().await {
                if let Err(e) = tokio::task::spawn_blocking(job).await {
                    tracing::warn!("Roots change job failed: {}", e);
                }
            }
        });
        Self {
            sender,
        }
    }

    /// Enqueues `job`. Returns `false` (dropping the job) when the consumer is gone.
    pub fn schedule(&self, job: impl FnOnce() + Send + 'static) -> bool {
        self.sender.send(Box::new(job)).is_ok()
    }
}
