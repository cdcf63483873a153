use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub running: bool,
    pub processed: usize,
    pub total: usize,
    pub current_file: Option<String>,
}

/// Progress of the upload queue. Only one run may hold it at a time.
#[derive(Debug, Default)]
pub struct QueueProgress {
    running: AtomicBool,
    processed: AtomicUsize,
    total: AtomicUsize,
    current_file: Mutex<Option<String>>,
}

impl QueueProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the queue for a run of `total` files. `None` if a run is active.
    pub fn try_start(self: &Arc<Self>, total: usize) -> Option<QueueRun> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        self.processed.store(0, Ordering::Release);
        self.total.store(total, Ordering::Release);
        self.set_current(None);

        Some(QueueRun {
            progress: Arc::clone(self),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            running: self.is_running(),
            processed: self.processed.load(Ordering::Acquire),
            total: self.total.load(Ordering::Acquire),
            current_file: self
                .current_file
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    fn set_current(&self, name: Option<String>) {
        *self
            .current_file
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = name;
    }
}

/// Held for the duration of one queue run. Releases the queue on drop.
#[derive(Debug)]
pub struct QueueRun {
    progress: Arc<QueueProgress>,
}

impl QueueRun {
    pub fn begin_file(&self, name: &str) {
        self.progress.set_current(Some(name.to_string()));
    }

    /// Advances the processed counter. Called once per file, success or not.
    pub fn finish_file(&self) -> usize {
        self.progress.processed.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl Drop for QueueRun {
    fn drop(&mut self) {
        self.progress.set_current(None);
        self.progress.running.store(false, Ordering::Release);
    }
}
