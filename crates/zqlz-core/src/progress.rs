//! Cancellable progress monitor for background tasks
//!
//! A `ProgressMonitor` is handed to every long-running collaborator call.
//! Clones share state, so the UI can keep one clone to cancel while the
//! task polls another.

use crate::{Result, ZqlzError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct MonitorState {
    cancelled: AtomicBool,
    worked: AtomicU64,
    total: AtomicU64,
    task: Mutex<Option<String>>,
    subtask: Mutex<Option<String>>,
}

/// Progress and cancellation handle shared between a task and its host
#[derive(Debug, Clone, Default)]
pub struct ProgressMonitor {
    state: Arc<MonitorState>,
}

impl ProgressMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread and idempotent.
    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!(task = ?self.current_task(), "progress monitor cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(ZqlzError::Cancelled)` once cancellation was requested
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ZqlzError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Start a named task with `total` units of work
    pub fn begin_task(&self, name: impl Into<String>, total: u64) {
        *self.state.task.lock() = Some(name.into());
        *self.state.subtask.lock() = None;
        self.state.total.store(total, Ordering::SeqCst);
        self.state.worked.store(0, Ordering::SeqCst);
    }

    pub fn subtask(&self, name: impl Into<String>) {
        *self.state.subtask.lock() = Some(name.into());
    }

    pub fn worked(&self, units: u64) {
        self.state.worked.fetch_add(units, Ordering::SeqCst);
    }

    pub fn done(&self) {
        self.state
            .worked
            .store(self.state.total.load(Ordering::SeqCst), Ordering::SeqCst);
        *self.state.subtask.lock() = None;
    }

    pub fn current_task(&self) -> Option<String> {
        self.state.task.lock().clone()
    }

    pub fn current_subtask(&self) -> Option<String> {
        self.state.subtask.lock().clone()
    }

    /// Units of work completed so far and the declared total
    pub fn progress(&self) -> (u64, u64) {
        (
            self.state.worked.load(Ordering::SeqCst),
            self.state.total.load(Ordering::SeqCst),
        )
    }
}
