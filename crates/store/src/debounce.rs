//! Debounced persistence: a cancellable scheduled write tied to the saver's
//! lifetime.
//!
//! Every [`schedule`](DebouncedSaver::schedule) aborts the previously armed
//! write and arms a new one, so only the final state within a quiet period
//! reaches disk.  Lost intermediate writes are the point — this is a
//! coalescing policy, not a durability guarantee.  Dropping the saver aborts
//! any pending write, so nothing lands after disposal.

use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{ReviewRecord, ReviewStore};

/// Default quiet period between the last state mutation and the write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

pub struct DebouncedSaver {
    store: ReviewStore,
    trace_id: String,
    delay: Duration,
    latest: Option<ReviewRecord>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSaver {
    pub fn new(store: ReviewStore, trace_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            trace_id: trace_id.into(),
            delay,
            latest: None,
            pending: None,
        }
    }

    /// Arm a write of `record` after the quiet period, superseding any write
    /// already armed.  Fire-and-forget: a failed write is logged, not
    /// returned.  Must be called from within a tokio runtime.
    pub fn schedule(&mut self, record: ReviewRecord) {
        self.cancel_pending();
        self.latest = Some(record.clone());

        let store = self.store.clone();
        let trace_id = self.trace_id.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.write(&trace_id, &record) {
                Ok(()) => debug!(trace_id = %trace_id, "autosaved review state"),
                Err(err) => warn!(trace_id = %trace_id, error = %err, "autosave failed"),
            }
        }));
    }

    /// Write the most recently scheduled state immediately, cancelling the
    /// timer.  No-op when nothing was scheduled since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        self.cancel_pending();
        if let Some(record) = self.latest.take() {
            self.store.write(&self.trace_id, &record)?;
        }
        Ok(())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
