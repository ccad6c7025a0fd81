//! Quiescence-window timer with an explicit, abortable handle.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs a job once no new job has been scheduled for `window`.
///
/// Each [`schedule`](Debouncer::schedule) aborts the previous job, whether it
/// is still waiting out its window or already running. At most one job is
/// alive at a time. Dropping the debouncer aborts the pending job.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Restart the window with `job` as the action to run when it elapses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let mut pending = self.pending();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                tracing::debug!("Debounce window restarted");
            }
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            job.await;
        }));
    }

    /// Abort the pending job. Returns whether one was still alive.
    pub fn cancel(&self) -> bool {
        match self.pending().take() {
            Some(handle) => {
                let alive = !handle.is_finished();
                handle.abort();
                alive
            }
            None => false,
        }
    }

    /// Whether a job is waiting out its window or running.
    pub fn is_pending(&self) -> bool {
        self.pending().as_ref().is_some_and(|h| !h.is_finished())
    }

    // Poisoning is ignored: the guarded value is a single handle.
    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
