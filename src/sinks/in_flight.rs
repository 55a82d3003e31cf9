//! Accounting for background jobs that have not finished yet

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Count of scheduled jobs still running
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight {
    count: Arc<AtomicUsize>,
}

/// Marks one job as in flight until dropped
///
/// Created before the job is scheduled and moved into it, so the count is
/// released whether the job completes, fails, panics or is never run.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    count: Arc<AtomicUsize>,
}

impl InFlight {
    pub(crate) fn track(&self) -> InFlightGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            count: Arc::clone(&self.count),
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Busy-wait until every tracked job has finished
    pub(crate) fn wait(&self) {
        while self.count() > 0 {
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}
