//! Serialising wrapper for sinks that must only be written from one thread
//!
//! Callers enqueue and return at once. A dedicated worker drains the queue in
//! FIFO order and is the only thread that ever calls the inner sink's
//! `write`.

use crate::core::{dispatch, panic_message, Log, LogEntry, LogError, LogLevel, Result, SinkMetrics};
use crate::sinks::FileSink;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[cfg(feature = "console")]
use crate::sinks::ColouredConsoleSink;

const IDLE_SLEEP: Duration = Duration::from_millis(1);

pub type ConcurrentFileSink = ConcurrencyWrapper<FileSink>;
#[cfg(feature = "console")]
pub type ConcurrentColouredConsoleSink = ConcurrencyWrapper<ColouredConsoleSink>;

/// A queued entry and whether it was submitted while reporting a failure
struct Queued {
    entry: LogEntry,
    reporting: bool,
}

pub struct ConcurrencyWrapper<L: Log + 'static> {
    inner: Arc<L>,
    sender: Sender<Queued>,
    stop: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
    metrics: Arc<SinkMetrics>,
}

impl<L: Log + 'static> ConcurrencyWrapper<L> {
    pub fn new(inner: L) -> Result<Self> {
        let inner = Arc::new(inner);
        let (sender, receiver) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        let metrics = Arc::new(SinkMetrics::new());

        let handle = {
            let inner = Arc::clone(&inner);
            let stop = Arc::clone(&stop);
            let metrics = Arc::clone(&metrics);
            thread::Builder::new()
                .name("sinklog-worker".to_string())
                .spawn(move || Self::run(&*inner, &receiver, &stop, &metrics))
                .map_err(|e| LogError::io_operation("spawning log worker", "cannot start thread", e))?
        };

        Ok(Self {
            inner,
            sender,
            stop,
            worker: Mutex::new(Some(handle)),
            metrics,
        })
    }

    fn run(inner: &L, receiver: &Receiver<Queued>, stop: &AtomicBool, metrics: &SinkMetrics) {
        loop {
            // Read before draining so nothing enqueued ahead of the stop is lost
            let stopping = stop.load(Ordering::SeqCst);

            while let Ok(Queued { entry, reporting }) = receiver.try_recv() {
                let written =
                    dispatch::with_reporting(reporting, || dispatch::write_isolated(inner, &entry));
                metrics.record_outcome(written);
            }

            if stopping {
                break;
            }
            thread::sleep(IDLE_SLEEP);
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Entries waiting for the worker
    pub fn queued(&self) -> usize {
        self.sender.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

impl<L: Log + 'static> Log for ConcurrencyWrapper<L> {
    fn level(&self) -> LogLevel {
        self.inner.level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        if self.is_stopped() {
            return Err(LogError::LoggerStopped);
        }
        self.sender
            .send(Queued {
                entry: entry.clone(),
                reporting: dispatch::is_reporting(),
            })
            .map_err(|_| LogError::LoggerStopped)
    }

    /// Stop the worker once everything queued so far is written, then drain
    /// the inner sink
    ///
    /// After this returns the wrapper accepts no further entries.
    fn block_while_writing(&self) -> Result<()> {
        let mut worker = self.worker.lock();
        if let Some(handle) = worker.take() {
            self.stop.store(true, Ordering::SeqCst);
            handle
                .join()
                .map_err(|payload| LogError::WorkerPanicked(panic_message(payload.as_ref())))?;
        }
        drop(worker);

        self.inner.block_while_writing()
    }
}

impl<L: Log + 'static> Drop for ConcurrencyWrapper<L> {
    fn drop(&mut self) {
        if let Err(e) = self.block_while_writing() {
            eprintln!("[LOGGER ERROR] Failed to stop log worker: {}", e);
        }
    }
}
