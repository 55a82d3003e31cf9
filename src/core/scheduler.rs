//! Background work scheduling for asynchronous sinks
//!
//! Email and database sinks hand their I/O to a [`BackgroundScheduler`] so the
//! caller returns immediately. Scheduled jobs must run to completion even after
//! the request that produced them has finished.

use super::error::{LogError, Result};
use std::thread;

/// A unit of background work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Capability to run a job in the background
pub trait BackgroundScheduler: Send + Sync {
    fn schedule(&self, job: Job) -> Result<()>;
}

/// Runs every job on its own detached, named OS thread
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    thread_name: String,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self::with_thread_name("sinklog-background")
    }

    pub fn with_thread_name(name: impl Into<String>) -> Self {
        Self {
            thread_name: name.into(),
        }
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundScheduler for ThreadScheduler {
    fn schedule(&self, job: Job) -> Result<()> {
        thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(job)
            .map(|_| ())
            .map_err(|e| {
                LogError::scheduler(format!(
                    "cannot spawn thread '{}': {}",
                    self.thread_name, e
                ))
            })
    }
}

/// Runs jobs as blocking tasks on a tokio runtime
///
/// The runtime behind the handle must outlive every scheduled job.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "tokio")]
impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the calling thread is running on
    pub fn current() -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| LogError::scheduler(e.to_string()))
    }
}

#[cfg(feature = "tokio")]
impl BackgroundScheduler for TokioScheduler {
    fn schedule(&self, job: Job) -> Result<()> {
        // The join handle is dropped; the task keeps running detached
        drop(self.handle.spawn_blocking(job));
        Ok(())
    }
}
