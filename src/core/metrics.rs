//! Sink metrics for observability
//!
//! Counters kept by the decorators that sit between callers and sinks:
//! entries written through, entries the inner sink failed on and entries
//! suppressed by rate limiting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-wrapper counters
///
/// # Example
///
/// ```
/// use sinklog::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
///
/// metrics.record_written();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.suppressed_count(), 1);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    /// Entries the inner sink accepted without error
    written: AtomicU64,

    /// Entries the inner sink failed or panicked on
    failed: AtomicU64,

    /// Entries dropped on purpose (rate limiting)
    suppressed: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Record a written entry, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record the outcome of an isolated write
    #[inline]
    pub(crate) fn record_outcome(&self, written: bool) {
        if written {
            self.record_written();
        } else {
            self.record_failed();
        }
    }

    /// Share of processed entries that failed, as a percentage (0.0 - 100.0)
    ///
    /// Suppressed entries are not counted as processed.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.written_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SinkMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            failed: AtomicU64::new(self.failed_count()),
            suppressed: AtomicU64::new(self.suppressed_count()),
        }
    }
}
