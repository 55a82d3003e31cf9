//! Sliding-window rate limiter
//!
//! Protects expensive sinks (email in particular) from floods: once more than
//! `num_entries` entries arrive within `time_span`, further entries are
//! suppressed until the rate drops again.

use crate::core::{Log, LogEntry, LogError, LogLevel, Result, SinkMetrics};
use chrono::{DateTime, Local, TimeDelta};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

pub type RateLimitCallback = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// Serde-loadable limiter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    pub num_entries: usize,
    pub time_span_ms: u64,
}

impl RateLimitSettings {
    pub fn time_span(&self) -> Duration {
        Duration::from_millis(self.time_span_ms)
    }
}

struct Window {
    times: VecDeque<DateTime<Local>>,
    limited: bool,
}

enum Transition {
    Enter,
    Exit,
}

pub struct RateLimiter<L> {
    inner: L,
    num_entries: usize,
    time_span: TimeDelta,
    window: Mutex<Window>,
    on_enter: Option<RateLimitCallback>,
    on_exit: Option<RateLimitCallback>,
    metrics: SinkMetrics,
}

impl<L: Log> RateLimiter<L> {
    /// Allow at most `num_entries` entries within any `time_span`
    ///
    /// With `num_entries == 0` every entry is suppressed unless `time_span`
    /// is zero.
    pub fn new(inner: L, num_entries: usize, time_span: Duration) -> Result<Self> {
        let time_span = TimeDelta::from_std(time_span)
            .map_err(|e| LogError::config("RateLimiter", format!("time span out of range: {}", e)))?;

        Ok(Self {
            inner,
            num_entries,
            time_span,
            window: Mutex::new(Window {
                times: VecDeque::with_capacity(num_entries + 1),
                limited: false,
            }),
            on_enter: None,
            on_exit: None,
            metrics: SinkMetrics::new(),
        })
    }

    pub fn from_settings(inner: L, settings: RateLimitSettings) -> Result<Self> {
        Self::new(inner, settings.num_entries, settings.time_span())
    }

    /// Called with the first suppressed entry each time limiting starts
    #[must_use]
    pub fn on_enter(mut self, callback: impl Fn(&LogEntry) + Send + Sync + 'static) -> Self {
        self.on_enter = Some(Arc::new(callback));
        self
    }

    /// Called with the first forwarded entry each time limiting ends, after
    /// that entry has reached the inner log
    #[must_use]
    pub fn on_exit(mut self, callback: impl Fn(&LogEntry) + Send + Sync + 'static) -> Self {
        self.on_exit = Some(Arc::new(callback));
        self
    }

    pub fn is_limited(&self) -> bool {
        self.window.lock().limited
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Record `time` and decide whether to suppress
    fn admit(&self, time: DateTime<Local>) -> (bool, Option<Transition>) {
        let mut window = self.window.lock();
        window.times.push_back(time);
        if window.times.len() <= self.num_entries {
            return (false, None);
        }

        let Some(oldest) = window.times.pop_front() else {
            return (false, None);
        };
        if time - oldest < self.time_span {
            let transition = (!window.limited).then_some(Transition::Enter);
            window.limited = true;
            (true, transition)
        } else if window.limited {
            window.limited = false;
            (false, Some(Transition::Exit))
        } else {
            (false, None)
        }
    }
}

impl<L: Log> Log for RateLimiter<L> {
    fn level(&self) -> LogLevel {
        self.inner.level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let (suppress, transition) = self.admit(entry.event_time);

        let result = if suppress {
            self.metrics.record_suppressed();
            Ok(())
        } else {
            let result = self.inner.write(entry);
            self.metrics.record_outcome(result.is_ok());
            result
        };

        match transition {
            Some(Transition::Enter) => {
                if let Some(callback) = &self.on_enter {
                    callback(entry);
                }
            }
            Some(Transition::Exit) => {
                if let Some(callback) = &self.on_exit {
                    callback(entry);
                }
            }
            None => {}
        }
        result
    }

    fn block_while_writing(&self) -> Result<()> {
        self.inner.block_while_writing()
    }
}
