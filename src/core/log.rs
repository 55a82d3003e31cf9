//! The log contract shared by every sink and decorator

use super::{
    dispatch,
    error::Result,
    log_entry::{CallSite, LogEntry},
    log_level::LogLevel,
};
use std::fmt;
use std::sync::Arc;

/// A log destination
///
/// Implementors only provide the sink-specific I/O in [`Log::write`]; level
/// filtering, entry construction and failure isolation live in [`LogExt`].
/// `write` may be called from any thread, so each sink is responsible for its
/// own synchronisation (or can be wrapped in a
/// [`ConcurrencyWrapper`](crate::decorators::ConcurrencyWrapper)).
///
/// # Example
///
/// ```
/// use sinklog::prelude::*;
///
/// struct Stdout;
///
/// impl Log for Stdout {
///     fn level(&self) -> LogLevel {
///         LogLevel::ALL
///     }
///
///     fn write(&self, entry: &LogEntry) -> Result<()> {
///         println!("{}: {}", entry.level, entry.message);
///         Ok(())
///     }
/// }
///
/// Stdout.info("ready");
/// ```
pub trait Log: Send + Sync {
    /// Levels this log accepts, fixed at construction
    fn level(&self) -> LogLevel;

    /// Write an already accepted entry
    fn write(&self, entry: &LogEntry) -> Result<()>;

    /// Block until every previously submitted entry has been processed
    fn block_while_writing(&self) -> Result<()> {
        Ok(())
    }
}

impl<L: Log + ?Sized> Log for Arc<L> {
    fn level(&self) -> LogLevel {
        (**self).level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn block_while_writing(&self) -> Result<()> {
        (**self).block_while_writing()
    }
}

impl<L: Log + ?Sized> Log for Box<L> {
    fn level(&self) -> LogLevel {
        (**self).level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn block_while_writing(&self) -> Result<()> {
        (**self).block_while_writing()
    }
}

impl<L: Log + ?Sized> Log for &L {
    fn level(&self) -> LogLevel {
        (**self).level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn block_while_writing(&self) -> Result<()> {
        (**self).block_while_writing()
    }
}

/// Caller-facing API, available on every [`Log`]
pub trait LogExt: Log {
    /// Whether an entry at `level` passes this log's level
    #[inline]
    fn accepts(&self, level: LogLevel) -> bool {
        self.level().accepts(level)
    }

    /// Level-checked write with failure isolation
    ///
    /// Errors and panics raised by the sink are reported to the internal log
    /// and never reach the caller.
    fn try_write(&self, entry: &LogEntry) {
        if self.accepts(entry.level) {
            dispatch::write_isolated(self, entry);
        }
    }

    #[track_caller]
    fn log(&self, level: LogLevel, message: impl Into<String>) {
        if self.accepts(level) {
            let entry = LogEntry::new(message, level, CallSite::caller());
            dispatch::write_isolated(self, &entry);
        }
    }

    /// Log pre-captured format arguments
    ///
    /// The arguments are only rendered once the level has been accepted, so
    /// `Display` implementations never run for rejected entries.
    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>, call_site: CallSite) {
        if self.accepts(level) {
            let entry = LogEntry::new(fmt::format(args), level, call_site);
            dispatch::write_isolated(self, &entry);
        }
    }

    #[inline]
    #[track_caller]
    fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::DEBUG, message);
    }

    #[inline]
    #[track_caller]
    fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::INFO, message);
    }

    #[inline]
    #[track_caller]
    fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::WARNING, message);
    }

    #[inline]
    #[track_caller]
    fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::ERROR, message);
    }
}

impl<L: Log + ?Sized> LogExt for L {}
