//! # Sinklog
//!
//! A leveled logging library built around composable sinks.
//!
//! ## Features
//!
//! - **Bit-flag levels**: each sink accepts an arbitrary set of levels
//! - **Formatting chain**: layouts built from nestable formatting entities
//! - **Sinks**: console, rotating file, email, database and in-memory
//! - **Decorators**: fan-out, filtering, rate limiting and single-writer
//!   serialisation
//! - **Failure isolation**: a broken sink never reaches the caller; its
//!   errors go to a configurable internal log
//!
//! ## Example
//!
//! ```
//! use sinklog::prelude::*;
//! use std::sync::Arc;
//!
//! let recent = Arc::new(QueueSink::new(LogLevel::ALL));
//! let errors = Arc::new(ListSink::new(LogLevel::ERROR));
//! let log = CompoundLog::new(vec![recent.clone(), errors.clone()]);
//!
//! log.info("service started");
//! sinklog::error!(log, "request {} failed", 17);
//!
//! assert_eq!(recent.len(), 2);
//! assert_eq!(errors.messages(), vec!["request 17 failed"]);
//! ```

pub mod core;
pub mod decorators;
pub mod format;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::decorators::ConcurrentColouredConsoleSink;
    pub use crate::decorators::{
        CompoundLog, ConcurrencyWrapper, ConcurrentFileSink, Filter, RateLimitSettings,
        RateLimiter,
    };
    pub use crate::core::{
        BackgroundScheduler, CallSite, Log, LogEntry, LogError, LogExt, LogLevel, Result,
        SinkMetrics, ThreadScheduler,
    };
    pub use crate::format::{FileNameFormatter, TextFormatter};
    #[cfg(feature = "console")]
    pub use crate::sinks::ColouredConsoleSink;
    pub use crate::sinks::{
        ConsoleSink, DbSink, EmailSink, FileSink, ListSink, NullSink, QueueSink, StackSink,
    };
}

pub use crate::core::{
    defaults, BackgroundScheduler, CallSite, Log, LogEntry, LogError, LogExt, LogLevel, Result,
    SinkMetrics, ThreadScheduler,
};
#[cfg(feature = "tokio")]
pub use crate::core::TokioScheduler;
