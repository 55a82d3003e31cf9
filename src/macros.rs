//! Logging macros with call-site capture and lazy formatting.
//!
//! The macros record `module_path!()`, `file!()` and `line!()` of the call
//! and only render their format arguments when the log accepts the level.
//!
//! # Examples
//!
//! ```
//! use sinklog::prelude::*;
//! use sinklog::info;
//!
//! let log = StackSink::new(LogLevel::ALL);
//!
//! info!(log, "Server started");
//!
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//!
//! let entry = log.pop().unwrap();
//! assert_eq!(entry.message, "Server listening on port 8080");
//! assert_eq!(entry.call_site.module_path, Some(module_path!()));
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use sinklog::prelude::*;
/// # let log = ListSink::new(LogLevel::ALL);
/// use sinklog::log;
/// log!(log, LogLevel::INFO, "Simple message");
/// log!(log, LogLevel::ERROR, "Error code: {}", 500);
/// # assert_eq!(log.len(), 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::core::LogExt::log_fmt(
            &$logger,
            $level,
            ::std::format_args!($($arg)+),
            $crate::core::CallSite::new(
                ::std::module_path!(),
                ::std::file!(),
                ::std::line!(),
            ),
        )
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use sinklog::prelude::*;
/// # let log = ListSink::new(LogLevel::ALL);
/// use sinklog::debug;
/// debug!(log, "Debug information");
/// debug!(log, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use sinklog::prelude::*;
/// # let log = ListSink::new(LogLevel::ALL);
/// use sinklog::info;
/// info!(log, "Application started");
/// info!(log, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use sinklog::prelude::*;
/// # let log = ListSink::new(LogLevel::ALL);
/// use sinklog::warn;
/// warn!(log, "Low disk space");
/// warn!(log, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::WARNING, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use sinklog::prelude::*;
/// # let log = ListSink::new(LogLevel::ALL);
/// use sinklog::error;
/// error!(log, "Failed to connect to database");
/// error!(log, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::ERROR, $($arg)+)
    };
}
