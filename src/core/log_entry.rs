//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// Where a log call was made
///
/// Captured at the call itself, either through `#[track_caller]` on the
/// `LogExt` methods or through `module_path!()` in the logging macros, so a
/// sink running on a background thread still reports the original caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub module_path: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    #[must_use]
    pub const fn new(module_path: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            module_path: Some(module_path),
            file,
            line,
        }
    }

    /// The location of the caller of the enclosing `#[track_caller]` function
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            module_path: None,
            file: location.file(),
            line: location.line(),
        }
    }

    /// Module path when known, otherwise the source file
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.module_path.unwrap_or(self.file)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module_path {
            Some(module) => write!(f, "{} ({}:{})", module, self.file, self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// An immutable record of one accepted log call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    pub call_site: CallSite,
    pub event_time: DateTime<Local>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, level: LogLevel, call_site: CallSite) -> Self {
        Self::at(message, level, call_site, Local::now())
    }

    pub fn at(
        message: impl Into<String>,
        level: LogLevel,
        call_site: CallSite,
        event_time: DateTime<Local>,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            call_site,
            event_time,
        }
    }
}
