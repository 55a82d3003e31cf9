//! Log level definitions
//!
//! Levels are bit flags: a sink configured with `DEBUG | ERROR` accepts exactly
//! those two levels, and `ALL` accepts every single level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(u8);

impl LogLevel {
    pub const NONE: LogLevel = LogLevel(0);
    pub const DEBUG: LogLevel = LogLevel(1);
    pub const INFO: LogLevel = LogLevel(2);
    pub const WARNING: LogLevel = LogLevel(4);
    pub const ERROR: LogLevel = LogLevel(8);
    pub const ALL: LogLevel = LogLevel(15);

    /// The single levels, in ascending severity
    pub const SINGLE: [LogLevel; 4] = [
        LogLevel::DEBUG,
        LogLevel::INFO,
        LogLevel::WARNING,
        LogLevel::ERROR,
    ];

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a level from raw bits, discarding unknown bits
    #[inline]
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        LogLevel(bits & LogLevel::ALL.0)
    }

    /// Whether a log configured with `self` accepts an entry at `level`
    #[inline]
    #[must_use]
    pub const fn accepts(self, level: LogLevel) -> bool {
        (self.0 & level.0) == level.0
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this is exactly one of DEBUG, INFO, WARNING or ERROR
    #[inline]
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0.count_ones() == 1
    }

    /// Combine levels so the result accepts anything any of them accepts
    #[must_use]
    pub fn combine<I: IntoIterator<Item = LogLevel>>(levels: I) -> LogLevel {
        levels.into_iter().fold(LogLevel::NONE, |acc, level| acc | level)
    }

    /// Name of a single level, `None` for composites
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            LogLevel::NONE => Some("None"),
            LogLevel::DEBUG => Some("Debug"),
            LogLevel::INFO => Some("Info"),
            LogLevel::WARNING => Some("Warning"),
            LogLevel::ERROR => Some("Error"),
            LogLevel::ALL => Some("All"),
            _ => None,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match *self {
            LogLevel::DEBUG => BrightBlack,
            LogLevel::INFO => White,
            LogLevel::WARNING => Yellow,
            LogLevel::ERROR => Red,
            _ => White,
        }
    }
}

impl BitOr for LogLevel {
    type Output = LogLevel;

    fn bitor(self, rhs: LogLevel) -> LogLevel {
        LogLevel(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogLevel {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LogLevel {
    type Output = LogLevel;

    fn bitand(self, rhs: LogLevel) -> LogLevel {
        LogLevel(self.0 & rhs.0)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }

        let names: Vec<&str> = LogLevel::SINGLE
            .iter()
            .filter(|level| self.accepts(**level))
            .filter_map(|level| level.name())
            .collect();
        f.write_str(&names.join(" | "))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut level = LogLevel::NONE;
        for part in s.split('|').map(str::trim) {
            level |= match part.to_uppercase().as_str() {
                "NONE" => LogLevel::NONE,
                "DEBUG" => LogLevel::DEBUG,
                "INFO" => LogLevel::INFO,
                "WARN" | "WARNING" => LogLevel::WARNING,
                "ERROR" => LogLevel::ERROR,
                "ALL" => LogLevel::ALL,
                _ => return Err(format!("Invalid log level: '{}'", s)),
            };
        }
        Ok(level)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> String {
        level.to_string()
    }
}
