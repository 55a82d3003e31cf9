//! Console sinks

use crate::core::{Log, LogEntry, LogError, LogLevel, Result};
use crate::format::TextFormatter;
use parking_lot::Mutex;
use std::io::{self, Write};

#[cfg(feature = "console")]
use colored::{Color, Colorize};
#[cfg(feature = "console")]
use std::collections::HashMap;

type Output = Mutex<Box<dyn Write + Send>>;

fn write_line(output: &Output, line: &str) -> Result<()> {
    let mut out = output.lock();
    writeln!(out, "{}", line)
        .and_then(|_| out.flush())
        .map_err(|e| LogError::io_operation("writing to console", "cannot write log line", e))
}

/// Writes one formatted line per entry to stdout
pub struct ConsoleSink {
    level: LogLevel,
    formatter: TextFormatter,
    output: Output,
}

impl ConsoleSink {
    pub fn new(level: LogLevel) -> Self {
        Self::with_writer(level, io::stdout())
    }

    /// Write to `writer` instead of stdout
    pub fn with_writer(level: LogLevel, writer: impl Write + Send + 'static) -> Self {
        Self {
            level,
            formatter: TextFormatter::default_layout(),
            output: Mutex::new(Box::new(writer)),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Log for ConsoleSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = self.formatter.format(entry)?;
        write_line(&self.output, &line)
    }
}

/// Console sink colouring each line by level
///
/// Levels missing from the colour maps fall back to the default foreground
/// colours (Debug bright black, Info white, Warning yellow, Error red) and
/// to no background.
#[cfg(feature = "console")]
pub struct ColouredConsoleSink {
    level: LogLevel,
    formatter: TextFormatter,
    foreground: HashMap<LogLevel, Color>,
    background: HashMap<LogLevel, Color>,
    output: Output,
}

#[cfg(feature = "console")]
impl ColouredConsoleSink {
    pub fn new(level: LogLevel) -> Self {
        Self::with_writer(level, io::stdout())
    }

    pub fn with_writer(level: LogLevel, writer: impl Write + Send + 'static) -> Self {
        Self {
            level,
            formatter: TextFormatter::default_layout(),
            foreground: Self::default_foreground(),
            background: HashMap::new(),
            output: Mutex::new(Box::new(writer)),
        }
    }

    fn default_foreground() -> HashMap<LogLevel, Color> {
        LogLevel::SINGLE
            .iter()
            .map(|level| (*level, level.color_code()))
            .collect()
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Override foreground colours; unlisted levels keep their default
    #[must_use]
    pub fn with_foreground(mut self, colours: HashMap<LogLevel, Color>) -> Self {
        self.foreground.extend(colours);
        self
    }

    #[must_use]
    pub fn with_background(mut self, colours: HashMap<LogLevel, Color>) -> Self {
        self.background.extend(colours);
        self
    }

    pub fn foreground(&self, level: LogLevel) -> Option<Color> {
        self.foreground.get(&level).copied()
    }

    pub fn background(&self, level: LogLevel) -> Option<Color> {
        self.background.get(&level).copied()
    }
}

#[cfg(feature = "console")]
impl Log for ColouredConsoleSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = self.formatter.format(entry)?;
        let mut coloured = line.as_str().normal();
        if let Some(fg) = self.foreground(entry.level) {
            coloured = coloured.color(fg);
        }
        if let Some(bg) = self.background(entry.level) {
            coloured = coloured.on_color(bg);
        }
        write_line(&self.output, &coloured.to_string())
    }
}
