//! Sink that discards everything

use crate::core::{Log, LogEntry, LogLevel, Result};

/// Accepts no level and writes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub const fn new() -> Self {
        NullSink
    }
}

impl Log for NullSink {
    fn level(&self) -> LogLevel {
        LogLevel::NONE
    }

    fn write(&self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogExt;

    #[test]
    fn test_accepts_nothing() {
        let sink = NullSink::new();
        for level in LogLevel::SINGLE {
            assert!(!sink.accepts(level));
        }
        sink.error("ignored");
        assert!(sink.block_while_writing().is_ok());
    }
}
