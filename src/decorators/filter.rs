//! Predicate filter in front of a log

use crate::core::{Log, LogEntry, LogLevel, Result};

type Predicate = Box<dyn Fn(&LogEntry) -> bool + Send + Sync>;

/// Forwards an entry only when the predicate returns `true`
pub struct Filter<L> {
    inner: L,
    predicate: Predicate,
}

impl<L: Log> Filter<L> {
    pub fn new(inner: L, predicate: impl Fn(&LogEntry) -> bool + Send + Sync + 'static) -> Self {
        Self {
            inner,
            predicate: Box::new(predicate),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Log> Log for Filter<L> {
    fn level(&self) -> LogLevel {
        self.inner.level()
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        if (self.predicate)(entry) {
            self.inner.write(entry)
        } else {
            Ok(())
        }
    }

    fn block_while_writing(&self) -> Result<()> {
        self.inner.block_while_writing()
    }
}
