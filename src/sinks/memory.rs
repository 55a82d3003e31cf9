//! In-memory sinks
//!
//! Collections that keep the entries written to them. Useful for tests and
//! for inspecting recent activity at runtime.

use crate::core::{Log, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Last-in, first-out entry store
#[derive(Debug)]
pub struct StackSink {
    level: LogLevel,
    entries: Mutex<Vec<LogEntry>>,
}

impl StackSink {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Remove and return the most recent entry
    pub fn pop(&self) -> Option<LogEntry> {
        self.entries.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Log for StackSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}

/// First-in, first-out entry store
#[derive(Debug)]
pub struct QueueSink {
    level: LogLevel,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl QueueSink {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Remove and return the oldest entry
    pub fn dequeue(&self) -> Option<LogEntry> {
        self.entries.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Log for QueueSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push_back(entry.clone());
        Ok(())
    }
}

/// Append-only entry list
#[derive(Debug)]
pub struct ListSink {
    level: LogLevel,
    entries: Mutex<Vec<LogEntry>>,
}

impl ListSink {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self, index: usize) -> Option<LogEntry> {
        self.entries.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot in write order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Messages in write order
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Log for ListSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}
