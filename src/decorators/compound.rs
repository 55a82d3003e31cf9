//! Fan-out to several logs

use crate::core::{Log, LogEntry, LogExt, LogLevel, Result};
use std::sync::Arc;

/// Forwards every entry to each member whose level accepts it
///
/// The compound's level is the union of its members' levels, so an entry any
/// member wants is never rejected up front. A failing member does not stop
/// the others.
pub struct CompoundLog {
    members: Vec<Arc<dyn Log>>,
    level: LogLevel,
}

impl CompoundLog {
    pub fn new(members: Vec<Arc<dyn Log>>) -> Self {
        let level = LogLevel::combine(members.iter().map(|member| member.level()));
        Self { members, level }
    }

    pub fn members(&self) -> &[Arc<dyn Log>] {
        &self.members
    }
}

impl FromIterator<Arc<dyn Log>> for CompoundLog {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Log>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Log for CompoundLog {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        for member in &self.members {
            member.try_write(entry);
        }
        Ok(())
    }

    /// Drain every member, then report the first failure
    fn block_while_writing(&self) -> Result<()> {
        let mut first_error = None;
        for member in &self.members {
            if let Err(e) = member.block_while_writing() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
