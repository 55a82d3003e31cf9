//! Process-wide default log and internal log
//!
//! Both are unset at start-up and read as a [`NullSink`] until configured.
//! The internal log receives the library's own failure reports.

use super::{log::Log, log::LogExt};
use crate::sinks::NullSink;
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;

static DEFAULT_LOG: RwLock<Option<Arc<dyn Log>>> = const_rwlock(None);
static INTERNAL_LOG: RwLock<Option<Arc<dyn Log>>> = const_rwlock(None);

fn or_null(slot: &RwLock<Option<Arc<dyn Log>>>) -> Arc<dyn Log> {
    match slot.read().as_ref() {
        Some(log) => Arc::clone(log),
        None => Arc::new(NullSink::new()),
    }
}

/// The application's default log
pub fn default_log() -> Arc<dyn Log> {
    or_null(&DEFAULT_LOG)
}

pub fn set_default_log(log: Arc<dyn Log>) {
    *DEFAULT_LOG.write() = Some(log);
}

/// Unset the default log, returning the previous one
pub fn reset_default_log() -> Option<Arc<dyn Log>> {
    DEFAULT_LOG.write().take()
}

/// The log receiving the library's own failure reports
pub fn internal_log() -> Arc<dyn Log> {
    or_null(&INTERNAL_LOG)
}

pub fn set_internal_log(log: Arc<dyn Log>) {
    *INTERNAL_LOG.write() = Some(log);
}

pub fn reset_internal_log() -> Option<Arc<dyn Log>> {
    INTERNAL_LOG.write().take()
}

#[track_caller]
pub fn debug(message: impl Into<String>) {
    default_log().debug(message);
}

#[track_caller]
pub fn info(message: impl Into<String>) {
    default_log().info(message);
}

#[track_caller]
pub fn warn(message: impl Into<String>) {
    default_log().warn(message);
}

#[track_caller]
pub fn error(message: impl Into<String>) {
    default_log().error(message);
}

/// Block until the default log has drained
pub fn block_while_writing() -> super::error::Result<()> {
    default_log().block_while_writing()
}

/// Serialises tests that touch the process-wide logs
#[cfg(test)]
pub(crate) fn test_lock() -> parking_lot::MutexGuard<'static, ()> {
    static LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
    LOCK.lock()
}
