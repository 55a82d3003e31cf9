//! Failure isolation and redirection to the internal log
//!
//! A sink failure must never reach the code that logged the entry. Every
//! isolated write catches both `Err` results and panics and reports them to
//! [`internal_log`](super::defaults::internal_log) at ERROR level.

use super::{
    defaults,
    error::{panic_message, LogError},
    log::Log,
    log_entry::{CallSite, LogEntry},
    log_level::LogLevel,
};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

thread_local! {
    static REPORTING: Cell<bool> = const { Cell::new(false) };
}

/// Restores the reporting flag even if the internal log panics
struct ReportingGuard {
    previous: bool,
}

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        REPORTING.with(|flag| flag.set(previous));
    }
}

/// Whether this thread is currently writing a failure report
///
/// Work handed to another thread captures this and runs under
/// [`with_reporting`], so failures of a report's own I/O are dropped there
/// too.
pub(crate) fn is_reporting() -> bool {
    REPORTING.with(Cell::get)
}

/// Run `f` with the reporting flag set to `reporting` on this thread
pub(crate) fn with_reporting<R>(reporting: bool, f: impl FnOnce() -> R) -> R {
    let previous = REPORTING.with(|flag| flag.replace(reporting));
    let _guard = ReportingGuard { previous };
    f()
}

/// Write `entry` to `log`, catching errors and panics
///
/// Returns `true` when the sink wrote the entry successfully. The level is
/// not checked here.
pub(crate) fn write_isolated<L: Log + ?Sized>(log: &L, entry: &LogEntry) -> bool {
    match catch_unwind(AssertUnwindSafe(|| log.write(entry))) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            report("Failed to write log entry", &e);
            false
        }
        Err(panic_info) => {
            let e = LogError::SinkPanicked(panic_message(panic_info.as_ref()));
            report("Failed to write log entry", &e);
            false
        }
    }
}

/// Report a library failure to the internal log
///
/// Failures raised while this thread is already reporting are dropped.
pub fn report(context: &str, error: &LogError) {
    if REPORTING.with(|flag| flag.replace(true)) {
        return;
    }
    let _guard = ReportingGuard { previous: false };

    let internal = defaults::internal_log();
    if !internal.level().accepts(LogLevel::ERROR) {
        return;
    }

    let entry = LogEntry::new(
        format!("{}: {}", context, error),
        LogLevel::ERROR,
        CallSite::new(module_path!(), file!(), line!()),
    );
    // Nothing left to report to if the internal log itself fails
    let _ = catch_unwind(AssertUnwindSafe(|| internal.write(&entry)));
}
