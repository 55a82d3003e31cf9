//! Integration tests for sinklog
//!
//! These tests verify:
//! - Level filtering through compound logs
//! - File rotation across template changes
//! - Failure isolation and internal log redirection
//! - Decorator stacking (rate limiter, filter, concurrency wrapper)
//! - Process-wide default log

use sinklog::defaults;
use sinklog::format::{EvalContext, EvalCounter, FormattingEntity, Value};
use sinklog::prelude::*;
use sinklog::sinks::{MailMessage, MailTransport, SmtpServer};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Serialises tests that install process-wide logs
fn global_lock() -> parking_lot::MutexGuard<'static, ()> {
    static LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
    LOCK.lock()
}

struct Exploding;

impl Log for Exploding {
    fn level(&self) -> LogLevel {
        LogLevel::ALL
    }

    fn write(&self, _entry: &LogEntry) -> Result<()> {
        panic!("sink blew up");
    }
}

#[test]
fn test_stack_pops_in_reverse_order() {
    let stack = StackSink::new(LogLevel::ALL);
    stack.debug("m1");
    stack.info("m2");

    let first = stack.pop().expect("entry");
    assert_eq!((first.message.as_str(), first.level), ("m2", LogLevel::INFO));
    let second = stack.pop().expect("entry");
    assert_eq!((second.message.as_str(), second.level), ("m1", LogLevel::DEBUG));
}

#[test]
fn test_compound_delivers_to_any_accepting_member() {
    let info_only = Arc::new(ListSink::new(LogLevel::INFO));
    let errors_only = Arc::new(ListSink::new(LogLevel::ERROR));
    let log = CompoundLog::new(vec![info_only.clone(), errors_only.clone()]);

    assert_eq!(log.level(), LogLevel::INFO | LogLevel::ERROR);

    log.info("to the first");
    log.error("to the second");
    log.warn("to nobody");

    assert_eq!(info_only.messages(), vec!["to the first"]);
    assert_eq!(errors_only.messages(), vec!["to the second"]);
}

#[test]
fn test_panicking_sink_is_isolated_and_reported() {
    let _lock = global_lock();
    let internal = Arc::new(ListSink::new(LogLevel::ALL));
    defaults::set_internal_log(internal.clone());

    let healthy = Arc::new(ListSink::new(LogLevel::ALL));
    let log = CompoundLog::new(vec![Arc::new(Exploding), healthy.clone()]);

    log.error("must survive");

    assert_eq!(healthy.messages(), vec!["must survive"]);
    assert!(internal
        .messages()
        .iter()
        .any(|m| m.contains("sink blew up")));
    defaults::reset_internal_log();
}

/// Template segment flipped by the test, standing in for a date
#[derive(Clone, Default)]
struct Period(Arc<AtomicUsize>);

impl FormattingEntity for Period {
    fn eval(&self, _ctx: &EvalContext<'_>) -> Result<Value> {
        Ok(Value::Integer(self.0.load(Ordering::SeqCst) as i64))
    }
}

#[test]
fn test_concurrent_file_sink_rotates_between_two_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let period = Period::default();
    let names = FileNameFormatter::new(
        TextFormatter::builder()
            .text(format!("{}/app-", dir.path().display()))
            .entity(period.clone())
            .text("-")
            .counter(EvalCounter::new())
            .text(".log")
            .build(),
    )
    .expect("template has a counter");

    let file = FileSink::with_names(LogLevel::ALL, names, true)
        .expect("Failed to create file sink")
        .with_formatter(TextFormatter::builder().message().build());
    let log: ConcurrentFileSink = ConcurrencyWrapper::new(file).expect("worker");

    for i in 0..5 {
        log.info(format!("before {}", i));
    }
    // Let the worker drain before the template changes
    while log.queued() > 0 {
        std::thread::sleep(Duration::from_millis(1));
    }
    std::thread::sleep(Duration::from_millis(20));
    period.0.store(1, Ordering::SeqCst);
    for i in 0..5 {
        log.info(format!("after {}", i));
    }
    log.block_while_writing().expect("drain");

    let mut files: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("entry").path())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);

    let first = fs::read_to_string(&files[0]).expect("read first");
    let second = fs::read_to_string(&files[1]).expect("read second");
    assert!(first.lines().all(|l| l.starts_with("before")));
    assert!(second.lines().all(|l| l.starts_with("after")));
    assert_eq!(first.lines().count() + second.lines().count(), 10);
    assert_ne!(
        files[0].file_name().expect("name"),
        files[1].file_name().expect("name")
    );
}

#[test]
fn test_rate_limited_email_alerts() {
    #[derive(Default)]
    struct Outbox(parking_lot::Mutex<Vec<MailMessage>>);

    impl MailTransport for Outbox {
        fn send(&self, message: &MailMessage) -> Result<()> {
            self.0.lock().push(message.clone());
            Ok(())
        }
    }

    let outbox = Arc::new(Outbox::default());
    let email = EmailSink::builder(outbox.clone())
        .level(LogLevel::ERROR)
        .from("app@example.com")
        .to("oncall@example.com")
        .server(SmtpServer::new("smtp.example.com"))
        .build()
        .expect("valid configuration");

    let entered = Arc::new(AtomicUsize::new(0));
    let entered_cb = Arc::clone(&entered);
    let log = RateLimiter::new(email, 3, Duration::from_secs(60))
        .expect("valid limiter")
        .on_enter(move |_| {
            entered_cb.fetch_add(1, Ordering::SeqCst);
        });

    for i in 0..10 {
        log.error(format!("outage {}", i));
    }
    log.block_while_writing().expect("drain");

    assert_eq!(outbox.0.lock().len(), 3);
    assert_eq!(entered.load(Ordering::SeqCst), 1);
    assert_eq!(log.metrics().suppressed_count(), 7);
}

#[test]
fn test_filter_in_front_of_concurrency_wrapper() {
    let list = Arc::new(ListSink::new(LogLevel::ALL));
    let wrapper = ConcurrencyWrapper::new(list.clone()).expect("worker");
    let log = Filter::new(wrapper, |entry| entry.message.contains("keep"));

    log.info("keep 1");
    log.info("drop");
    log.info("keep 2");
    log.block_while_writing().expect("drain");

    assert_eq!(list.messages(), vec!["keep 1", "keep 2"]);
}

#[test]
fn test_default_log_facade() {
    let _lock = global_lock();
    let list = Arc::new(ListSink::new(LogLevel::ALL));
    defaults::set_default_log(list.clone());

    defaults::info("configured");
    sinklog::warn!(defaults::default_log(), "via macro {}", 2);

    assert_eq!(list.messages(), vec!["configured", "via macro 2"]);
    let entry = list.get(0).expect("entry");
    assert!(entry.call_site.file.ends_with("integration_tests.rs"));

    defaults::reset_default_log();
    defaults::info("dropped by the null fallback");
    assert_eq!(list.len(), 2);
}

#[test]
fn test_fixed_file_sink_default_layout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("logs/app.log");

    let sink = FileSink::new(LogLevel::WARNING | LogLevel::ERROR, &path).expect("open");
    sinklog::info!(sink, "not written");
    sinklog::error!(sink, "written {}", 1);

    let content = fs::read_to_string(&path).expect("read");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" - integration_tests: Error: written 1"));
}
