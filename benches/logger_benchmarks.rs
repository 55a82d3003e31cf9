//! Criterion benchmarks for sinklog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sinklog::format::{EntryJson, EvalCounter, FileNameFormatter};
use sinklog::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Accepts everything and keeps nothing
struct Discard(LogLevel);

impl Log for Discard {
    fn level(&self) -> LogLevel {
        self.0
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }
}

fn sample_entry() -> LogEntry {
    LogEntry::new(
        "Request processed in 42ms",
        LogLevel::INFO,
        CallSite::new("service::http", "src/http.rs", 120),
    )
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let accepting = Discard(LogLevel::ALL);
    group.bench_function("accepted", |b| {
        b.iter(|| accepting.info(black_box("Info message")));
    });

    let rejecting = Discard(LogLevel::ERROR);
    group.bench_function("rejected", |b| {
        b.iter(|| rejecting.debug(black_box("Debug message")));
    });

    group.bench_function("rejected_macro", |b| {
        b.iter(|| sinklog::debug!(rejecting, "value {}", black_box(42)));
    });

    group.finish();
}

fn bench_compound(c: &mut Criterion) {
    let mut group = c.benchmark_group("compound");
    group.throughput(Throughput::Elements(1));

    for (name, level) in [("all", LogLevel::ALL), ("none", LogLevel::NONE)] {
        let log = CompoundLog::new(
            (0..4)
                .map(|_| Arc::new(Discard(level)) as Arc<dyn Log>)
                .collect(),
        );
        group.bench_function(name, |b| {
            b.iter(|| log.warn(black_box("Compound message")));
        });
    }

    group.finish();
}

// ============================================================================
// Decorator Benchmarks
// ============================================================================

fn bench_decorators(c: &mut Criterion) {
    let mut group = c.benchmark_group("decorators");
    group.throughput(Throughput::Elements(1));

    let filtered = Filter::new(Discard(LogLevel::ALL), |entry| entry.message.len() > 4);
    group.bench_function("filter", |b| {
        b.iter(|| filtered.info(black_box("Filtered message")));
    });

    let limited = RateLimiter::new(Discard(LogLevel::ALL), 100, Duration::from_millis(10))
        .expect("valid limiter");
    group.bench_function("rate_limiter", |b| {
        b.iter(|| limited.info(black_box("Limited message")));
    });

    let wrapped = ConcurrencyWrapper::new(Discard(LogLevel::ALL)).expect("worker");
    group.bench_function("concurrency_wrapper_enqueue", |b| {
        b.iter(|| wrapped.info(black_box("Queued message")));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let entry = sample_entry();

    let default_layout = TextFormatter::default_layout();
    group.bench_function("default_layout", |b| {
        b.iter(|| default_layout.format(black_box(&entry)));
    });

    let json = TextFormatter::builder().entity(EntryJson).build();
    group.bench_function("json", |b| {
        b.iter(|| json.format(black_box(&entry)));
    });

    let names = FileNameFormatter::new(
        TextFormatter::builder()
            .text("logs/app-")
            .time("%Y-%m-%d")
            .text("-")
            .counter(EvalCounter::new().with_width(3))
            .text(".log")
            .build(),
    )
    .expect("template has a counter");
    group.bench_function("file_name_peek", |b| {
        b.iter(|| names.peek());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dispatch,
    bench_compound,
    bench_decorators,
    bench_formatting,
);

criterion_main!(benches);
