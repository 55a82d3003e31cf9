//! File logging example
//!
//! Demonstrates a fixed-path file sink next to a rotating file sink whose
//! names come from a date and counter template.
//!
//! Run with: cargo run --example file_logging

use sinklog::format::{EvalCounter, FileNameFormatter, TextFormatter};
use sinklog::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Sinklog - File Logging Example ===\n");

    // logs/app-<date>-000.log, logs/app-<date>-001.log, ...
    let names = FileNameFormatter::new(
        TextFormatter::builder()
            .text("logs/app-")
            .time("%Y-%m-%d")
            .text("-")
            .counter(EvalCounter::new().with_width(3))
            .text(".log")
            .build(),
    )?;
    let rotating = FileSink::with_names(LogLevel::ALL, names, true)?;
    println!("1. Rotating sink writes to '{}'", rotating.path().display());

    let errors = FileSink::new(LogLevel::WARNING | LogLevel::ERROR, "logs/errors.log")?
        .with_formatter(
            TextFormatter::builder()
                .time("%H:%M:%S%.3f")
                .text(" [")
                .level()
                .text("] ")
                .message()
                .build(),
        );

    let log = CompoundLog::new(vec![
        Arc::new(ConsoleSink::new(LogLevel::INFO | LogLevel::WARNING | LogLevel::ERROR)),
        Arc::new(rotating),
        Arc::new(errors),
    ]);

    println!("\n2. Logging to console and both files:");
    log.info("Application started");
    log.debug("Loading configuration...");
    log.warn("Using default settings for some options");
    log.error("Failed to load optional plugin");

    for i in 1..=5 {
        sinklog::info!(log, "Processing item {}/5", i);
    }

    log.block_while_writing()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check the 'logs' directory for the file output");

    Ok(())
}
