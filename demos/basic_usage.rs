//! Basic sinklog usage example
//!
//! Demonstrates console logging, bit-flag levels, compound logs and the
//! process-wide default log.
//!
//! Run with: cargo run --example basic_usage

use sinklog::prelude::*;
use sinklog::{defaults, error, info};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Sinklog - Basic Usage Example ===\n");

    // A console sink accepting every level
    let console = ConsoleSink::new(LogLevel::ALL);

    println!("1. Logging at different levels:");
    console.debug("This is a debug message");
    console.info("This is an info message");
    console.warn("This is a warning message");
    console.error("This is an error message");

    println!("\n2. Levels are sets, not thresholds:");
    let picky = ConsoleSink::new(LogLevel::DEBUG | LogLevel::ERROR);
    println!("   Sink level is '{}' - info and warning won't show:", picky.level());
    picky.debug("Debug message (visible)");
    picky.info("Info message (hidden)");
    picky.warn("Warning message (hidden)");
    picky.error("Error message (visible)");

    println!("\n3. Fan-out through a compound log:");
    let recent = Arc::new(QueueSink::new(LogLevel::ALL));
    let log = CompoundLog::new(vec![
        Arc::new(ConsoleSink::new(LogLevel::WARNING | LogLevel::ERROR)),
        recent.clone(),
    ]);
    info!(log, "Kept in memory only");
    error!(log, "Printed and kept, code {}", 500);
    println!("   {} entries kept in memory", recent.len());

    println!("\n4. Default log:");
    defaults::info("Dropped: no default log configured yet");
    defaults::set_default_log(Arc::new(ConsoleSink::new(LogLevel::ALL)));
    defaults::info("Written through the default log");
    defaults::block_while_writing()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
