//! Async logging example
//!
//! Demonstrates the concurrency wrapper in front of a file sink and a rate
//! limited email sink delivering in the background.
//!
//! Run with: cargo run --example async_logging

use sinklog::prelude::*;
use sinklog::sinks::{MailMessage, MailTransport, SmtpServer};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Prints instead of talking to an SMTP server
struct PrintTransport;

impl MailTransport for PrintTransport {
    fn send(&self, message: &MailMessage) -> Result<()> {
        println!(
            "   [mail to {} via {}] {}",
            message.to, message.server.host, message.subject
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Sinklog - Async Logging Example ===\n");

    // One worker thread owns the file; callers only enqueue
    let file: ConcurrentFileSink =
        ConcurrencyWrapper::new(FileSink::new(LogLevel::ALL, "async_test.log")?)?;

    let alerts = RateLimiter::new(
        EmailSink::builder(Arc::new(PrintTransport))
            .level(LogLevel::ERROR)
            .from("service@example.com")
            .to("oncall@example.com")
            .server(SmtpServer::new("smtp.example.com").with_port(587))
            .build()?,
        3,
        Duration::from_secs(60),
    )?
    .on_enter(|_| println!("   Too many alerts, suppressing email"));

    let log = Arc::new(CompoundLog::new(vec![Arc::new(file), Arc::new(alerts)]));

    println!("1. Multi-threaded logging:");
    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..20 {
                    log.info(format!("Thread {} - Message {}", thread_id, i));
                }
                log.error(format!("Thread {} hit an error", thread_id));
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("A logging thread panicked");
        }
    }
    println!("   5 threads logged 21 messages each");

    // Waits for the file worker and any pending email
    log.block_while_writing()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_test.log' for file output");

    Ok(())
}
