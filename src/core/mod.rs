//! Core log types and traits

pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod scheduler;

pub(crate) use error::panic_message;
pub use error::{LogError, Result};
pub use log::{Log, LogExt};
pub use log_entry::{CallSite, LogEntry};
pub use log_level::LogLevel;
pub use metrics::SinkMetrics;
#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;
pub use scheduler::{BackgroundScheduler, Job, ThreadScheduler};
