//! Logs that wrap other logs

pub mod compound;
pub mod concurrency;
pub mod filter;
pub mod rate_limiter;

pub use compound::CompoundLog;
#[cfg(feature = "console")]
pub use concurrency::ConcurrentColouredConsoleSink;
pub use concurrency::{ConcurrencyWrapper, ConcurrentFileSink};
pub use filter::Filter;
pub use rate_limiter::{RateLimitCallback, RateLimitSettings, RateLimiter};
