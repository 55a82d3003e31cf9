//! Built-in formatting entities

use super::entity::{EvalContext, FormattingEntity};
use super::value::Value;
use crate::core::Result;
use chrono::Local;
use std::sync::atomic::{AtomicI64, Ordering};

/// Call-site name of the entry
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingSite;

impl FormattingEntity for CallingSite {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        let entry = ctx.require_entry("CallingSite")?;
        Ok(Value::Text(entry.call_site.name().to_string()))
    }
}

/// Entry time as a raw date-time, or the current time without an entry
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTime;

impl FormattingEntity for EventTime {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        Ok(Value::DateTime(
            ctx.entry.map_or_else(Local::now, |entry| entry.event_time),
        ))
    }
}

/// Entry time (or the current time) rendered with a strftime pattern
#[derive(Debug, Clone)]
pub struct FormattedTime {
    pattern: String,
}

impl FormattedTime {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl FormattingEntity for FormattedTime {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        let time = ctx.entry.map_or_else(Local::now, |entry| entry.event_time);
        Ok(Value::Text(time.format(&self.pattern).to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Message;

impl FormattingEntity for Message {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        Ok(Value::Text(ctx.require_entry("Message")?.message.clone()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LevelName;

impl FormattingEntity for LevelName {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        Ok(Value::Level(ctx.require_entry("LevelName")?.level))
    }
}

/// The whole entry as a single-line JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryJson;

impl FormattingEntity for EntryJson {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        let entry = ctx.require_entry("EntryJson")?;

        let mut obj = serde_json::Map::new();
        obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(
                entry
                    .event_time
                    .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
                    .to_string(),
            ),
        );
        obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_string()),
        );
        obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        if let Some(module_path) = entry.call_site.module_path {
            obj.insert(
                "module_path".to_string(),
                serde_json::Value::String(module_path.to_string()),
            );
        }
        obj.insert(
            "file".to_string(),
            serde_json::Value::String(entry.call_site.file.to_string()),
        );
        obj.insert(
            "line".to_string(),
            serde_json::Value::Number(entry.call_site.line.into()),
        );

        Ok(Value::Text(serde_json::to_string(&serde_json::Value::Object(
            obj,
        ))?))
    }
}

/// Thread-safe, monotonically increasing counter
///
/// A commit evaluation advances the counter and yields the new value; a peek
/// yields the current value without advancing. The first commit yields the
/// start index.
#[derive(Debug)]
pub struct EvalCounter {
    count: AtomicI64,
    width: usize,
}

impl EvalCounter {
    /// Counter whose first committed value is 0
    pub fn new() -> Self {
        Self::indexed_from(0)
    }

    pub fn indexed_from(start: i64) -> Self {
        Self {
            count: AtomicI64::new(start.wrapping_sub(1)),
            width: 0,
        }
    }

    /// Zero-pad the rendered value to `width` digits
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Current value, without advancing
    pub fn current(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    fn render(&self, n: i64) -> Value {
        if self.width == 0 {
            Value::Integer(n)
        } else {
            Value::Text(format!("{:0width$}", n, width = self.width))
        }
    }
}

impl Default for EvalCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormattingEntity for EvalCounter {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        let n = if ctx.advance_counters {
            self.count.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
        } else {
            self.current()
        };
        Ok(self.render(n))
    }

    fn contains_counter(&self) -> bool {
        true
    }

    /// Back to 0; the next commit yields 1
    fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
