//! The formatting entity contract and its evaluation

use super::value::Value;
use crate::core::{LogEntry, LogError, Result};

/// Entities nested deeper than this are treated as a cycle
const MAX_CHAIN_DEPTH: usize = 64;

/// What an entity is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// The entry being formatted, absent for standalone evaluation
    pub entry: Option<&'a LogEntry>,
    /// Whether counters advance (commit) or only report their value (peek)
    pub advance_counters: bool,
}

impl<'a> EvalContext<'a> {
    pub fn commit(entry: Option<&'a LogEntry>) -> Self {
        Self {
            entry,
            advance_counters: true,
        }
    }

    pub fn peek(entry: Option<&'a LogEntry>) -> Self {
        Self {
            entry,
            advance_counters: false,
        }
    }

    /// The entry, or a formatter error naming `entity` when there is none
    pub fn require_entry(&self, entity: &str) -> Result<&'a LogEntry> {
        self.entry
            .ok_or_else(|| LogError::formatter(entity, "requires a log entry"))
    }
}

/// Something that evaluates to a [`Value`]
///
/// Entities may return another entity; [`evaluate`] keeps unwrapping until a
/// terminal value remains.
pub trait FormattingEntity: Send + Sync {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value>;

    /// Whether a counter is reachable from this entity
    fn contains_counter(&self) -> bool {
        false
    }

    /// Reset any counters reachable from this entity
    fn reset(&self) {}
}

/// Evaluate `value` down to a terminal (non-entity) value
pub fn evaluate(value: &Value, ctx: &EvalContext<'_>) -> Result<Value> {
    let mut current = match value {
        Value::Entity(entity) => entity.eval(ctx)?,
        terminal => return Ok(terminal.clone()),
    };

    for _ in 0..MAX_CHAIN_DEPTH {
        current = match current {
            Value::Entity(entity) => entity.eval(ctx)?,
            terminal => return Ok(terminal),
        };
    }

    Err(LogError::formatter(
        "evaluate",
        format!("entity chain deeper than {}", MAX_CHAIN_DEPTH),
    ))
}
