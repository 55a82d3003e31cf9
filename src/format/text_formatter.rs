//! Text formatter: an ordered sequence of values rendered into one string

use super::entities::{CallingSite, EvalCounter, FormattedTime, LevelName, Message};
use super::entity::{evaluate, EvalContext, FormattingEntity};
use super::value::{Value, DEFAULT_TIME_FORMAT};
use crate::core::{LogEntry, Result};
use std::sync::Arc;

/// Concatenates the evaluated string form of each of its values
///
/// A formatter is itself a [`FormattingEntity`], so formatters nest. Clones
/// share their entities, counters included.
///
/// # Example
///
/// ```
/// use sinklog::format::{EvalCounter, TextFormatter};
///
/// let formatter = TextFormatter::builder()
///     .text("app-")
///     .counter(EvalCounter::indexed_from(1).with_width(2))
///     .text(".log")
///     .build();
///
/// assert_eq!(formatter.format_standalone().unwrap(), "app-01.log");
/// assert_eq!(formatter.format_standalone().unwrap(), "app-02.log");
/// ```
#[derive(Debug, Clone)]
pub struct TextFormatter {
    parts: Vec<Value>,
}

impl TextFormatter {
    pub fn new(parts: Vec<Value>) -> Self {
        Self { parts }
    }

    #[must_use]
    pub fn builder() -> TextFormatterBuilder {
        TextFormatterBuilder::default()
    }

    /// `"<time> - <call site>: <level>: <message>"`
    pub fn default_layout() -> Self {
        Self::builder()
            .time(DEFAULT_TIME_FORMAT)
            .text(" - ")
            .call_site()
            .text(": ")
            .level()
            .text(": ")
            .message()
            .build()
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    /// Render `entry`, advancing any counters
    pub fn format(&self, entry: &LogEntry) -> Result<String> {
        self.format_with(&EvalContext::commit(Some(entry)))
    }

    /// Render without an entry; entry entities fail
    pub fn format_standalone(&self) -> Result<String> {
        self.format_with(&EvalContext::commit(None))
    }

    pub fn format_with(&self, ctx: &EvalContext<'_>) -> Result<String> {
        let mut out = String::new();
        for part in &self.parts {
            out.push_str(&evaluate(part, ctx)?.to_string());
        }
        Ok(out)
    }

    pub fn contains_counter(&self) -> bool {
        self.parts.iter().any(|part| match part {
            Value::Entity(entity) => entity.contains_counter(),
            _ => false,
        })
    }

    pub fn reset_counters(&self) {
        for part in &self.parts {
            if let Value::Entity(entity) = part {
                entity.reset();
            }
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::default_layout()
    }
}

impl FormattingEntity for TextFormatter {
    fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value> {
        self.format_with(ctx).map(Value::Text)
    }

    fn contains_counter(&self) -> bool {
        TextFormatter::contains_counter(self)
    }

    fn reset(&self) {
        self.reset_counters();
    }
}

/// Builder for [`TextFormatter`]
#[derive(Debug, Default)]
pub struct TextFormatterBuilder {
    parts: Vec<Value>,
}

impl TextFormatterBuilder {
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.parts.push(value.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.value(Value::Text(text.into()))
    }

    #[must_use]
    pub fn entity<E: FormattingEntity + 'static>(self, entity: E) -> Self {
        self.value(Value::Entity(Arc::new(entity)))
    }

    #[must_use]
    pub fn call_site(self) -> Self {
        self.entity(CallingSite)
    }

    #[must_use]
    pub fn level(self) -> Self {
        self.entity(LevelName)
    }

    #[must_use]
    pub fn message(self) -> Self {
        self.entity(Message)
    }

    #[must_use]
    pub fn time(self, pattern: impl Into<String>) -> Self {
        self.entity(FormattedTime::new(pattern))
    }

    #[must_use]
    pub fn counter(self, counter: EvalCounter) -> Self {
        self.entity(counter)
    }

    pub fn build(self) -> TextFormatter {
        TextFormatter::new(self.parts)
    }
}
