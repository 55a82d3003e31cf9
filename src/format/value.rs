//! Values produced by formatting entities

use super::entity::FormattingEntity;
use crate::core::LogLevel;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;

/// Rendering used for a bare [`Value::DateTime`]
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A literal or an entity still to be evaluated
#[derive(Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    DateTime(DateTime<Local>),
    Level(LogLevel),
    Entity(Arc<dyn FormattingEntity>),
}

impl Value {
    pub fn entity<E: FormattingEntity + 'static>(entity: E) -> Self {
        Value::Entity(Arc::new(entity))
    }

    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Value::Entity(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::DateTime(t) => f.debug_tuple("DateTime").field(t).finish(),
            Value::Level(l) => f.debug_tuple("Level").field(l).finish(),
            Value::Entity(_) => f.write_str("Entity(..)"),
        }
    }
}

/// String form of a terminal value
///
/// An unevaluated entity renders as an empty string; evaluate it first.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::DateTime(t) => write!(f, "{}", t.format(DEFAULT_TIME_FORMAT)),
            Value::Level(l) => write!(f, "{}", l),
            Value::Entity(_) => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<DateTime<Local>> for Value {
    fn from(t: DateTime<Local>) -> Self {
        Value::DateTime(t)
    }
}

impl From<LogLevel> for Value {
    fn from(l: LogLevel) -> Self {
        Value::Level(l)
    }
}

impl From<Arc<dyn FormattingEntity>> for Value {
    fn from(e: Arc<dyn FormattingEntity>) -> Self {
        Value::Entity(e)
    }
}
