//! Database sink
//!
//! Issues one parameterised command per accepted entry. Parameter values are
//! bound on the calling thread; the command runs either there (synchronous
//! mode) or on a [`BackgroundScheduler`] (asynchronous mode).

use super::in_flight::InFlight;
use crate::core::{
    dispatch, panic_message, BackgroundScheduler, Log, LogEntry, LogError, LogLevel, Result,
};
use crate::format::{evaluate, EvalContext, Value};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Text(String),
    Integer(i64),
    DateTime(DateTime<Local>),
    Null,
}

impl From<Value> for DbValue {
    /// Convert an evaluated value; levels bind as their name
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => DbValue::Text(s),
            Value::Integer(n) => DbValue::Integer(n),
            Value::DateTime(t) => DbValue::DateTime(t),
            Value::Level(l) => DbValue::Text(l.to_string()),
            Value::Entity(_) => DbValue::Null,
        }
    }
}

/// Bound parameters in declaration order
pub type BoundParameters = Vec<(String, DbValue)>;

/// An open database connection
///
/// Dialect details (placeholder syntax, type mapping) are the
/// implementation's concern.
pub trait DbConnection: Send {
    /// Run `command` with `params`, returning the number of affected rows
    fn execute(&mut self, command: &str, params: &[(String, DbValue)]) -> Result<u64>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

pub type ConnectionFactory = Arc<dyn Fn() -> Result<Box<dyn DbConnection>> + Send + Sync>;

/// A named parameter and the value it is bound to per entry
#[derive(Debug, Clone)]
pub struct DbParameter {
    name: String,
    value: Option<Value>,
}

impl DbParameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A parameter always bound to NULL
    pub fn null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, entry: &LogEntry) -> Result<DbValue> {
        match &self.value {
            Some(value) => evaluate(value, &EvalContext::commit(Some(entry))).map(DbValue::from),
            None => Ok(DbValue::Null),
        }
    }
}

/// Connection handling shared with background inserts
struct Inserter {
    command: String,
    factory: ConnectionFactory,
    close_connections: bool,
    idle: Mutex<Option<Box<dyn DbConnection>>>,
}

impl Inserter {
    fn connection(&self) -> Result<Box<dyn DbConnection>> {
        match self.idle.lock().take() {
            Some(conn) => Ok(conn),
            None => (self.factory)(),
        }
    }

    fn insert(&self, params: &[(String, DbValue)]) -> Result<u64> {
        let mut conn = self.connection()?;
        let rows = match conn.execute(&self.command, params) {
            Ok(rows) => rows,
            Err(e) => {
                // A failed connection is never reused
                let _ = conn.close();
                return Err(e);
            }
        };

        if self.close_connections {
            conn.close()?;
        } else {
            let mut idle = self.idle.lock();
            if idle.is_none() {
                *idle = Some(conn);
            } else {
                drop(idle);
                conn.close()?;
            }
        }
        Ok(rows)
    }

    fn close_idle(&self) -> Result<()> {
        match self.idle.lock().take() {
            Some(mut conn) => conn.close(),
            None => Ok(()),
        }
    }
}

pub struct DbSink {
    level: LogLevel,
    parameters: Vec<DbParameter>,
    inserter: Arc<Inserter>,
    scheduler: Option<Arc<dyn BackgroundScheduler>>,
    in_flight: InFlight,
}

impl fmt::Debug for DbSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSink")
            .field("level", &self.level)
            .field("parameters", &self.parameters)
            .field("is_async", &self.scheduler.is_some())
            .finish_non_exhaustive()
    }
}

impl DbSink {
    #[must_use]
    pub fn builder(
        command: impl Into<String>,
        factory: impl Fn() -> Result<Box<dyn DbConnection>> + Send + Sync + 'static,
    ) -> DbSinkBuilder {
        DbSinkBuilder {
            level: LogLevel::ALL,
            command: command.into(),
            factory: Arc::new(factory),
            parameters: Vec::new(),
            close_connections: true,
            scheduler: None,
        }
    }

    pub fn is_async(&self) -> bool {
        self.scheduler.is_some()
    }

    pub fn pending(&self) -> usize {
        self.in_flight.count()
    }

    fn bind(&self, entry: &LogEntry) -> Result<BoundParameters> {
        self.parameters
            .iter()
            .map(|p| Ok((p.name.clone(), p.bind(entry)?)))
            .collect()
    }
}

impl Log for DbSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let params = self.bind(entry)?;

        let Some(scheduler) = &self.scheduler else {
            return self.inserter.insert(&params).map(|_| ());
        };

        let guard = self.in_flight.track();
        let inserter = Arc::clone(&self.inserter);
        let reporting = dispatch::is_reporting();
        scheduler.schedule(Box::new(move || {
            let _guard = guard;
            dispatch::with_reporting(reporting, || {
                let result = catch_unwind(AssertUnwindSafe(|| inserter.insert(&params)))
                    .unwrap_or_else(|payload| {
                        Err(LogError::SinkPanicked(panic_message(payload.as_ref())))
                    });
                if let Err(e) = result {
                    dispatch::report("Failed to insert log entry", &e);
                }
            });
        }))
    }

    fn block_while_writing(&self) -> Result<()> {
        self.in_flight.wait();
        Ok(())
    }
}

impl Drop for DbSink {
    fn drop(&mut self) {
        self.in_flight.wait();
        if let Err(e) = self.inserter.close_idle() {
            eprintln!("[LOGGER ERROR] Failed to close database connection: {}", e);
        }
    }
}

/// Builder for [`DbSink`]
pub struct DbSinkBuilder {
    level: LogLevel,
    command: String,
    factory: ConnectionFactory,
    parameters: Vec<DbParameter>,
    close_connections: bool,
    scheduler: Option<Arc<dyn BackgroundScheduler>>,
}

impl DbSinkBuilder {
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: DbParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Close the connection after every insert (default), or keep one idle
    /// connection for reuse
    #[must_use]
    pub fn close_connections(mut self, close: bool) -> Self {
        self.close_connections = close;
        self
    }

    /// Insert in the background on `scheduler`
    #[must_use]
    pub fn asynchronous(mut self, scheduler: Arc<dyn BackgroundScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn build(self) -> Result<DbSink> {
        if self.command.trim().is_empty() {
            return Err(LogError::config("DbSink", "command must not be empty"));
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if parameter.name.is_empty() {
                return Err(LogError::config("DbSink", "parameter name must not be empty"));
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(LogError::config(
                    "DbSink",
                    format!("duplicate parameter '{}'", parameter.name),
                ));
            }
        }

        Ok(DbSink {
            level: self.level,
            parameters: self.parameters,
            inserter: Arc::new(Inserter {
                command: self.command,
                factory: self.factory,
                close_connections: self.close_connections,
                idle: Mutex::new(None),
            }),
            scheduler: self.scheduler,
            in_flight: InFlight::default(),
        })
    }
}
