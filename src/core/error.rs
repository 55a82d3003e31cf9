//! Error types for the logging library

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// A formatting entity could not be evaluated
    #[error("Formatter error ({entity}): {message}")]
    Formatter { entity: String, message: String },

    /// Mail transport failure for one recipient
    #[error("Failed to send mail to '{recipient}': {message}")]
    Transport { recipient: String, message: String },

    /// Database connection or insert failure
    #[error("Database error: {0}")]
    Database(String),

    /// Background work could not be scheduled
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// The sink's background worker has been stopped
    #[error("Logger already stopped")]
    LoggerStopped,

    /// The background worker panicked
    #[error("Background worker panicked: {0}")]
    WorkerPanicked(String),

    /// A sink panicked while writing
    #[error("Sink panicked while writing: {0}")]
    SinkPanicked(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LogError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LogError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(entity: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Formatter {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a mail transport error
    pub fn transport(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Transport {
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    pub fn database<S: Into<String>>(msg: S) -> Self {
        LogError::Database(msg.into())
    }

    pub fn scheduler<S: Into<String>>(msg: S) -> Self {
        LogError::Scheduler(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LogError::Other(msg.into())
    }

    /// Whether this error came from misconfiguration rather than I/O
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, LogError::InvalidConfiguration { .. })
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
