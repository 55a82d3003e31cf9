//! Log sinks

pub mod console;
pub mod db;
pub mod email;
pub mod file;
mod in_flight;
pub mod memory;
pub mod null;

#[cfg(feature = "console")]
pub use console::ColouredConsoleSink;
pub use console::ConsoleSink;
pub use db::{BoundParameters, ConnectionFactory, DbConnection, DbParameter, DbSink, DbSinkBuilder, DbValue};
pub use email::{
    is_valid_email_address, EmailSettings, EmailSink, EmailSinkBuilder, MailMessage, MailTransport,
    SmtpCredentials, SmtpServer,
};
pub use file::FileSink;
pub use memory::{ListSink, QueueSink, StackSink};
pub use null::NullSink;
