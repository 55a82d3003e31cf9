//! Asynchronous email sink
//!
//! Each accepted entry is formatted into a subject and body on the calling
//! thread, then one message per recipient is handed to a [`MailTransport`]
//! on a [`BackgroundScheduler`]. Send failures go to the internal log.

use super::in_flight::InFlight;
use crate::core::{
    dispatch, panic_message, BackgroundScheduler, Log, LogEntry, LogError, LogLevel, Result,
    ThreadScheduler,
};
use crate::format::{TextFormatter, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub const DEFAULT_SUBJECT: &str = "Log Message";
pub const BODY_PREAMBLE: &str = "A message was logged:\n\n";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where mail is relayed through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpServer {
    pub host: String,
    /// Must be within 1..=65535 when given
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub credentials: Option<SmtpCredentials>,
}

impl SmtpServer {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(SmtpCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(LogError::config("EmailSink", "SMTP host must not be empty"));
        }
        if let Some(port) = self.port {
            if !(1..=65535).contains(&port) {
                return Err(LogError::config(
                    "EmailSink",
                    format!("SMTP port must be in the range 1-65535, got {}", port),
                ));
            }
        }
        Ok(())
    }
}

/// One message for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub server: SmtpServer,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Capability to deliver a mail message
///
/// Called from background jobs; an implementation may block.
pub trait MailTransport: Send + Sync {
    fn send(&self, message: &MailMessage) -> Result<()>;
}

/// Serde-loadable email sink configuration
///
/// ```
/// use sinklog::sinks::EmailSettings;
///
/// let settings: EmailSettings = serde_json::from_str(r#"{
///     "level": "Error",
///     "from": "app@example.com",
///     "to": ["ops@example.com"],
///     "server": { "host": "smtp.example.com", "port": 587 }
/// }"#).unwrap();
///
/// assert_eq!(settings.server.port, Some(587));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default = "all_levels")]
    pub level: LogLevel,
    pub from: String,
    pub to: Vec<String>,
    /// Literal subject; the default is used when absent
    #[serde(default)]
    pub subject: Option<String>,
    pub server: SmtpServer,
}

fn all_levels() -> LogLevel {
    LogLevel::ALL
}

impl EmailSettings {
    pub fn into_builder(self, transport: Arc<dyn MailTransport>) -> EmailSinkBuilder {
        let mut builder = EmailSink::builder(transport)
            .level(self.level)
            .from(self.from)
            .server(self.server);
        for to in self.to {
            builder = builder.to(to);
        }
        if let Some(subject) = self.subject {
            builder = builder.subject(TextFormatter::new(vec![Value::Text(subject)]));
        }
        builder
    }

    pub fn build(self, transport: Arc<dyn MailTransport>) -> Result<EmailSink> {
        self.into_builder(transport).build()
    }
}

/// A deliberately simple address check: `local@domain.tld`, no whitespace
pub fn is_valid_email_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

pub struct EmailSink {
    level: LogLevel,
    server: SmtpServer,
    from: String,
    to: Vec<String>,
    subject: TextFormatter,
    body: TextFormatter,
    transport: Arc<dyn MailTransport>,
    scheduler: Arc<dyn BackgroundScheduler>,
    in_flight: InFlight,
}

impl fmt::Debug for EmailSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSink")
            .field("level", &self.level)
            .field("server", &self.server)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl EmailSink {
    #[must_use]
    pub fn builder(transport: Arc<dyn MailTransport>) -> EmailSinkBuilder {
        EmailSinkBuilder::new(transport)
    }

    /// Body used when none is configured: a preamble and the default layout
    pub fn default_body() -> TextFormatter {
        TextFormatter::new(vec![
            Value::Text(BODY_PREAMBLE.to_string()),
            Value::entity(TextFormatter::default_layout()),
        ])
    }

    pub fn recipients(&self) -> &[String] {
        &self.to
    }

    /// Messages scheduled but not yet delivered or failed
    pub fn pending(&self) -> usize {
        self.in_flight.count()
    }

    fn send_in_background(&self, message: MailMessage) -> Result<()> {
        let guard = self.in_flight.track();
        let transport = Arc::clone(&self.transport);
        let reporting = dispatch::is_reporting();

        self.scheduler.schedule(Box::new(move || {
            let _guard = guard;
            dispatch::with_reporting(reporting, || {
                let result = catch_unwind(AssertUnwindSafe(|| transport.send(&message)))
                    .unwrap_or_else(|payload| {
                        Err(LogError::SinkPanicked(panic_message(payload.as_ref())))
                    });
                if let Err(e) = result {
                    dispatch::report(&format!("Failed to email log entry to {}", message.to), &e);
                }
            });
        }))
    }
}

impl Log for EmailSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let subject = self.subject.format(entry)?;
        let body = self.body.format(entry)?;

        let mut first_error = None;
        for to in &self.to {
            let message = MailMessage {
                server: self.server.clone(),
                from: self.from.clone(),
                to: to.clone(),
                subject: subject.clone(),
                body: body.clone(),
            };
            if let Err(e) = self.send_in_background(message) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn block_while_writing(&self) -> Result<()> {
        self.in_flight.wait();
        Ok(())
    }
}

impl Drop for EmailSink {
    fn drop(&mut self) {
        self.in_flight.wait();
    }
}

/// Builder for [`EmailSink`]
pub struct EmailSinkBuilder {
    level: LogLevel,
    from: Option<String>,
    to: Vec<String>,
    server: Option<SmtpServer>,
    subject: Option<TextFormatter>,
    body: Option<TextFormatter>,
    transport: Arc<dyn MailTransport>,
    scheduler: Option<Arc<dyn BackgroundScheduler>>,
}

impl EmailSinkBuilder {
    fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self {
            level: LogLevel::ALL,
            from: None,
            to: Vec::new(),
            server: None,
            subject: None,
            body: None,
            transport,
            scheduler: None,
        }
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a recipient
    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    #[must_use]
    pub fn server(mut self, server: SmtpServer) -> Self {
        self.server = Some(server);
        self
    }

    #[must_use]
    pub fn subject(mut self, formatter: TextFormatter) -> Self {
        self.subject = Some(formatter);
        self
    }

    #[must_use]
    pub fn body(mut self, formatter: TextFormatter) -> Self {
        self.body = Some(formatter);
        self
    }

    /// Run sends on `scheduler` instead of detached threads
    #[must_use]
    pub fn scheduler(mut self, scheduler: Arc<dyn BackgroundScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn build(self) -> Result<EmailSink> {
        let from = self
            .from
            .ok_or_else(|| LogError::config("EmailSink", "from address is required"))?;
        if !is_valid_email_address(&from) {
            return Err(LogError::config(
                "EmailSink",
                format!("from address '{}' is not a valid email address", from),
            ));
        }

        if self.to.is_empty() {
            return Err(LogError::config(
                "EmailSink",
                "at least one recipient is required",
            ));
        }
        if let Some(bad) = self.to.iter().find(|to| !is_valid_email_address(to)) {
            return Err(LogError::config(
                "EmailSink",
                format!("recipient '{}' is not a valid email address", bad),
            ));
        }

        let server = self
            .server
            .ok_or_else(|| LogError::config("EmailSink", "SMTP server is required"))?;
        server.validate()?;

        Ok(EmailSink {
            level: self.level,
            server,
            from,
            to: self.to,
            subject: self
                .subject
                .unwrap_or_else(|| TextFormatter::new(vec![Value::from(DEFAULT_SUBJECT)])),
            body: self.body.unwrap_or_else(EmailSink::default_body),
            transport: self.transport,
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Arc::new(ThreadScheduler::with_thread_name("sinklog-email"))),
            in_flight: InFlight::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{defaults, LogExt};
    use crate::sinks::StackSink;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<MailMessage>>,
        delay: Option<Duration>,
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, message: &MailMessage) -> Result<()> {
            if let Some(delay) = self.delay {
                thread::sleep(delay);
            }
            self.sent.lock().push(message.clone());
            Ok(())
        }
    }

    struct RefusingTransport;

    impl MailTransport for RefusingTransport {
        fn send(&self, message: &MailMessage) -> Result<()> {
            Err(LogError::transport(&message.to, "connection refused"))
        }
    }

    #[derive(Default)]
    struct CountingRefusal(AtomicUsize);

    impl MailTransport for CountingRefusal {
        fn send(&self, message: &MailMessage) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LogError::transport(&message.to, "mailbox full"))
        }
    }

    fn builder(transport: Arc<dyn MailTransport>) -> EmailSinkBuilder {
        EmailSink::builder(transport)
            .from("app@example.com")
            .to("ops@example.com")
            .to("dev@example.com")
            .server(SmtpServer::new("smtp.example.com").with_port(25))
    }

    #[test]
    fn test_one_message_per_recipient() {
        let transport = Arc::new(RecordingTransport {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let sink = builder(transport.clone()).build().unwrap();

        sink.error("database unreachable");
        sink.block_while_writing().unwrap();

        assert_eq!(sink.pending(), 0);
        let sent = transport.sent.lock();
        assert_eq!(sent.len(), 2);
        let mut recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        recipients.sort_unstable();
        assert_eq!(recipients, ["dev@example.com", "ops@example.com"]);

        let message = &sent[0];
        assert_eq!(message.subject, DEFAULT_SUBJECT);
        assert_eq!(message.from, "app@example.com");
        assert!(message.body.starts_with(BODY_PREAMBLE));
        assert!(message.body.ends_with(": Error: database unreachable"));
    }

    #[test]
    fn test_rejected_level_sends_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        let sink = builder(transport.clone())
            .level(LogLevel::ERROR)
            .build()
            .unwrap();

        sink.info("not worth an email");
        sink.block_while_writing().unwrap();
        assert!(transport.sent.lock().is_empty());
    }

    #[test]
    fn test_custom_subject() {
        let transport = Arc::new(RecordingTransport::default());
        let sink = builder(transport.clone())
            .subject(TextFormatter::builder().text("[").level().text("] alert").build())
            .build()
            .unwrap();

        sink.warn("x");
        sink.block_while_writing().unwrap();
        assert!(transport
            .sent
            .lock()
            .iter()
            .all(|m| m.subject == "[Warning] alert"));
    }

    #[test]
    fn test_send_failure_goes_to_internal_log() {
        let _lock = defaults::test_lock();
        let internal = Arc::new(StackSink::new(LogLevel::ALL));
        defaults::set_internal_log(internal.clone());

        let sink = builder(Arc::new(RefusingTransport)).build().unwrap();
        sink.error("boom");
        sink.block_while_writing().unwrap();

        let reports = internal.entries();
        assert!(reports
            .iter()
            .any(|e| e.message.contains("ops@example.com") && e.message.contains("refused")));
        defaults::reset_internal_log();
    }

    #[test]
    fn test_failing_internal_email_sink_stops_after_one_report() {
        let _lock = defaults::test_lock();
        let transport = Arc::new(CountingRefusal::default());
        let sink = Arc::new(
            EmailSink::builder(transport.clone())
                .from("app@example.com")
                .to("ops@example.com")
                .server(SmtpServer::new("smtp.example.com"))
                .build()
                .unwrap(),
        );
        defaults::set_internal_log(sink.clone());

        sink.error("one");
        sink.block_while_writing().unwrap();

        // The entry itself, then the report of its failure
        assert_eq!(transport.0.load(Ordering::SeqCst), 2);
        assert_eq!(sink.pending(), 0);
        defaults::reset_internal_log();
    }

    #[test]
    fn test_drop_waits_for_pending_sends() {
        let transport = Arc::new(RecordingTransport {
            delay: Some(Duration::from_millis(30)),
            ..Default::default()
        });
        {
            let sink = builder(transport.clone()).build().unwrap();
            sink.info("bye");
        }
        assert_eq!(transport.sent.lock().len(), 2);
    }

    #[test]
    fn test_configuration_is_validated() {
        let transport: Arc<dyn MailTransport> = Arc::new(RecordingTransport::default());

        let bad_from = builder(transport.clone()).from("not-an-address").build();
        assert!(bad_from.unwrap_err().is_configuration());

        let bad_to = builder(transport.clone()).to("nobody@").build();
        assert!(bad_to.unwrap_err().is_configuration());

        let no_to = EmailSink::builder(transport.clone())
            .from("app@example.com")
            .server(SmtpServer::new("smtp.example.com"))
            .build();
        assert!(no_to.unwrap_err().is_configuration());

        for port in [0, 65536] {
            let bad_port = builder(transport.clone())
                .server(SmtpServer::new("smtp.example.com").with_port(port))
                .build();
            assert!(bad_port.unwrap_err().is_configuration());
        }

        let max_port = builder(transport)
            .server(SmtpServer::new("smtp.example.com").with_port(65535))
            .build();
        assert!(max_port.is_ok());
    }

    #[test]
    fn test_address_check() {
        assert!(is_valid_email_address("a.b@example.co.uk"));
        assert!(!is_valid_email_address("a b@example.com"));
        assert!(!is_valid_email_address("@example.com"));
        assert!(!is_valid_email_address("a@b@example.com"));
        assert!(!is_valid_email_address("a@example."));
        assert!(!is_valid_email_address("a@localhost"));
    }

    #[test]
    fn test_settings_from_json() {
        let settings: EmailSettings = serde_json::from_str(
            r#"{
                "level": "Warning | Error",
                "from": "app@example.com",
                "to": ["ops@example.com"],
                "subject": "Production alert",
                "server": {
                    "host": "smtp.example.com",
                    "credentials": { "username": "app", "password": "hunter2" }
                }
            }"#,
        )
        .unwrap();
        assert!(!format!("{:?}", settings).contains("hunter2"));

        let transport = Arc::new(RecordingTransport::default());
        let sink = settings.build(transport.clone()).unwrap();
        assert_eq!(sink.level(), LogLevel::WARNING | LogLevel::ERROR);

        sink.error("disk full");
        sink.block_while_writing().unwrap();
        let sent = transport.sent.lock();
        assert_eq!(sent[0].subject, "Production alert");
        assert_eq!(
            sent[0].server.credentials.as_ref().map(|c| c.username.as_str()),
            Some("app")
        );
    }
}
