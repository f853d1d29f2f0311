//! Immutable record of a single logging call.
//!
//! A [`LoggingEvent`] owns copies of everything handed to the call that made
//! it: the diagnostic context, the marker, the throwable and the arguments.
//! Nothing reachable from an event can change after it is built.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::thread;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::argument::Argument;
use crate::console::{Console, ConsoleStream, StdConsole};
use crate::level::Level;
use crate::marker::Marker;
use crate::message_format::format_message;
use crate::throwable::Throwable;

/// Errors raised when querying an event.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The event was built directly rather than through a logger.
    #[error("event was not created by a logger")]
    NoCreatingLogger,
    /// The originating logger has since been removed from its registry.
    #[error("logger `{0}` is no longer registered")]
    LoggerNotRegistered(String),
}

/// One recorded logging call.
///
/// Equality and hashing consider the level, context map, marker, throwable,
/// message and arguments. The timestamp, thread name and originating logger
/// are recorded but do not take part, so an event captured from a logger
/// compares equal to an expectation built with [`LoggingEvent::builder`].
#[derive(Clone)]
pub struct LoggingEvent {
    level: Level,
    mdc: BTreeMap<String, String>,
    marker: Option<Marker>,
    throwable: Option<Throwable>,
    message: String,
    arguments: Vec<Argument>,
    timestamp: DateTime<Utc>,
    thread_name: String,
    creating_logger: Option<String>,
}

impl LoggingEvent {
    /// Start building an event at `level` with the message template `message`.
    pub fn builder(level: Level, message: impl Into<String>) -> EventBuilder {
        EventBuilder {
            level,
            mdc: BTreeMap::new(),
            marker: None,
            throwable: None,
            message: message.into(),
            arguments: Vec::new(),
            timestamp: None,
            creating_logger: None,
        }
    }

    /// Build an event with only a level, message and arguments.
    pub fn new<A>(level: Level, message: impl Into<String>, args: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Argument>,
    {
        Self::builder(level, message).args(args).build()
    }

    pub fn trace(message: impl Into<String>) -> Self {
        Self::builder(Level::Trace, message).build()
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::builder(Level::Debug, message).build()
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::builder(Level::Info, message).build()
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::builder(Level::Warn, message).build()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::builder(Level::Error, message).build()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Diagnostic context captured when the event was built.
    pub fn mdc(&self) -> &BTreeMap<String, String> {
        &self.mdc
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn throwable(&self) -> Option<&Throwable> {
        self.throwable.as_ref()
    }

    /// The unformatted message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Name of the thread that built the event, or `<unnamed>`.
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Name of the logger that produced this event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::NoCreatingLogger`] for events built directly.
    pub fn creating_logger(&self) -> Result<&str, EventError> {
        self.creating_logger
            .as_deref()
            .ok_or(EventError::NoCreatingLogger)
    }

    /// The message with its placeholders substituted.
    pub fn formatted_message(&self) -> String {
        format_message(&self.message, &self.arguments)
    }

    /// Render the console block for this event.
    ///
    /// The first line reads `<timestamp> [<thread>] <LEVEL> - <message>`; a
    /// throwable, when present, follows on subsequent lines.
    pub fn render(&self) -> String {
        let mut block = format!(
            "{} [{}] {} - {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.thread_name,
            self.level,
            self.formatted_message()
        );
        if let Some(throwable) = &self.throwable {
            block.push_str(&throwable.render());
        }
        block
    }

    /// Echo this event to the process console.
    pub fn print(&self) {
        self.print_to(&StdConsole);
    }

    /// Echo this event to `console`, choosing the stream from the level.
    pub fn print_to(&self, console: &dyn Console) {
        console.write_block(ConsoleStream::for_level(self.level), &self.render());
    }
}

impl PartialEq for LoggingEvent {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
            && self.mdc == other.mdc
            && self.marker == other.marker
            && self.throwable == other.throwable
            && self.message == other.message
            && self.arguments == other.arguments
    }
}

impl Eq for LoggingEvent {}

impl Hash for LoggingEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.mdc.hash(state);
        self.marker.hash(state);
        self.throwable.hash(state);
        self.message.hash(state);
        self.arguments.hash(state);
    }
}

impl fmt::Debug for LoggingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("LoggingEvent");
        s.field("level", &self.level);
        if !self.mdc.is_empty() {
            s.field("mdc", &self.mdc);
        }
        if let Some(marker) = &self.marker {
            s.field("marker", marker);
        }
        if let Some(throwable) = &self.throwable {
            s.field("throwable", throwable);
        }
        s.field("message", &self.message);
        if !self.arguments.is_empty() {
            s.field("arguments", &self.arguments);
        }
        s.finish_non_exhaustive()
    }
}

/// Builder for [`LoggingEvent`].
///
/// Every optional part can be set independently of the others.
#[derive(Clone, Debug)]
#[must_use]
pub struct EventBuilder {
    level: Level,
    mdc: BTreeMap<String, String>,
    marker: Option<Marker>,
    throwable: Option<Throwable>,
    message: String,
    arguments: Vec<Argument>,
    timestamp: Option<DateTime<Utc>>,
    creating_logger: Option<String>,
}

impl EventBuilder {
    /// Copy `mdc` into the event, replacing any earlier context.
    pub fn mdc<K, V>(mut self, mdc: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.mdc = mdc.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn throwable(mut self, throwable: Throwable) -> Self {
        self.throwable = Some(throwable);
        self
    }

    /// Append `args` to the positional arguments.
    pub fn args<A>(mut self, args: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Argument>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<Argument>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Stamp the event with `timestamp` instead of the current time.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub(crate) fn creating_logger(mut self, name: &str) -> Self {
        self.creating_logger = Some(name.to_owned());
        self
    }

    /// Finish the event.
    ///
    /// When no throwable was given and the last argument is one, it becomes
    /// the event's throwable and is removed from the arguments.
    pub fn build(mut self) -> LoggingEvent {
        if self.throwable.is_none()
            && let Some(Argument::Throwable(throwable)) = self.arguments.last()
        {
            self.throwable = Some(throwable.clone());
            self.arguments.pop();
        }
        let current = thread::current();
        LoggingEvent {
            level: self.level,
            mdc: self.mdc,
            marker: self.marker,
            throwable: self.throwable,
            message: self.message,
            arguments: self.arguments,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            thread_name: current.name().unwrap_or("<unnamed>").to_owned(),
            creating_logger: self.creating_logger,
        }
    }
}
