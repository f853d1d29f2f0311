//! Registry mapping logger names to capturing loggers.
//!
//! A [`LoggerRegistry`] owns the name-to-logger map together with two event
//! lists: one per thread, holding only what that thread logged, and one
//! shared by all threads, holding everything in insertion order. It also
//! holds the print threshold, the console events are echoed to and the
//! clock events are stamped with.
//!
//! Registries are ordinary values. [`LoggerRegistry::global`] provides the
//! process-wide instance that the `log` bridge and most tests use.

use std::any::type_name;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::console::{Console, StdConsole};
use crate::event_store::{EventStore, Gated, WriteGate};
use crate::level::{ParseLevelError, Threshold};
use crate::logger::TestLogger;
use crate::logging_event::{EventError, LoggingEvent};
use crate::properties::{OverridableProperties, PropertiesError, PropertySource};

/// Name of the property source read by [`LoggerRegistry::global`].
pub const PROPERTY_SOURCE: &str = "logcapture";
/// Property holding the initial print threshold.
pub const PRINT_LEVEL_KEY: &str = "print.level";
const DEFAULT_PRINT_LEVEL: &str = "OFF";

/// Errors raised while configuring a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The configured print threshold is not a level name.
    #[error("invalid level name `{value}` in {origin}")]
    InvalidPrintLevel {
        key: String,
        value: String,
        origin: String,
        #[source]
        source: ParseLevelError,
    },
    /// The property source could not be loaded.
    #[error(transparent)]
    Properties(#[from] PropertiesError),
}

/// Registry-wide event storage shared with every logger it creates.
pub(crate) struct EventSink {
    gate: WriteGate,
    events: EventStore,
    print_level: AtomicU8,
    console: Arc<dyn Console>,
    clock: Arc<dyn Clock>,
}

impl EventSink {
    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn print_level(&self) -> Threshold {
        Threshold::from_u8(self.print_level.load(Ordering::Relaxed))
    }

    pub(crate) fn print_if_due(&self, event: &LoggingEvent) {
        if self.print_level().admits(event.level()) {
            event.print_to(self.console.as_ref());
        }
    }

    /// Hold off every other append and clear in this registry.
    pub(crate) fn lock(&self) -> Gated<'_> {
        self.gate.lock()
    }

    pub(crate) fn add(&self, gate: &Gated<'_>, event: LoggingEvent) {
        self.events.push(gate, event);
    }
}

/// Builder for [`LoggerRegistry`].
#[must_use]
pub struct RegistryBuilder {
    print_level: Threshold,
    console: Arc<dyn Console>,
    clock: Arc<dyn Clock>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            print_level: Threshold::Off,
            console: Arc::new(StdConsole),
            clock: Arc::new(SystemClock),
        }
    }
}

impl RegistryBuilder {
    pub fn print_level(mut self, print_level: Threshold) -> Self {
        self.print_level = print_level;
        self
    }

    /// Echo printed events to `console` instead of the process streams.
    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Arc::new(console);
        self
    }

    /// Stamp events with `clock` instead of wall-clock time.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Take the print threshold from `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPrintLevel`] when the resolved value
    /// is not a level name or `OFF`.
    pub fn configure(mut self, properties: &dyn PropertySource) -> Result<Self, RegistryError> {
        let value = properties.resolve(PRINT_LEVEL_KEY, DEFAULT_PRINT_LEVEL);
        self.print_level = value
            .parse::<Threshold>()
            .map_err(|source| RegistryError::InvalidPrintLevel {
                key: PRINT_LEVEL_KEY.to_owned(),
                origin: properties.describe(PRINT_LEVEL_KEY),
                value: value.clone(),
                source,
            })?;
        tracing::debug!(target: "logcapture", print_level = %self.print_level, "resolved print level");
        Ok(self)
    }

    pub fn build(self) -> LoggerRegistry {
        LoggerRegistry {
            loggers: DashMap::new(),
            sink: Arc::new(EventSink {
                gate: WriteGate::default(),
                events: EventStore::new(),
                print_level: AtomicU8::new(self.print_level as u8),
                console: self.console,
                clock: self.clock,
            }),
        }
    }
}

static GLOBAL: Lazy<LoggerRegistry> = Lazy::new(|| {
    match LoggerRegistry::from_default_properties() {
        Ok(registry) => registry,
        Err(err) => panic!(
            "logcapture: failed to initialise the global registry: {}",
            error_chain(&err)
        ),
    }
});

fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Owner of every capturing logger and the events they record.
pub struct LoggerRegistry {
    loggers: DashMap<String, Arc<TestLogger>>,
    sink: Arc<EventSink>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Registry that never prints, writes to the process console and uses
    /// wall-clock time.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry whose print threshold comes from `properties`.
    ///
    /// # Errors
    ///
    /// See [`RegistryBuilder::configure`].
    pub fn from_properties(properties: &dyn PropertySource) -> Result<Self, RegistryError> {
        Ok(Self::builder().configure(properties)?.build())
    }

    /// Build a registry configured from `logcapture.properties` and the
    /// `LOGCAPTURE_PRINT_LEVEL` environment variable.
    ///
    /// # Errors
    ///
    /// Fails if the properties file is unreadable or malformed, or names an
    /// unknown level.
    pub fn from_default_properties() -> Result<Self, RegistryError> {
        let properties = OverridableProperties::load(PROPERTY_SOURCE)?;
        Self::from_properties(&properties)
    }

    /// The process-wide registry, configured on first use.
    ///
    /// # Panics
    ///
    /// Panics on first use if configuration fails; a misconfigured print
    /// level cannot be recovered from.
    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL
    }

    /// Return the logger named `name`, creating it on first request.
    ///
    /// Concurrent first requests for the same name all receive the one
    /// instance that was inserted. Only the map shard holding `name` is
    /// locked while inserting.
    pub fn get_logger(&self, name: &str) -> Arc<TestLogger> {
        if let Some(logger) = self.loggers.get(name) {
            return Arc::clone(logger.value());
        }
        let logger = self.loggers.entry(name.to_owned()).or_insert_with(|| {
            tracing::debug!(target: "logcapture", logger = name, "registered logger");
            Arc::new(TestLogger::new(name, Arc::clone(&self.sink)))
        });
        Arc::clone(logger.value())
    }

    /// Return the logger named after type `T`.
    pub fn get_logger_for<T: ?Sized>(&self) -> Arc<TestLogger> {
        self.get_logger(type_name::<T>())
    }

    /// Snapshot of every registered logger by name.
    pub fn all_loggers(&self) -> HashMap<String, Arc<TestLogger>> {
        self.loggers
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    /// Sorted names of every registered logger.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .loggers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Events logged by any logger on the calling thread.
    pub fn logging_events(&self) -> Vec<LoggingEvent> {
        self.sink.events.current_thread()
    }

    /// Events logged by any logger on any thread, in order.
    pub fn all_logging_events(&self) -> Vec<LoggingEvent> {
        self.sink.events.all()
    }

    /// Resolve the logger that produced `event`.
    ///
    /// # Errors
    ///
    /// Fails if the event was built directly, or its logger has been removed
    /// by [`reset`](Self::reset).
    pub fn creating_logger(&self, event: &LoggingEvent) -> Result<Arc<TestLogger>, EventError> {
        let name = event.creating_logger()?;
        self.loggers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EventError::LoggerNotRegistered(name.to_owned()))
    }

    /// Clear the calling thread's events from every logger and from this
    /// registry. Other threads' events and logger registrations are kept.
    pub fn clear_loggers(&self) {
        let gate = self.sink.lock();
        for entry in self.loggers.iter() {
            entry.value().clear_gated(&gate);
        }
        self.sink.events.clear_current_thread(&gate);
        tracing::debug!(target: "logcapture", "cleared current thread's events");
    }

    /// Clear every event on every thread. Logger registrations are kept.
    ///
    /// Appends from concurrent calls wait until the clear completes, so each
    /// event is either removed from every list or kept in every list.
    pub fn clear_all_loggers(&self) {
        let gate = self.sink.lock();
        for entry in self.loggers.iter() {
            entry.value().clear_all_gated(&gate);
        }
        self.sink.events.clear_all(&gate);
        tracing::debug!(target: "logcapture", "cleared all events");
    }

    /// Clear every event and remove every logger.
    pub fn reset(&self) {
        self.clear_all_loggers();
        self.loggers.clear();
        tracing::debug!(target: "logcapture", "reset registry");
    }

    pub fn print_level(&self) -> Threshold {
        self.sink.print_level()
    }

    pub fn set_print_level(&self, print_level: Threshold) {
        self.sink
            .print_level
            .store(print_level as u8, Ordering::Relaxed);
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.logger_names())
            .field("print_level", &self.print_level())
            .finish_non_exhaustive()
    }
}
