//! Named capture point for logging calls.
//!
//! A [`TestLogger`] records every enabled call as a [`LoggingEvent`]. The
//! event is kept in the logger's own per-thread and cross-thread lists and
//! handed to the owning registry, which keeps its own pair of lists and
//! decides whether to echo the event to the console.
//!
//! All call shapes funnel through [`LogCall`], a small descriptor carrying
//! the level plus any marker, throwable or explicit context map. The
//! per-level methods in `convenience_methods` are thin wrappers around it.

mod convenience_methods;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::argument::Argument;
use crate::event_store::{EventStore, Gated};
use crate::level::{Level, LevelSet};
use crate::logging_event::LoggingEvent;
use crate::marker::Marker;
use crate::mdc;
use crate::registry::EventSink;
use crate::throwable::Throwable;

/// Logger that records calls instead of writing them anywhere.
///
/// Obtain one from [`LoggerRegistry::get_logger`](crate::LoggerRegistry::get_logger);
/// the registry hands out the same instance for every request with the
/// same name.
pub struct TestLogger {
    name: String,
    enabled_levels: AtomicU8,
    events: EventStore,
    sink: Arc<EventSink>,
}

impl TestLogger {
    pub(crate) fn new(name: &str, sink: Arc<EventSink>) -> Self {
        Self {
            name: name.to_owned(),
            enabled_levels: AtomicU8::new(LevelSet::all().bits()),
            events: EventStore::new(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels for which calls are currently recorded.
    pub fn enabled_levels(&self) -> LevelSet {
        LevelSet::from_bits(self.enabled_levels.load(Ordering::Acquire))
    }

    /// Replace the enabled levels.
    ///
    /// The set is swapped with a single atomic store, so concurrent callers
    /// observe either the old set or the new one.
    pub fn set_enabled_levels(&self, levels: impl Into<LevelSet>) {
        self.enabled_levels
            .store(levels.into().bits(), Ordering::Release);
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.enabled_levels().contains(level)
    }

    /// Describe a call at `level`; finish it with [`LogCall::log`].
    pub fn at(&self, level: Level) -> LogCall<'_> {
        LogCall {
            logger: self,
            level,
            mdc: None,
            marker: None,
            throwable: None,
        }
    }

    /// Record `message` at `level` with no arguments.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.at(level).log(message, crate::args![]);
    }

    /// Events recorded through this logger on the calling thread.
    pub fn logging_events(&self) -> Vec<LoggingEvent> {
        self.events.current_thread()
    }

    /// Events recorded through this logger on every thread, in order.
    pub fn all_logging_events(&self) -> Vec<LoggingEvent> {
        self.events.all()
    }

    /// Forget the calling thread's events for this logger.
    pub fn clear(&self) {
        self.clear_gated(&self.sink.lock());
    }

    /// Forget this logger's events on every thread.
    pub fn clear_all(&self) {
        self.clear_all_gated(&self.sink.lock());
    }

    pub(crate) fn clear_gated(&self, gate: &Gated<'_>) {
        self.events.clear_current_thread(gate);
    }

    pub(crate) fn clear_all_gated(&self, gate: &Gated<'_>) {
        self.events.clear_all(gate);
    }

    /// Core recording logic behind every call shape.
    fn record(&self, call: LogCall<'_>, message: String, args: Vec<Argument>) {
        let mut builder = LoggingEvent::builder(call.level, message)
            .mdc(call.mdc.unwrap_or_else(mdc::copy_of_context_map))
            .args(args)
            .timestamp(self.sink.now())
            .creating_logger(&self.name);
        if let Some(marker) = call.marker {
            builder = builder.marker(marker);
        }
        if let Some(throwable) = call.throwable {
            builder = builder.throwable(throwable);
        }
        let event = builder.build();

        self.sink.print_if_due(&event);
        let gate = self.sink.lock();
        self.events.push(&gate, event.clone());
        self.sink.add(&gate, event);
    }
}

impl fmt::Debug for TestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestLogger")
            .field("name", &self.name)
            .field("enabled_levels", &self.enabled_levels())
            .finish_non_exhaustive()
    }
}

/// Description of one logging call before it is recorded.
#[must_use = "a LogCall records nothing until `log` is called"]
pub struct LogCall<'a> {
    logger: &'a TestLogger,
    level: Level,
    mdc: Option<BTreeMap<String, String>>,
    marker: Option<Marker>,
    throwable: Option<Throwable>,
}

impl LogCall<'_> {
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn throwable(mut self, throwable: Throwable) -> Self {
        self.throwable = Some(throwable);
        self
    }

    /// Use `mdc` instead of the calling thread's diagnostic context.
    pub fn mdc<K, V>(mut self, mdc: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.mdc = Some(mdc.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Record the call. Nothing happens when the level is disabled.
    pub fn log<A>(self, message: impl Into<String>, args: impl IntoIterator<Item = A>)
    where
        A: Into<Argument>,
    {
        if !self.logger.is_enabled(self.level) {
            return;
        }
        let logger = self.logger;
        let args = args.into_iter().map(Into::into).collect();
        logger.record(self, message.into(), args);
    }
}
