//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `CaptureLogAdapter`, an implementation of
//! `log::Log` that records every `log` macro call in the global
//! [`LoggerRegistry`]. Each record goes to the logger named by its target,
//! which defaults to the calling module path.

use std::sync::OnceLock;

use log::{Metadata, Record};
use thiserror::Error;

use crate::level::Level;
use crate::registry::LoggerRegistry;

/// Error returned when the bridge cannot become the global logger.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error("global Rust logger is already set; logcapture cannot install the log bridge")]
    AlreadySet,
}

/// Adapter implementing the Rust `log::Log` trait.
///
/// Records are routed through [`TestLogger::at`](crate::TestLogger::at), so
/// disabled levels are dropped and the calling thread's diagnostic context is
/// captured exactly as for direct calls.
pub struct CaptureLogAdapter;

fn map_log_level(level: log::Level) -> Level {
    match level {
        log::Level::Trace => Level::Trace,
        log::Level::Debug => Level::Debug,
        log::Level::Info => Level::Info,
        log::Level::Warn => Level::Warn,
        log::Level::Error => Level::Error,
    }
}

fn map_capture_to_log_level(level: Level) -> log::Level {
    match level {
        Level::Trace => log::Level::Trace,
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warn => log::Level::Warn,
        Level::Error => log::Level::Error,
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        map_capture_to_log_level(level)
    }
}

impl CaptureLogAdapter {
    /// Record `record` in `registry`.
    pub fn log_to(&self, registry: &LoggerRegistry, record: &Record<'_>) {
        registry
            .get_logger(record.target())
            .at(Level::from(record.level()))
            .log(record.args().to_string(), crate::args![]);
    }
}

impl log::Log for CaptureLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        LoggerRegistry::global()
            .get_logger(metadata.target())
            .is_enabled(metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        self.log_to(LoggerRegistry::global(), record);
    }

    fn flush(&self) {}
}

static CAPTURE_LOG_ADAPTER: CaptureLogAdapter = CaptureLogAdapter;
static INSTALL_RESULT: OnceLock<bool> = OnceLock::new();

/// Install the bridge as the global Rust logger.
///
/// The maximum level is raised to `TRACE` so every call reaches the
/// per-logger enabled-level check. Repeated calls return the cached outcome.
///
/// # Errors
///
/// Returns [`InstallError::AlreadySet`] when a different global logger was
/// installed first.
pub fn install() -> Result<(), InstallError> {
    let installed = *INSTALL_RESULT.get_or_init(|| {
        if log::set_logger(&CAPTURE_LOG_ADAPTER).is_err() {
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    });
    if installed {
        Ok(())
    } else {
        Err(InstallError::AlreadySet)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the `log` crate bridge.

    use super::*;
    use crate::clock::FixedClock;
    use crate::logging_event::LoggingEvent;
    use rstest::rstest;

    #[rstest]
    #[case(log::Level::Trace, Level::Trace)]
    #[case(log::Level::Debug, Level::Debug)]
    #[case(log::Level::Info, Level::Info)]
    #[case(log::Level::Warn, Level::Warn)]
    #[case(log::Level::Error, Level::Error)]
    fn level_mapping_is_direct(#[case] level: log::Level, #[case] expected: Level) {
        assert_eq!(Level::from(level), expected);
        assert_eq!(log::Level::from(expected), level);
    }

    #[test]
    fn adapter_records_to_target_logger() {
        let registry = LoggerRegistry::builder().clock(FixedClock::epoch()).build();
        let record = Record::builder()
            .args(format_args!("hello {}", 42))
            .level(log::Level::Info)
            .target("bridge::test")
            .module_path(Some("bridge::test"))
            .file(Some("lib.rs"))
            .line(Some(42))
            .build();

        CaptureLogAdapter.log_to(&registry, &record);

        let events = registry.get_logger("bridge::test").logging_events();
        assert_eq!(events, vec![LoggingEvent::info("hello 42")]);
        assert_eq!(events[0].creating_logger(), Ok("bridge::test"));
        assert_eq!(registry.all_logging_events(), events);
    }

    #[test]
    fn adapter_respects_enabled_levels() {
        let registry = LoggerRegistry::new();
        let logger = registry.get_logger("bridge::level");
        logger.set_enabled_levels(crate::LevelSet::at_or_above(Level::Warn));

        for (level, text) in [(log::Level::Info, "info"), (log::Level::Warn, "warn")] {
            CaptureLogAdapter.log_to(
                &registry,
                &Record::builder()
                    .args(format_args!("{text}"))
                    .level(level)
                    .target("bridge::level")
                    .build(),
            );
        }

        assert_eq!(logger.logging_events(), vec![LoggingEvent::warn("warn")]);
    }
}
