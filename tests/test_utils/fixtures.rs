//! Registries wired to in-memory consoles and a frozen clock, so tests can
//! assert on printed output without touching the process streams.

#![allow(dead_code)]

use logcapture::{CollectingConsole, FixedClock, LoggerRegistry, Threshold};
use rstest::fixture;

/// Registry printing everything to a collecting console, stamped at the
/// Unix epoch.
#[fixture]
pub fn capture_registry(
    #[default(Threshold::Trace)] print_level: Threshold,
) -> (LoggerRegistry, CollectingConsole) {
    let console = CollectingConsole::new();
    let registry = LoggerRegistry::builder()
        .print_level(print_level)
        .console(console.clone())
        .clock(FixedClock::epoch())
        .build();
    (registry, console)
}

/// Registry that never prints.
#[fixture]
pub fn quiet_registry() -> LoggerRegistry {
    LoggerRegistry::builder().clock(FixedClock::epoch()).build()
}

/// Name the calling thread reports in printed events.
pub fn current_thread_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("<unnamed>")
        .to_owned()
}
