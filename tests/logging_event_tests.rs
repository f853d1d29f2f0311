//! Construction, equality and printing of LoggingEvent.

mod test_utils;

use std::collections::HashSet;
use std::thread;

use logcapture::{
    Argument, CollectingConsole, EventError, Level, LoggerRegistry, LoggingEvent, Marker,
    Threshold, Throwable, args,
};
use rstest::rstest;
use test_utils::{capture_registry, current_thread_name};

#[derive(Debug, thiserror::Error)]
#[error("outer failure")]
struct Outer(#[source] Inner);

#[derive(Debug, thiserror::Error)]
#[error("inner failure")]
struct Inner;

#[rstest]
#[case(LoggingEvent::trace("m"), Level::Trace)]
#[case(LoggingEvent::debug("m"), Level::Debug)]
#[case(LoggingEvent::info("m"), Level::Info)]
#[case(LoggingEvent::warn("m"), Level::Warn)]
#[case(LoggingEvent::error("m"), Level::Error)]
fn level_constructors_set_only_level_and_message(#[case] event: LoggingEvent, #[case] level: Level) {
    assert_eq!(event.level(), level);
    assert_eq!(event.message(), "m");
    assert!(event.mdc().is_empty());
    assert!(event.marker().is_none());
    assert!(event.throwable().is_none());
    assert!(event.arguments().is_empty());
}

#[test]
fn builder_sets_every_part() {
    let marker = Marker::new("SECURITY");
    let throwable = Throwable::from_message("denied");
    let event = LoggingEvent::builder(Level::Warn, "user {} from {}")
        .mdc([("session", "s1")])
        .marker(marker.clone())
        .throwable(throwable.clone())
        .args(args!["bob", "10.0.0.1"])
        .build();

    assert_eq!(event.mdc().get("session").map(String::as_str), Some("s1"));
    assert_eq!(event.marker(), Some(&marker));
    assert_eq!(event.throwable(), Some(&throwable));
    assert_eq!(event.arguments(), &args!["bob", "10.0.0.1"][..]);
    assert_eq!(event.formatted_message(), "user bob from 10.0.0.1");
}

#[test]
fn explicit_throwable_keeps_trailing_argument() {
    let explicit = Throwable::from_message("explicit");
    let trailing = Throwable::from_message("trailing");
    let event = LoggingEvent::builder(Level::Error, "{}")
        .throwable(explicit.clone())
        .arg(trailing.clone())
        .build();

    assert_eq!(event.throwable(), Some(&explicit));
    assert_eq!(event.arguments(), &[Argument::Throwable(trailing)][..]);
}

#[test]
fn equality_ignores_timestamp_thread_and_creator() {
    let registry = LoggerRegistry::new();
    let logger = registry.get_logger("eq");
    thread::Builder::new()
        .name("elsewhere".into())
        .spawn(move || logger.info_args("hello {}", args![1]))
        .expect("spawn worker")
        .join()
        .expect("worker thread panicked");

    let recorded = registry.all_logging_events().remove(0);
    let expected = LoggingEvent::builder(Level::Info, "hello {}")
        .arg(1)
        .timestamp(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH)
        .build();

    assert_eq!(recorded.thread_name(), "elsewhere");
    assert_ne!(recorded.timestamp(), expected.timestamp());
    assert_eq!(recorded, expected);

    let set: HashSet<_> = [recorded, expected].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[rstest]
#[case(LoggingEvent::info("a"), LoggingEvent::warn("a"))]
#[case(LoggingEvent::info("a"), LoggingEvent::info("b"))]
#[case(LoggingEvent::new(Level::Info, "a {}", args![1]), LoggingEvent::new(Level::Info, "a {}", args![2]))]
#[case(
    LoggingEvent::builder(Level::Info, "a").marker(Marker::new("X")).build(),
    LoggingEvent::info("a")
)]
#[case(
    LoggingEvent::builder(Level::Info, "a").mdc([("k", "v")]).build(),
    LoggingEvent::info("a")
)]
fn events_differing_in_content_are_unequal(#[case] left: LoggingEvent, #[case] right: LoggingEvent) {
    assert_ne!(left, right);
}

#[test]
fn throwables_compare_by_identity() {
    let one = LoggingEvent::builder(Level::Error, "x")
        .throwable(Throwable::from_message("same text"))
        .build();
    let two = LoggingEvent::builder(Level::Error, "x")
        .throwable(Throwable::from_message("same text"))
        .build();
    assert_ne!(one, two);
    assert_eq!(one.clone(), one);
}

#[test]
fn directly_built_event_has_no_creating_logger() {
    assert_eq!(
        LoggingEvent::info("direct").creating_logger(),
        Err(EventError::NoCreatingLogger)
    );
}

#[rstest]
#[case(Level::Trace, true)]
#[case(Level::Debug, true)]
#[case(Level::Info, true)]
#[case(Level::Warn, false)]
#[case(Level::Error, false)]
fn print_chooses_stream_by_level(#[case] level: Level, #[case] to_stdout: bool) {
    let console = CollectingConsole::new();
    let name = current_thread_name();
    let event = LoggingEvent::builder(level, "message with {}")
        .arg("argument")
        .timestamp(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH)
        .build();

    event.print_to(&console);

    let expected = format!("1970-01-01T00:00:00.000Z [{name}] {level} - message with argument\n");
    let (written, silent) = if to_stdout {
        (console.stdout(), console.stderr())
    } else {
        (console.stderr(), console.stdout())
    };
    assert_eq!(written, expected);
    assert!(silent.is_empty());
}

#[test]
fn print_includes_throwable_and_its_causes() {
    let console = CollectingConsole::new();
    let throwable = Throwable::new(Outer(Inner));
    let event = LoggingEvent::builder(Level::Error, "failed")
        .throwable(throwable.clone())
        .timestamp(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH)
        .build();

    event.print_to(&console);

    let output = console.stderr();
    let name = current_thread_name();
    assert!(output.starts_with(&format!(
        "1970-01-01T00:00:00.000Z [{name}] ERROR - failed\n"
    )));
    assert!(output.contains("Outer: outer failure\n"));
    assert!(output.ends_with("Caused by: inner failure\n"));
    assert_eq!(output, event.render());
    assert!(output.ends_with(&throwable.render()));
}

#[rstest]
fn registry_prints_at_threshold(
    #[with(Threshold::Warn)] capture_registry: (LoggerRegistry, CollectingConsole),
) {
    let (registry, console) = capture_registry;
    let logger = registry.get_logger("threshold");
    let name = current_thread_name();

    logger.info("below");
    logger.warn_args("at {}", args!["threshold"]);

    assert!(console.stdout().is_empty());
    assert_eq!(
        console.stderr(),
        format!("1970-01-01T00:00:00.000Z [{name}] WARN - at threshold\n")
    );

    registry.set_print_level(Threshold::Off);
    logger.error("silenced");
    assert_eq!(console.stderr().lines().count(), 1);
}

#[test]
fn debug_output_omits_empty_parts() {
    let rendered = format!("{:?}", LoggingEvent::info("plain"));
    assert!(rendered.contains("Info"));
    assert!(rendered.contains("plain"));
    assert!(!rendered.contains("marker"));
}
