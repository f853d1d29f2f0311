//! Send/Sync guarantees for core types.

use logcapture::{
    Argument, CollectingConsole, FixedClock, LoggerRegistry, LoggingEvent, Marker,
    OverridableProperties, RegistryBuilder, StdConsole, SystemClock, TestLogger, Throwable,
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn registry_and_loggers_are_send_sync() {
    assert_impl_all!(LoggerRegistry: Send, Sync);
    assert_impl_all!(RegistryBuilder: Send, Sync);
    assert_impl_all!(TestLogger: Send, Sync);
    assert_impl_all!(OverridableProperties: Send, Sync);
}

#[rstest]
fn event_parts_are_send_sync() {
    assert_impl_all!(LoggingEvent: Send, Sync, Clone);
    assert_impl_all!(Argument: Send, Sync, Clone);
    assert_impl_all!(Marker: Send, Sync, Clone);
    assert_impl_all!(Throwable: Send, Sync, Clone);
}

#[rstest]
fn sinks_are_send_sync() {
    assert_impl_all!(StdConsole: Send, Sync);
    assert_impl_all!(CollectingConsole: Send, Sync);
    assert_impl_all!(SystemClock: Send, Sync);
    assert_impl_all!(FixedClock: Send, Sync);
}
