//! In-memory logging backend for tests.
//!
//! Loggers obtained from a [`LoggerRegistry`] record every enabled call as a
//! [`LoggingEvent`] instead of writing it anywhere. Tests then assert on the
//! recorded events per logger or across the whole registry, per thread or
//! across every thread. Events at or above the configured print threshold are
//! also echoed to the console.
//!
//! ```
//! use logcapture::{LoggerRegistry, LoggingEvent, args};
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get_logger("app::service");
//! logger.info_args("user {} logged in", args!["alice"]);
//!
//! assert_eq!(
//!     logger.logging_events(),
//!     vec![LoggingEvent::new(logcapture::Level::Info, "user {} logged in", args!["alice"])],
//! );
//! ```

mod argument;
mod clock;
mod console;
mod event_store;
mod level;
mod logger;
mod logging_event;
mod marker;
mod message_format;
pub mod mdc;
mod per_thread;
mod properties;
mod registry;
mod throwable;

#[cfg(feature = "log-compat")]
pub mod log_compat;

pub use argument::Argument;
pub use clock::{Clock, FixedClock, SystemClock};
pub use console::{CollectingConsole, Console, ConsoleStream, StdConsole};
pub use level::{Level, LevelSet, ParseLevelError, Threshold};
pub use logger::{LogCall, TestLogger};
pub use logging_event::{EventBuilder, EventError, LoggingEvent};
pub use marker::Marker;
pub use message_format::format_message;
pub use properties::{OverridableProperties, PropertiesError, PropertySource};
pub use registry::{
    LoggerRegistry, PRINT_LEVEL_KEY, PROPERTY_SOURCE, RegistryBuilder, RegistryError,
};
pub use throwable::{MessageError, Throwable};
