//! Per-level entry points for [`TestLogger`].
//!
//! Each level gets the same family of call shapes: message only, message
//! with arguments, and marker and/or throwable variants of the latter. They
//! all delegate to [`TestLogger::at`]; use that directly to attach an
//! explicit context map.

use crate::argument::Argument;
use crate::level::Level;
use crate::marker::Marker;
use crate::throwable::Throwable;

use super::TestLogger;

macro_rules! level_methods {
    (
        $level:expr, $name:literal,
        $plain:ident, $args:ident, $marker:ident, $throwable:ident,
        $marker_throwable:ident, $enabled:ident
    ) => {
        #[doc = concat!("Return whether ", $name, " calls are recorded.")]
        pub fn $enabled(&self) -> bool {
            self.is_enabled($level)
        }

        #[doc = concat!("Record `message` at ", $name, ".")]
        pub fn $plain(&self, message: impl Into<String>) {
            self.log($level, message);
        }

        #[doc = concat!("Record `message` at ", $name, " with positional arguments.")]
        pub fn $args<A>(&self, message: impl Into<String>, args: impl IntoIterator<Item = A>)
        where
            A: Into<Argument>,
        {
            self.at($level).log(message, args);
        }

        #[doc = concat!("Record `message` at ", $name, " tagged with `marker`.")]
        pub fn $marker<A>(
            &self,
            marker: Marker,
            message: impl Into<String>,
            args: impl IntoIterator<Item = A>,
        ) where
            A: Into<Argument>,
        {
            self.at($level).marker(marker).log(message, args);
        }

        #[doc = concat!("Record `message` at ", $name, " with an attached throwable.")]
        pub fn $throwable<A>(
            &self,
            throwable: Throwable,
            message: impl Into<String>,
            args: impl IntoIterator<Item = A>,
        ) where
            A: Into<Argument>,
        {
            self.at($level).throwable(throwable).log(message, args);
        }

        #[doc = concat!("Record `message` at ", $name, " with a marker and a throwable.")]
        pub fn $marker_throwable<A>(
            &self,
            marker: Marker,
            throwable: Throwable,
            message: impl Into<String>,
            args: impl IntoIterator<Item = A>,
        ) where
            A: Into<Argument>,
        {
            self.at($level)
                .marker(marker)
                .throwable(throwable)
                .log(message, args);
        }
    };
}

impl TestLogger {
    level_methods!(
        Level::Trace, "TRACE",
        trace, trace_args, trace_marker, trace_throwable,
        trace_marker_throwable, is_trace_enabled
    );
    level_methods!(
        Level::Debug, "DEBUG",
        debug, debug_args, debug_marker, debug_throwable,
        debug_marker_throwable, is_debug_enabled
    );
    level_methods!(
        Level::Info, "INFO",
        info, info_args, info_marker, info_throwable,
        info_marker_throwable, is_info_enabled
    );
    level_methods!(
        Level::Warn, "WARN",
        warn, warn_args, warn_marker, warn_throwable,
        warn_marker_throwable, is_warn_enabled
    );
    level_methods!(
        Level::Error, "ERROR",
        error, error_args, error_marker, error_throwable,
        error_marker_throwable, is_error_enabled
    );
}
