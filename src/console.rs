//! Console sinks that printed events are written to.
//!
//! Each printed event arrives as one complete block of text. Implementations
//! must write the block in a single locked operation so output from
//! concurrent callers never interleaves mid-event.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::level::Level;

/// Standard stream an event is echoed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    /// TRACE, DEBUG and INFO go to stdout; WARN and ERROR go to stderr.
    pub fn for_level(level: Level) -> Self {
        if level >= Level::Warn {
            ConsoleStream::Stderr
        } else {
            ConsoleStream::Stdout
        }
    }
}

/// Destination for printed events.
pub trait Console: Send + Sync {
    /// Write `block` to `stream` atomically with respect to other callers.
    fn write_block(&self, stream: ConsoleStream, block: &str);
}

/// Writes to the process's real standard output and error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_block(&self, stream: ConsoleStream, block: &str) {
        let result = match stream {
            ConsoleStream::Stdout => write_locked(&mut io::stdout().lock(), block),
            ConsoleStream::Stderr => write_locked(&mut io::stderr().lock(), block),
        };
        if let Err(err) = result {
            tracing::warn!(target: "logcapture", ?stream, error = %err, "console write failed");
        }
    }
}

fn write_locked(writer: &mut impl Write, block: &str) -> io::Result<()> {
    writer.write_all(block.as_bytes())?;
    writer.flush()
}

#[derive(Default)]
struct Captured {
    stdout: String,
    stderr: String,
}

/// Console that keeps everything written to it in memory.
///
/// Clones share the same buffers, so a test can hand one clone to a registry
/// and read the output through another.
#[derive(Clone, Default)]
pub struct CollectingConsole {
    captured: Arc<Mutex<Captured>>,
}

impl CollectingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to standard output so far.
    pub fn stdout(&self) -> String {
        self.captured.lock().stdout.clone()
    }

    /// Everything written to standard error so far.
    pub fn stderr(&self) -> String {
        self.captured.lock().stderr.clone()
    }

    pub fn clear(&self) {
        *self.captured.lock() = Captured::default();
    }
}

impl Console for CollectingConsole {
    fn write_block(&self, stream: ConsoleStream, block: &str) {
        let mut captured = self.captured.lock();
        match stream {
            ConsoleStream::Stdout => captured.stdout.push_str(block),
            ConsoleStream::Stderr => captured.stderr.push_str(block),
        }
    }
}
