//! Shared error values attached to logging events.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

struct Inner {
    error: Box<dyn Error + Send + Sync>,
    type_name: &'static str,
    backtrace: Backtrace,
}

/// Cheaply cloneable handle to an error recorded with an event.
///
/// Equality is identity: two handles are equal only when they were cloned
/// from the same [`Throwable::new`] call.
#[derive(Clone)]
pub struct Throwable {
    inner: Arc<Inner>,
}

/// Error carrying only a message, used by [`Throwable::from_message`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageError(pub String);

impl MessageError {
    /// Name printed for ad-hoc errors in place of the module path.
    pub const TYPE_NAME: &'static str = "logcapture::MessageError";
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for MessageError {}

impl Throwable {
    /// Wrap `error`, remembering its concrete type name and, when enabled
    /// through `RUST_BACKTRACE`, the current backtrace.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::with_type_name(Box::new(error), std::any::type_name::<E>())
    }

    /// Build an ad-hoc error carrying only a message. It prints as
    /// [`MessageError::TYPE_NAME`].
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::with_type_name(
            Box::new(MessageError(message.into())),
            MessageError::TYPE_NAME,
        )
    }

    fn with_type_name(error: Box<dyn Error + Send + Sync>, type_name: &'static str) -> Self {
        Self {
            inner: Arc::new(Inner {
                error,
                type_name,
                backtrace: Backtrace::capture(),
            }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.error.as_ref()
    }

    /// Render the error the way a console report shows it: the type name and
    /// message, any captured backtrace, then one `Caused by:` line per source.
    /// Every line ends with `\n`.
    pub fn render(&self) -> String {
        let mut out = String::from(self.inner.type_name);
        let message = self.inner.error.to_string();
        if !message.is_empty() {
            out.push_str(": ");
            out.push_str(&message);
        }
        out.push('\n');
        if self.inner.backtrace.status() == BacktraceStatus::Captured {
            for line in self.inner.backtrace.to_string().lines() {
                out.push('\t');
                out.push_str(line.trim_start());
                out.push('\n');
            }
        }
        let mut source = self.inner.error.source();
        while let Some(cause) = source {
            out.push_str("Caused by: ");
            out.push_str(&cause.to_string());
            out.push('\n');
            source = cause.source();
        }
        out
    }
}

impl PartialEq for Throwable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Throwable {}

impl Hash for Throwable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.error, f)
    }
}

impl fmt::Debug for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throwable")
            .field("type", &self.inner.type_name)
            .field("error", &self.inner.error)
            .finish()
    }
}
