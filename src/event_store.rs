//! Paired per-thread and all-thread event lists.
//!
//! Every logger and every registry keeps one [`EventStore`]. The all-thread
//! list must always hold every event found in any per-thread list, so writes
//! to a store happen only while the owning registry's [`WriteGate`] is held.
//! Reads need no gate.

use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::logging_event::LoggingEvent;
use crate::per_thread::PerThread;

/// Serialises appends and clears across every store of one registry.
#[derive(Default)]
pub(crate) struct WriteGate(Mutex<()>);

/// Proof that the gate is held.
pub(crate) struct Gated<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl WriteGate {
    pub(crate) fn lock(&self) -> Gated<'_> {
        Gated {
            _guard: self.0.lock(),
        }
    }
}

pub(crate) struct EventStore {
    current: PerThread<Vec<LoggingEvent>>,
    all: RwLock<Vec<LoggingEvent>>,
}

impl EventStore {
    pub(crate) fn new() -> Self {
        Self {
            current: PerThread::new(Vec::new),
            all: RwLock::new(Vec::new()),
        }
    }

    /// Events appended on the calling thread.
    pub(crate) fn current_thread(&self) -> Vec<LoggingEvent> {
        self.current.with(|events| events.clone())
    }

    /// Events appended on any thread, in order.
    pub(crate) fn all(&self) -> Vec<LoggingEvent> {
        self.all.read().clone()
    }

    pub(crate) fn push(&self, _gate: &Gated<'_>, event: LoggingEvent) {
        self.current.with(|events| events.push(event.clone()));
        self.all.write().push(event);
    }

    pub(crate) fn clear_current_thread(&self, _gate: &Gated<'_>) {
        self.current.reset_current();
    }

    pub(crate) fn clear_all(&self, _gate: &Gated<'_>) {
        self.current.reset_all();
        self.all.write().clear();
    }
}
