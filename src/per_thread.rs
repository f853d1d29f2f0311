//! Per-thread storage owned by a single registry or logger.
//!
//! Unlike `std::thread_local!`, a [`PerThread`] belongs to an instance, so
//! two registries never share slots. Each thread only touches its own slot,
//! and the slot mutex is contended only while another thread resets every
//! slot at once.

use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use thread_local::ThreadLocal;

struct Slot<T> {
    owner: ThreadId,
    value: T,
}

/// One value of `T` per thread, created on first use by `factory`.
pub(crate) struct PerThread<T: Send> {
    slots: ThreadLocal<Mutex<Slot<T>>>,
    factory: fn() -> T,
}

impl<T: Send> PerThread<T> {
    pub(crate) fn new(factory: fn() -> T) -> Self {
        Self {
            slots: ThreadLocal::new(),
            factory,
        }
    }

    /// Run `f` against the calling thread's value.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let current = thread::current().id();
        let slot = self.slots.get_or(|| {
            Mutex::new(Slot {
                owner: current,
                value: (self.factory)(),
            })
        });
        let mut slot = slot.lock();
        // `thread_local` recycles slots of exited threads; a new owner must
        // not inherit the previous thread's value.
        if slot.owner != current {
            slot.owner = current;
            slot.value = (self.factory)();
        }
        f(&mut slot.value)
    }

    /// Replace the calling thread's value with a fresh one.
    pub(crate) fn reset_current(&self) {
        self.with(|value| *value = (self.factory)());
    }

    /// Replace every thread's value with a fresh one.
    pub(crate) fn reset_all(&self) {
        for slot in self.slots.iter() {
            slot.lock().value = (self.factory)();
        }
    }
}
