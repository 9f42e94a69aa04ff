//! Change listeners and their registrations.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Receives the multi-hop enabled value when it changes.
pub trait EnabledListener: Send + Sync {
    fn on_value_change(&self, enabled: bool);
}

impl<F> EnabledListener for F
where
    F: Fn(bool) + Send + Sync,
{
    fn on_value_change(&self, enabled: bool) {
        self(enabled)
    }
}

/// Handle returned by `add_listener`, used to remove the registration.
///
/// Each registration gets a fresh id, so registering the same callback
/// twice yields two independent registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

pub(crate) struct Registration {
    pub(crate) id: ListenerId,
    listener: Box<dyn EnabledListener>,
    active: AtomicBool,
    inbox: Mutex<Inbox>,
}

/// Delivery bookkeeping for one registration.
///
/// At most one thread drains a registration at a time, so its callbacks never
/// overlap and always run in generation order. A delivery that arrives while
/// another thread is draining (or from inside the callback itself) replaces
/// the pending value and is picked up by the drainer before it stops.
#[derive(Default)]
struct Inbox {
    /// Highest generation stamp accepted so far (generation + 1; 0 = none).
    accepted: u64,
    pending: Option<bool>,
    draining: bool,
}

impl Registration {
    pub(crate) fn new(id: ListenerId, listener: Box<dyn EnabledListener>) -> Arc<Self> {
        Arc::new(Self {
            id,
            listener,
            active: AtomicBool::new(true),
            inbox: Mutex::new(Inbox::default()),
        })
    }

    pub(crate) fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Hands `enabled` to the listener unless it was removed or has already
    /// accepted this or a newer generation. Returns whether the value was
    /// accepted.
    pub(crate) fn deliver(&self, generation: u64, enabled: bool) -> bool {
        let stamp = generation.saturating_add(1);
        {
            let mut inbox = self.lock_inbox();
            if !self.active.load(Ordering::SeqCst) || inbox.accepted >= stamp {
                return false;
            }
            inbox.accepted = stamp;
            inbox.pending = Some(enabled);
            if inbox.draining {
                return true;
            }
            inbox.draining = true;
        }

        let _reset = DrainReset(self);
        loop {
            let next = {
                let mut inbox = self.lock_inbox();
                match inbox.pending.take() {
                    Some(value) => value,
                    None => {
                        inbox.draining = false;
                        break;
                    }
                }
            };
            if self.active.load(Ordering::SeqCst) {
                self.listener.on_value_change(next);
            }
        }
        true
    }

    fn lock_inbox(&self) -> MutexGuard<'_, Inbox> {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the drain slot if a callback panics.
struct DrainReset<'a>(&'a Registration);

impl Drop for DrainReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inbox = self.0.lock_inbox();
            inbox.draining = false;
            inbox.pending = None;
        }
    }
}
