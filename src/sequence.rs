//! Latest-request-wins slot for results of overlapping fetches.
//!
//! A caller issues a [`Ticket`] before starting a fetch and hands it back
//! with the result. Only the result of the most recently issued ticket is
//! stored, so a slow response for an older selection can never overwrite
//! the data of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

/// Sequence number of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Holds the value applied by the latest issued ticket.
pub struct LatestSlot<T> {
    issued: AtomicU64,
    current: Mutex<Option<(Ticket, T)>>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(Ticket, T)>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new request. Every earlier ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still the latest. Returns whether it was applied.
    pub fn apply(&self, ticket: Ticket, value: T) -> bool {
        let mut guard = self.lock();
        let newer_applied = guard.as_ref().is_some_and(|(t, _)| *t > ticket);
        if newer_applied || !self.is_latest(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued.load(Ordering::SeqCst),
                "discarding stale result"
            );
            return false;
        }
        *guard = Some((ticket, value));
        true
    }

    /// Ticket of the currently applied value.
    pub fn applied(&self) -> Option<Ticket> {
        self.lock().as_ref().map(|(t, _)| *t)
    }

    /// Run `f` against the applied value, if any.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.lock().as_ref().map(|(_, v)| f(v))
    }

    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.with(T::clone)
    }
}
