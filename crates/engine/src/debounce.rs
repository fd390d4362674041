//! Single-slot debounce timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
struct PendingTimer {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Tickets are unique across every timer in the process, so a firing queued
/// by a dropped timer can never be claimed by a newer one sharing its channel.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Owns at most one scheduled callback.
///
/// Contract: `schedule` replaces any pending timer, cancelling it first.
/// Every scheduled callback receives a ticket; the owner passes the ticket
/// back to [`DebounceTimer::accept`] when the firing reaches it, which
/// rejects firings from timers that were replaced after they had already
/// queued their message.
///
/// Must be used inside a Tokio runtime.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    pending: Option<PendingTimer>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fire` after `delay` unless cancelled or replaced first.
    pub fn schedule<F>(&mut self, delay: Duration, fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let ticket = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(ticket);
        });
        self.pending = Some(PendingTimer { ticket, handle });
        ticket
    }

    /// Abort the pending timer. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Claim a firing. True only for the ticket of the pending timer, which
    /// is then no longer pending.
    pub fn accept(&mut self, ticket: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
