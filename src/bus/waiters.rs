//! # Pending awaiter table for `wait_for`.
//!
//! Each in-flight [`wait_for`](crate::Bus::wait_for) installs a [`Waiter`] —
//! a one-shot completion slot — under its event type. `emit` drains the
//! whole list for the emitted type after handler dispatch and completes
//! every slot with a clone of the event.
//!
//! Slots are removed on exactly one of: resolution (the drain), timeout, or
//! cancellation of the awaiting future. The id-based [`remove`]
//! (WaiterTable::remove) covers the latter two, keeping the table bounded by
//! the number of live waiters.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::events::Event;

/// One-shot completion slot for a single `wait_for` call.
pub(crate) struct Waiter {
    /// Table-unique id, the removal key for timeout/cancellation cleanup.
    pub(crate) id: u64,
    tx: oneshot::Sender<Event>,
}

impl Waiter {
    pub(crate) fn new(id: u64) -> (Self, oneshot::Receiver<Event>) {
        let (tx, rx) = oneshot::channel();
        (Self { id, tx }, rx)
    }

    /// Completes the slot. A dropped receiver (the wait was cancelled
    /// between drain and send) is not an error.
    pub(crate) fn complete(self, event: Event) {
        let _ = self.tx.send(event);
    }
}

/// Per-type lists of pending completion slots.
#[derive(Default)]
pub(crate) struct WaiterTable {
    slots: HashMap<String, Vec<Waiter>>,
}

impl WaiterTable {
    /// Appends a slot for `event_type`.
    pub(crate) fn insert(&mut self, event_type: &str, waiter: Waiter) {
        self.slots
            .entry(event_type.to_owned())
            .or_default()
            .push(waiter);
    }

    /// Removes the slot with `id`, if still present. Idempotent.
    pub(crate) fn remove(&mut self, event_type: &str, id: u64) -> bool {
        let Some(waiters) = self.slots.get_mut(event_type) else {
            return false;
        };
        let before = waiters.len();
        waiters.retain(|w| w.id != id);
        let removed = waiters.len() != before;
        if waiters.is_empty() {
            self.slots.remove(event_type);
        }
        removed
    }

    /// Takes every pending slot for `event_type`, leaving none behind.
    pub(crate) fn drain(&mut self, event_type: &str) -> Vec<Waiter> {
        self.slots.remove(event_type).unwrap_or_default()
    }

    /// Number of pending slots for `event_type`.
    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.slots.get(event_type).map_or(0, Vec::len)
    }

    /// Drops every slot, waking all pending waits with a closed-channel
    /// error. Test seam.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
