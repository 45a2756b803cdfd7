//! # Handler registry and unsubscribe tokens.
//!
//! The registry maps an event type to an ordered list of [`HandlerRecord`]s;
//! order within a type is subscription order and is the dispatch order.
//! `emit` never iterates the live list — it takes a snapshot first, so
//! handlers are free to subscribe and unsubscribe during dispatch.
//!
//! Every record carries a registry-unique id. [`Subscription`] tokens remove
//! exactly one record by id, which makes them naturally idempotent: removing
//! an id that is no longer present is a no-op.

use std::collections::HashMap;
use std::fmt;
use std::sync::Weak;

use crate::bus::core::BusInner;
use crate::events::Handler;

/// One registry entry: the handler plus its dispatch bookkeeping.
#[derive(Clone)]
pub(crate) struct HandlerRecord {
    /// Registry-unique id, the removal key for unsubscribe tokens.
    pub(crate) id: u64,
    /// The registered callable.
    pub(crate) handler: Handler,
    /// Remove-before-invoke marker for `subscribe_once` records.
    pub(crate) once: bool,
    /// Name of the owning module, if the subscription was made through one.
    pub(crate) owner: Option<String>,
}

/// Ordered per-type handler lists.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    entries: HashMap<String, Vec<HandlerRecord>>,
}

impl HandlerRegistry {
    /// Appends a record to the list for `event_type`, preserving
    /// subscription order.
    pub(crate) fn insert(&mut self, event_type: &str, record: HandlerRecord) {
        self.entries
            .entry(event_type.to_owned())
            .or_default()
            .push(record);
    }

    /// Removes the record with `id` from the list for `event_type`.
    ///
    /// Returns whether a record was actually removed; removing an absent id
    /// is a no-op.
    pub(crate) fn remove(&mut self, event_type: &str, id: u64) -> bool {
        let Some(records) = self.entries.get_mut(event_type) else {
            return false;
        };
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        if records.is_empty() {
            self.entries.remove(event_type);
        }
        removed
    }

    /// Defensive copy of the current list for `event_type`, in dispatch
    /// order. This is what `emit` iterates.
    pub(crate) fn snapshot(&self, event_type: &str) -> Vec<HandlerRecord> {
        self.entries.get(event_type).cloned().unwrap_or_default()
    }

    /// Number of live records for `event_type`.
    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.entries.get(event_type).map_or(0, Vec::len)
    }

    /// Drops every record. Test seam.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Idempotent unsubscribe token returned by `subscribe` / `subscribe_once`.
///
/// Invoking [`unsubscribe`](Subscription::unsubscribe) removes exactly the
/// record this token was issued for; a second invocation is a no-op. The
/// token never fails, holds only a weak reference to the bus, and does
/// **not** unsubscribe on drop — dropping a token leaves the handler
/// registered.
#[derive(Clone)]
pub struct Subscription {
    pub(crate) inner: Weak<BusInner>,
    pub(crate) event_type: String,
    pub(crate) id: u64,
}

impl Subscription {
    /// The event type this token's handler was registered for.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Removes the handler record this token was issued for.
    ///
    /// Idempotent: once the record is gone (already unsubscribed, or a
    /// `once` handler that has fired), further calls do nothing.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.remove_handler(&self.event_type, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_type", &self.event_type)
            .field("id", &self.id)
            .finish()
    }
}
