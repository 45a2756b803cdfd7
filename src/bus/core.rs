//! # The bus: snapshot dispatch, bounded log, module registry, awaiters.
//!
//! [`Bus`] is the single broker every component talks through: modules
//! publish typed events and subscribe to event types, never invoking each
//! other directly.
//!
//! ## Architecture
//! ```text
//! emit(type, detail)
//!     │
//!     ├──► event log (bounded, FIFO eviction)
//!     │
//!     ├──► snapshot of handler list for `type`
//!     │         ├──► sync handler    → invoked inline (panics isolated)
//!     │         └──► async handler   → spawned on the tokio runtime
//!     │
//!     └──► pending waiters for `type` → each completed with the event
//! ```
//!
//! ## Rules
//! - `emit` iterates a **snapshot** of the handler list; handlers may
//!   subscribe, unsubscribe, or `emit` (nested, depth-first) during
//!   dispatch without corrupting iteration.
//! - Handler failures are caught and logged; they never reach the emitter
//!   and never abort dispatch to the remaining handlers.
//! - Waiters are resolved *after* handler dispatch for the emission.
//! - `emit`, `subscribe`, and unsubscribe never suspend and never fail; the
//!   only suspending operation is [`wait_for`](Bus::wait_for).
//! - No lock is held while any handler runs.
//!
//! ## Example
//! ```
//! use serde_json::json;
//! use tonebus::{Bus, Handler};
//!
//! let bus = Bus::new();
//! let token = bus.subscribe(
//!     "midi:note-on",
//!     Handler::sync(|event| println!("note {}", event.detail["note"])),
//! );
//!
//! bus.emit("midi:note-on", json!({ "note": 60 }));
//! token.unsubscribe();
//! ```

use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bus::registry::{HandlerRecord, HandlerRegistry, Subscription};
use crate::bus::waiters::{Waiter, WaiterTable};
use crate::config::BusConfig;
use crate::error::BusError;
use crate::events::{Event, EventMeta, Handler, UNKNOWN_SOURCE, UNKNOWN_VERSION};
use crate::modules::ModuleHandle;

static GLOBAL: OnceLock<Bus> = OnceLock::new();

/// Shared state behind a [`Bus`] handle.
pub(crate) struct BusInner {
    registry: Mutex<HandlerRegistry>,
    waiters: Mutex<WaiterTable>,
    modules: Mutex<HashMap<String, ModuleHandle>>,
    log: Mutex<VecDeque<Event>>,
    log_capacity: usize,
    debug: AtomicBool,
    next_id: AtomicU64,
}

impl BusInner {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Removes one handler record by id. Shared by [`Subscription`] tokens
    /// and once-dispatch.
    pub(crate) fn remove_handler(&self, event_type: &str, id: u64) -> bool {
        let removed = self.registry.lock().remove(event_type, id);
        if removed && self.debug_enabled() {
            debug!(event_type, id, "unsubscribed");
        }
        removed
    }
}

/// Removes a pending wait slot when the awaiting future goes away.
///
/// Covers timeout and cancellation in one place; after a normal resolution
/// the slot is already gone and the removal is a no-op.
struct WaiterGuard {
    inner: Weak<BusInner>,
    event_type: String,
    id: u64,
}

impl Drop for WaiterGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.waiters.lock().remove(&self.event_type, self.id);
        }
    }
}

/// The central event broker.
///
/// Cheap to clone; all clones share the same registries. The process-wide
/// instance lives behind [`Bus::global`], while [`Bus::new`] builds isolated
/// instances (the testing seam).
#[derive(Clone)]
pub struct Bus {
    inner: Arc<BusInner>,
}

impl Bus {
    /// Creates an isolated bus with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates an isolated bus with the given configuration.
    pub fn with_config(cfg: BusConfig) -> Self {
        Self {
            inner: Arc::new(BusInner {
                registry: Mutex::new(HandlerRegistry::default()),
                waiters: Mutex::new(WaiterTable::default()),
                modules: Mutex::new(HashMap::new()),
                log: Mutex::new(VecDeque::with_capacity(cfg.event_log_capacity)),
                log_capacity: cfg.event_log_capacity,
                debug: AtomicBool::new(cfg.debug),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// The process-wide bus, constructed on first access.
    ///
    /// Every call returns a handle to the same registries.
    pub fn global() -> &'static Bus {
        GLOBAL.get_or_init(Bus::new)
    }

    // ---------------------------
    // Emission
    // ---------------------------

    /// Emits an event without a module identity (`source = "unknown"`,
    /// `version = "0.0.0"`).
    ///
    /// See [`emit_from`](Bus::emit_from) for the full contract.
    pub fn emit(&self, event_type: &str, detail: Value) {
        self.emit_from(event_type, detail, UNKNOWN_SOURCE, UNKNOWN_VERSION);
    }

    /// Emits an event, stamping `source`/`version` into its metadata.
    ///
    /// The event is appended to the log (evicting the oldest entry on
    /// overflow), dispatched to a snapshot of the current handlers for
    /// `event_type` in subscription order, and finally delivered to every
    /// pending [`wait_for`](Bus::wait_for) on that type.
    ///
    /// Returns after all sync handlers have run and all async handlers have
    /// been scheduled; never fails, even if every handler does.
    pub fn emit_from(&self, event_type: &str, detail: Value, source: &str, version: &str) {
        let event = Event::new(event_type, detail, EventMeta::now(source, version));
        self.push_log(&event);

        if self.inner.debug_enabled() {
            debug!(event = %event, "emit");
        }

        let snapshot = self.inner.registry.lock().snapshot(event_type);
        for record in snapshot {
            self.dispatch(&event, record);
        }

        let waiters = self.inner.waiters.lock().drain(event_type);
        for waiter in waiters {
            waiter.complete(event.clone());
        }
    }

    /// Runs one snapshotted record against `event`.
    ///
    /// Once-records are removed from the live registry *before* invocation;
    /// if the record is already gone (unsubscribed, or fired in a nested
    /// dispatch) the handler is not invoked.
    fn dispatch(&self, event: &Event, record: HandlerRecord) {
        if record.once && !self.inner.remove_handler(&event.event_type, record.id) {
            return;
        }

        let owner = record.owner.unwrap_or_default();
        match record.handler {
            Handler::Sync(f) => {
                if catch_unwind(AssertUnwindSafe(|| f(event))).is_err() {
                    warn!(
                        event_type = %event.event_type,
                        handler = record.id,
                        owner = %owner,
                        "sync handler panicked; continuing dispatch"
                    );
                }
            }
            Handler::Async(f) => {
                let event = event.clone();
                let fallback_type = event.event_type.clone();
                let id = record.id;
                let task = async move {
                    let event_type = event.event_type.clone();
                    let fut = match catch_unwind(AssertUnwindSafe(|| f(event))) {
                        Ok(fut) => fut,
                        Err(_) => {
                            warn!(
                                event_type = %event_type,
                                handler = id,
                                owner = %owner,
                                "async handler panicked while starting"
                            );
                            return;
                        }
                    };
                    if AssertUnwindSafe(fut).catch_unwind().await.is_err() {
                        warn!(
                            event_type = %event_type,
                            handler = id,
                            owner = %owner,
                            "async handler task failed"
                        );
                    }
                };
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(task);
                    }
                    Err(_) => {
                        // Last resort: no scheduler to hand the task to.
                        warn!(
                            event_type = %fallback_type,
                            "no async runtime; running handler inline"
                        );
                        futures::executor::block_on(task);
                    }
                }
            }
        }
    }

    // ---------------------------
    // Subscription
    // ---------------------------

    /// Subscribes `handler` to `event_type`.
    ///
    /// Handlers fire in subscription order on every matching emission until
    /// the returned token is invoked.
    pub fn subscribe(&self, event_type: &str, handler: Handler) -> Subscription {
        self.subscribe_record(event_type, handler, false, None)
    }

    /// Subscribes `handler` to fire at most once.
    ///
    /// The record removes itself from the registry before the first
    /// invocation; the returned token cancels the subscription if the event
    /// has not fired yet and is a no-op afterwards.
    pub fn subscribe_once(&self, event_type: &str, handler: Handler) -> Subscription {
        self.subscribe_record(event_type, handler, true, None)
    }

    pub(crate) fn subscribe_record(
        &self,
        event_type: &str,
        handler: Handler,
        once: bool,
        owner: Option<String>,
    ) -> Subscription {
        let id = self.inner.next_id();
        self.inner.registry.lock().insert(
            event_type,
            HandlerRecord {
                id,
                handler,
                once,
                owner,
            },
        );

        if self.inner.debug_enabled() {
            let total = self.inner.registry.lock().count(event_type);
            debug!(event_type, id, once, total, "subscribed");
        }

        Subscription {
            inner: Arc::downgrade(&self.inner),
            event_type: event_type.to_owned(),
            id,
        }
    }

    /// Number of live handler records for `event_type`. Observability
    /// helper; dispatch never reads it.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.inner.registry.lock().count(event_type)
    }

    // ---------------------------
    // Awaitable wait-for
    // ---------------------------

    /// Suspends until the next emission of `event_type` and returns it.
    ///
    /// With `timeout_ms = Some(ms)` the wait fails with
    /// [`BusError::WaitTimeout`] once the deadline elapses; `None` waits
    /// indefinitely (supported, discouraged). The pending slot is removed
    /// on resolution, timeout, and cancellation alike — a dropped
    /// `wait_for` future never leaks into the awaiter table.
    pub async fn wait_for(
        &self,
        event_type: &str,
        timeout_ms: Option<u64>,
    ) -> Result<Event, BusError> {
        let id = self.inner.next_id();
        let (waiter, rx) = Waiter::new(id);
        self.inner.waiters.lock().insert(event_type, waiter);
        let _guard = WaiterGuard {
            inner: Arc::downgrade(&self.inner),
            event_type: event_type.to_owned(),
            id,
        };

        match timeout_ms {
            Some(ms) => {
                let deadline = Duration::from_millis(ms);
                match tokio::time::timeout(deadline, rx).await {
                    Ok(Ok(event)) => Ok(event),
                    Ok(Err(_)) => Err(BusError::WaitDropped {
                        event_type: event_type.to_owned(),
                    }),
                    Err(_) => Err(BusError::WaitTimeout {
                        event_type: event_type.to_owned(),
                        timeout: deadline,
                    }),
                }
            }
            None => rx.await.map_err(|_| BusError::WaitDropped {
                event_type: event_type.to_owned(),
            }),
        }
    }

    /// Number of pending wait slots for `event_type`. Observability helper.
    pub fn waiter_count(&self, event_type: &str) -> usize {
        self.inner.waiters.lock().count(event_type)
    }

    // ---------------------------
    // Event log
    // ---------------------------

    /// Chronological copy of the event log, truncated to the most recent
    /// `limit` entries if given.
    pub fn event_log(&self, limit: Option<usize>) -> Vec<Event> {
        let log = self.inner.log.lock();
        match limit {
            Some(n) => log.iter().skip(log.len().saturating_sub(n)).cloned().collect(),
            None => log.iter().cloned().collect(),
        }
    }

    /// Empties the event log.
    pub fn clear_event_log(&self) {
        self.inner.log.lock().clear();
        if self.inner.debug_enabled() {
            debug!("event log cleared");
        }
    }

    fn push_log(&self, event: &Event) {
        if self.inner.log_capacity == 0 {
            return;
        }
        let mut log = self.inner.log.lock();
        if log.len() == self.inner.log_capacity {
            log.pop_front();
        }
        log.push_back(event.clone());
    }

    // ---------------------------
    // Debug flag
    // ---------------------------

    /// Toggles advisory debug logging of emit/subscribe/unsubscribe
    /// operations. Output content is not contractual.
    pub fn set_debug(&self, enabled: bool) {
        self.inner.debug.store(enabled, Ordering::Relaxed);
    }

    /// Current state of the debug flag.
    pub fn debug_enabled(&self) -> bool {
        self.inner.debug_enabled()
    }

    // ---------------------------
    // Module registry
    // ---------------------------

    /// Registers a module handle under its name.
    ///
    /// Name uniqueness is the caller's responsibility; re-registering a name
    /// replaces the previous entry.
    pub fn register_module(&self, module: ModuleHandle) {
        info!(
            module = module.name(),
            version = module.version(),
            "module registered"
        );
        self.inner
            .modules
            .lock()
            .insert(module.name().to_owned(), module);
    }

    /// Removes the module registered under `name`, if any.
    pub fn unregister_module(&self, name: &str) {
        if self.inner.modules.lock().remove(name).is_some() {
            info!(module = name, "module unregistered");
        }
    }

    /// Inspection handle for the module registered under `name`.
    pub fn get_module(&self, name: &str) -> Option<ModuleHandle> {
        self.inner.modules.lock().get(name).cloned()
    }

    /// Sorted names of all registered modules.
    pub fn list_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.modules.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    // ---------------------------
    // Test seam
    // ---------------------------

    /// Replaces every registry with an empty one, waking pending waits with
    /// [`BusError::WaitDropped`]. Testing seam, not part of the public
    /// contract.
    #[doc(hidden)]
    pub fn reset(&self) {
        self.inner.registry.lock().clear();
        self.inner.waiters.lock().clear();
        self.inner.modules.lock().clear();
        self.inner.log.lock().clear();
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Handler) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let handler = Handler::sync(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (calls, handler)
    }

    // ==================== Singleton ====================

    #[test]
    fn global_returns_the_same_registries() {
        let a = Bus::global();
        let b = Bus::global();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }

    // ==================== Emission ====================

    #[test]
    fn emit_without_subscribers_still_logs() {
        let bus = Bus::new();
        bus.emit("nobody:listens", json!({"n": 1}));

        let log = bus.event_log(None);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "nobody:listens");
        assert_eq!(log[0].meta.source, UNKNOWN_SOURCE);
        assert_eq!(log[0].meta.version, UNKNOWN_VERSION);
    }

    #[test]
    fn emit_only_reaches_matching_type() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        bus.subscribe("a", handler);

        bus.emit("b", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        bus.emit("a", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn event_types_match_by_exact_equality() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        bus.subscribe("midi:note-on", handler);

        bus.emit("midi:note-On", Value::Null);
        bus.emit("midi:note-on ", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sync_handlers_fire_in_subscription_order() {
        let bus = Bus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["h1", "h2", "h3"] {
            let order = Arc::clone(&order);
            bus.subscribe(
                "t",
                Handler::sync(move |_| order.lock().push(label)),
            );
        }

        bus.emit("t", Value::Null);
        assert_eq!(*order.lock(), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn panicking_handler_does_not_break_the_bus() {
        let bus = Bus::new();
        bus.subscribe("t", Handler::sync(|_| panic!("boom")));
        let (calls, handler) = counter();
        bus.subscribe("t", handler);

        bus.emit("t", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 1, "peer still dispatched");

        // The panicking handler is not auto-removed.
        bus.emit("t", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(bus.handler_count("t"), 2);
    }

    // ==================== Unsubscribe ====================

    #[test]
    fn unsubscribe_removes_exactly_one_handler() {
        let bus = Bus::new();
        let (calls_a, handler_a) = counter();
        let (calls_b, handler_b) = counter();
        let token = bus.subscribe("t", handler_a);
        bus.subscribe("t", handler_b);

        token.unsubscribe();
        bus.emit("t", Value::Null);

        assert_eq!(calls_a.load(Ordering::SeqCst), 0);
        assert_eq!(calls_b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = Bus::new();
        let (_, handler) = counter();
        let token = bus.subscribe("t", handler);
        assert_eq!(token.event_type(), "t");

        token.unsubscribe();
        token.unsubscribe();
        assert_eq!(bus.handler_count("t"), 0);
    }

    #[test]
    fn dropping_a_token_keeps_the_handler() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        drop(bus.subscribe("t", handler));

        bus.emit("t", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    // ==================== Once ====================

    #[test]
    fn once_fires_exactly_once() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        bus.subscribe_once("module:ready", handler);

        bus.emit("module:ready", Value::Null);
        bus.emit("module:ready", Value::Null);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.handler_count("module:ready"), 0);
    }

    #[test]
    fn once_can_be_cancelled_before_firing() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        let token = bus.subscribe_once("t", handler);

        token.unsubscribe();
        bus.emit("t", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn once_token_is_a_noop_after_firing() {
        let bus = Bus::new();
        let (calls, handler) = counter();
        let token = bus.subscribe_once("t", handler);

        bus.emit("t", Value::Null);
        token.unsubscribe();
        bus.emit("t", Value::Null);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    // ==================== Re-entrancy ====================

    #[test]
    fn subscription_during_dispatch_waits_for_next_emit() {
        let bus = Bus::new();
        let late_calls = Arc::new(AtomicUsize::new(0));

        let bus_inner = bus.clone();
        let late = Arc::clone(&late_calls);
        bus.subscribe(
            "t",
            Handler::sync(move |_| {
                let late = Arc::clone(&late);
                bus_inner.subscribe(
                    "t",
                    Handler::sync(move |_| {
                        late.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            }),
        );

        bus.emit("t", Value::Null);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0, "not in this snapshot");

        bus.emit("t", Value::Null);
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_during_dispatch_spares_the_current_snapshot() {
        let bus = Bus::new();
        let (calls_b, handler_b) = counter();

        // First handler unsubscribes the second mid-dispatch; the second is
        // already in the snapshot so it still runs this round.
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot_ref = Arc::clone(&slot);
        bus.subscribe(
            "t",
            Handler::sync(move |_| {
                if let Some(token) = slot_ref.lock().as_ref() {
                    token.unsubscribe();
                }
            }),
        );
        *slot.lock() = Some(bus.subscribe("t", handler_b));

        bus.emit("t", Value::Null);
        assert_eq!(
            calls_b.load(Ordering::SeqCst),
            1,
            "snapshotted handler still runs"
        );

        bus.emit("t", Value::Null);
        assert_eq!(calls_b.load(Ordering::SeqCst), 1, "gone for the next emit");
    }

    #[test]
    fn nested_emit_completes_before_outer_dispatch_continues() {
        let bus = Bus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let bus_inner = bus.clone();
        let order_a = Arc::clone(&order);
        bus.subscribe(
            "outer",
            Handler::sync(move |_| {
                order_a.lock().push("outer-start");
                bus_inner.emit("inner", Value::Null);
                order_a.lock().push("outer-end");
            }),
        );

        let order_b = Arc::clone(&order);
        bus.subscribe("inner", Handler::sync(move |_| order_b.lock().push("inner")));

        let order_c = Arc::clone(&order);
        bus.subscribe("outer", Handler::sync(move |_| order_c.lock().push("outer-2")));

        bus.emit("outer", Value::Null);
        assert_eq!(
            *order.lock(),
            vec!["outer-start", "inner", "outer-end", "outer-2"],
            "depth-first nested dispatch"
        );
    }

    // ==================== Event log ====================

    #[test]
    fn log_preserves_chronological_order() {
        let bus = Bus::new();
        for i in 0..5 {
            bus.emit("t", json!({ "i": i }));
        }
        let log = bus.event_log(None);
        let order: Vec<i64> = log.iter().map(|e| e.detail["i"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn log_limit_returns_most_recent() {
        let bus = Bus::new();
        for i in 0..10 {
            bus.emit("t", json!({ "i": i }));
        }
        let recent = bus.event_log(Some(3));
        let order: Vec<i64> = recent
            .iter()
            .map(|e| e.detail["i"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![7, 8, 9]);
    }

    #[test]
    fn log_evicts_oldest_at_capacity() {
        let bus = Bus::with_config(BusConfig {
            event_log_capacity: 3,
            debug: false,
        });
        for i in 0..4 {
            bus.emit("t", json!({ "i": i }));
        }

        let log = bus.event_log(None);
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].detail["i"], 1, "exactly the oldest was dropped");
        assert_eq!(log[2].detail["i"], 3);
    }

    #[test]
    fn log_copy_is_unaffected_by_later_emissions() {
        let bus = Bus::new();
        bus.emit("t", Value::Null);
        let copy = bus.event_log(None);
        bus.emit("t", Value::Null);
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn clear_event_log_empties_it() {
        let bus = Bus::new();
        bus.emit("t", Value::Null);
        bus.clear_event_log();
        assert!(bus.event_log(None).is_empty());
    }

    // ==================== Test seam ====================

    #[tokio::test]
    async fn reset_empties_registries_and_wakes_waiters() {
        let bus = Bus::new();
        bus.subscribe("t", Handler::sync(|_| {}));
        bus.emit("t", Value::Null);

        let waiting = bus.clone();
        let wait = tokio::spawn(async move { waiting.wait_for("x", None).await });
        tokio::task::yield_now().await;

        bus.reset();

        assert_eq!(bus.handler_count("t"), 0);
        assert!(bus.event_log(None).is_empty());
        assert!(bus.list_modules().is_empty());
        let err = wait.await.unwrap().expect_err("woken by reset");
        assert!(matches!(err, BusError::WaitDropped { .. }));
    }

    // ==================== Debug flag ====================

    #[test]
    fn debug_flag_toggles() {
        let bus = Bus::new();
        assert!(!bus.debug_enabled());
        bus.set_debug(true);
        assert!(bus.debug_enabled());
        bus.set_debug(false);
        assert!(!bus.debug_enabled());
    }
}
