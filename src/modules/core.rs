//! # Module base: identity-stamped bus access with tracked subscriptions.
//!
//! [`ModuleCore`] is the state every concrete module embeds: identity,
//! lifecycle status, the bus handle, and the unsubscribe tokens of every
//! subscription made through the module. It wraps bus operations so that
//!
//! - every emission carries the module's `name`/`version` (callers cannot
//!   override them), and
//! - every subscription is released exactly once on [`destroy`]
//!   (ModuleCore::destroy).
//!
//! Constructing a `ModuleCore` registers the module with the bus under its
//! name. The lifecycle transitions themselves are driven by
//! [`ModuleExt::init`](crate::ModuleExt::init), which calls into the
//! crate-private transition helpers here.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::bus::{Bus, Subscription};
use crate::error::{BusError, ModuleError};
use crate::events::{Event, Handler};
use crate::modules::lifecycle;
use crate::modules::{ModuleHandle, ModuleInfo, ModuleState, ModuleStatus};

/// Identity, status, bus access, and subscription tracking for one module.
pub struct ModuleCore {
    bus: Bus,
    state: ModuleHandle,
    unsubs: Vec<Subscription>,
}

impl ModuleCore {
    /// Creates the module state and registers it with `bus` under `name`.
    ///
    /// The module starts `Uninitialized`; re-using a registered name
    /// replaces the previous registry entry.
    pub fn new(
        bus: &Bus,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let state = ModuleState::new(name, version, description);
        bus.register_module(state.clone());
        Self {
            bus: bus.clone(),
            state,
            unsubs: Vec::new(),
        }
    }

    /// Like [`new`](ModuleCore::new), against the process-wide bus.
    pub fn global(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(Bus::global(), name, version, description)
    }

    /// The bus this module communicates through.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Module name.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Module version.
    pub fn version(&self) -> &str {
        self.state.version()
    }

    /// Human-readable purpose.
    pub fn description(&self) -> &str {
        self.state.description()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ModuleStatus {
        self.state.status()
    }

    /// Point-in-time report of identity and status.
    pub fn info(&self) -> ModuleInfo {
        self.state.info()
    }

    /// Emits an event stamped with this module's identity.
    ///
    /// `meta.source`/`meta.version` always come from the module; there is no
    /// way to override them through the module API. The four `module:*`
    /// lifecycle types are reserved for the module base — domain code must
    /// not impersonate them (the bus does not validate this).
    pub fn emit(&self, event_type: &str, detail: Value) {
        self.bus
            .emit_from(event_type, detail, self.state.name(), self.state.version());
    }

    /// Subscribes to `event_type`; the token is tracked for release on
    /// [`destroy`](ModuleCore::destroy) and also returned for early release.
    pub fn on(&mut self, event_type: &str, handler: Handler) -> Subscription {
        let token =
            self.bus
                .subscribe_record(event_type, handler, false, Some(self.name().to_owned()));
        self.unsubs.push(token.clone());
        token
    }

    /// Subscribes to fire at most once; tracked like [`on`](ModuleCore::on).
    pub fn once(&mut self, event_type: &str, handler: Handler) -> Subscription {
        let token =
            self.bus
                .subscribe_record(event_type, handler, true, Some(self.name().to_owned()));
        self.unsubs.push(token.clone());
        token
    }

    /// Waits for the next emission of `event_type`.
    ///
    /// Cleanup of the pending slot is bound to the returned future itself
    /// (resolution, timeout, or drop), so nothing is tracked in the
    /// module's unsubscribe list.
    pub async fn wait_for(
        &self,
        event_type: &str,
        timeout_ms: Option<u64>,
    ) -> Result<Event, BusError> {
        self.bus.wait_for(event_type, timeout_ms).await
    }

    /// Tears the module down: releases every tracked subscription, emits
    /// `module:destroyed`, unregisters from the bus, and settles the status
    /// at `Destroyed`.
    ///
    /// Idempotent — a second call is a complete no-op and emits nothing.
    pub fn destroy(&mut self) {
        if self.status() == ModuleStatus::Destroyed {
            return;
        }

        for sub in self.unsubs.drain(..) {
            sub.unsubscribe();
        }

        // The destroyed event goes out while the module is still registered.
        self.emit(
            lifecycle::DESTROYED,
            json!({
                "name": self.name(),
                "version": self.version(),
            }),
        );
        self.bus.unregister_module(self.state.name());
        self.state.set_status(ModuleStatus::Destroyed);
        info!(module = self.name(), "module destroyed");
    }

    // ---------------------------
    // Lifecycle transitions (driven by ModuleExt::init)
    // ---------------------------

    /// Validates the status and moves `Uninitialized → Initializing`,
    /// emitting `module:initializing`.
    pub(crate) fn begin_init(&self) -> Result<(), ModuleError> {
        let status = self.status();
        if status != ModuleStatus::Uninitialized {
            return Err(ModuleError::InvalidTransition {
                name: self.name().to_owned(),
                status,
            });
        }
        self.state.set_status(ModuleStatus::Initializing);
        self.emit(lifecycle::INITIALIZING, self.lifecycle_detail());
        Ok(())
    }

    /// Moves `Initializing → Ready`, emitting `module:ready`.
    pub(crate) fn finish_init_ok(&self) {
        self.state.set_status(ModuleStatus::Ready);
        self.emit(lifecycle::READY, self.lifecycle_detail());
        info!(module = self.name(), "module ready");
    }

    /// Moves `Initializing → Error`, emitting `module:error` with the
    /// failure description.
    pub(crate) fn finish_init_err(&self, err: &ModuleError) {
        self.state.set_status(ModuleStatus::Error);
        let mut detail = self.lifecycle_detail();
        detail["error"] = json!(err.to_string());
        self.emit(lifecycle::ERROR, detail);
        error!(module = self.name(), error = %err, "module init failed");
    }

    fn lifecycle_detail(&self) -> Value {
        json!({
            "name": self.name(),
            "version": self.version(),
            "status": self.status().as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_registers_with_the_bus() {
        let bus = Bus::new();
        let core = ModuleCore::new(&bus, "Piano", "1.2.3", "keys");

        assert_eq!(core.status(), ModuleStatus::Uninitialized);
        assert_eq!(bus.list_modules(), vec!["Piano".to_owned()]);
        let handle = bus.get_module("Piano").expect("registered");
        assert_eq!(handle.version(), "1.2.3");
    }

    #[test]
    fn emit_stamps_module_identity() {
        let bus = Bus::new();
        let core = ModuleCore::new(&bus, "Piano", "1.2.3", "keys");

        core.emit("midi:note-on", json!({"note": 72}));

        let log = bus.event_log(None);
        let event = log.last().expect("logged");
        assert_eq!(event.meta.source, "Piano");
        assert_eq!(event.meta.version, "1.2.3");
    }

    #[test]
    fn destroy_releases_subscriptions_and_unregisters() {
        let bus = Bus::new();
        let mut core = ModuleCore::new(&bus, "Piano", "1.2.3", "keys");
        core.on("x", Handler::sync(|_| {}));
        core.on("y", Handler::sync(|_| {}));

        core.destroy();

        assert_eq!(bus.handler_count("x"), 0);
        assert_eq!(bus.handler_count("y"), 0);
        assert!(bus.list_modules().is_empty());
        assert_eq!(core.status(), ModuleStatus::Destroyed);

        let destroyed: Vec<Event> = bus
            .event_log(None)
            .into_iter()
            .filter(|e| e.event_type == lifecycle::DESTROYED)
            .collect();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].meta.source, "Piano");
    }

    #[test]
    fn destroy_twice_emits_once() {
        let bus = Bus::new();
        let mut core = ModuleCore::new(&bus, "Piano", "1.2.3", "keys");

        core.destroy();
        core.destroy();

        let destroyed = bus
            .event_log(None)
            .into_iter()
            .filter(|e| e.event_type == lifecycle::DESTROYED)
            .count();
        assert_eq!(destroyed, 1);
        assert_eq!(core.status(), ModuleStatus::Destroyed);
    }

    #[test]
    fn destroy_from_uninitialized_is_allowed() {
        let bus = Bus::new();
        let mut core = ModuleCore::new(&bus, "Piano", "1.2.3", "keys");
        core.destroy();
        assert_eq!(core.status(), ModuleStatus::Destroyed);
        assert!(bus.list_modules().is_empty());
    }

    #[test]
    fn global_module_registers_on_the_process_bus() {
        let mut core = ModuleCore::global("GlobalProbe", "0.0.1", "process-wide");
        assert!(Bus::global()
            .list_modules()
            .contains(&"GlobalProbe".to_owned()));

        core.destroy();
        assert!(!Bus::global()
            .list_modules()
            .contains(&"GlobalProbe".to_owned()));
    }

    #[test]
    fn reregistering_a_name_replaces_the_entry() {
        let bus = Bus::new();
        let _first = ModuleCore::new(&bus, "Piano", "1.0.0", "old");
        let _second = ModuleCore::new(&bus, "Piano", "2.0.0", "new");

        assert_eq!(bus.list_modules(), vec!["Piano".to_owned()]);
        assert_eq!(bus.get_module("Piano").unwrap().version(), "2.0.0");
    }
}
