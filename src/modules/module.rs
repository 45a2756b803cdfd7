//! # The module protocol: overridable startup, non-overridable lifecycle.
//!
//! Concrete modules implement [`Module`]: expose their embedded
//! [`ModuleCore`] and customize startup in [`user_init`](Module::user_init)
//! — the single extension point. The lifecycle itself lives in
//! [`ModuleExt`], a blanket-implemented extension trait: because the blanket
//! impl covers every `Module`, no implementor can provide its own
//! [`init`](ModuleExt::init) — the template method cannot be overridden.
//!
//! ## Lifecycle
//! ```text
//! init():   Uninitialized ──► Initializing ──► Ready      (user_init ok)
//!                                         └──► Error      (user_init failed, error re-raised)
//! destroy(): any state ──► Destroyed                       (idempotent)
//! ```
//! Each transition emits its reserved event (`module:initializing`,
//! `module:ready` / `module:error`, `module:destroyed`) stamped with the
//! module's identity, so every peer observes the canonical sequence.
//!
//! ## Example
//! ```
//! use async_trait::async_trait;
//! use serde_json::json;
//! use tonebus::{Bus, Handler, Module, ModuleCore, ModuleError, ModuleExt};
//!
//! struct Piano {
//!     core: ModuleCore,
//! }
//!
//! #[async_trait]
//! impl Module for Piano {
//!     fn core(&self) -> &ModuleCore {
//!         &self.core
//!     }
//!     fn core_mut(&mut self) -> &mut ModuleCore {
//!         &mut self.core
//!     }
//!
//!     async fn user_init(&mut self) -> Result<(), ModuleError> {
//!         self.on(
//!             "midi:note-on",
//!             Handler::sync(|event| {
//!                 let _ = event.detail["note"].as_i64();
//!             }),
//!         );
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ModuleError> {
//! let bus = Bus::new();
//! let mut piano = Piano {
//!     core: ModuleCore::new(&bus, "Piano", "1.2.3", "MIDI keys"),
//! };
//!
//! piano.init().await?;
//! piano.emit("midi:note-on", json!({ "note": 60 }));
//! piano.destroy();
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::bus::Subscription;
use crate::error::{BusError, ModuleError};
use crate::events::{Event, Handler};
use crate::modules::{ModuleCore, ModuleInfo, ModuleStatus};

/// A named, versioned component living on the bus.
///
/// Implementors embed a [`ModuleCore`] and expose it through
/// [`core`](Module::core)/[`core_mut`](Module::core_mut);
/// [`user_init`](Module::user_init) is the only other thing to write.
#[async_trait]
pub trait Module: Send {
    /// The embedded module state.
    fn core(&self) -> &ModuleCore;

    /// The embedded module state, mutably.
    fn core_mut(&mut self) -> &mut ModuleCore;

    /// Custom startup logic, run between the `Initializing` and `Ready`
    /// transitions. Subscribe to events and set up internal state here.
    ///
    /// The default does nothing.
    async fn user_init(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }
}

/// Lifecycle driver and bus pass-throughs for every [`Module`].
///
/// Blanket-implemented, which seals it: a conflicting implementation will
/// not compile, so [`init`](ModuleExt::init) and
/// [`destroy`](ModuleExt::destroy) cannot be overridden.
#[async_trait]
pub trait ModuleExt: Module {
    /// Drives the module to `Ready` (or `Error`).
    ///
    /// Template method: validates the status, transitions to
    /// `Initializing` and emits `module:initializing`, runs
    /// [`user_init`](Module::user_init), then transitions to `Ready` or
    /// `Error` and emits the matching event. A `user_init` failure is
    /// re-raised to the caller after the bookkeeping.
    ///
    /// Fails with [`ModuleError::InvalidTransition`] unless the module is
    /// `Uninitialized`.
    async fn init(&mut self) -> Result<(), ModuleError> {
        self.core().begin_init()?;
        match self.user_init().await {
            Ok(()) => {
                self.core().finish_init_ok();
                Ok(())
            }
            Err(err) => {
                self.core().finish_init_err(&err);
                Err(err)
            }
        }
    }

    /// Tears the module down. Idempotent; never fails, never suspends.
    fn destroy(&mut self) {
        self.core_mut().destroy();
    }

    /// Emits an event stamped with this module's identity.
    fn emit(&self, event_type: &str, detail: Value) {
        self.core().emit(event_type, detail);
    }

    /// Subscribes a handler; released automatically on destroy.
    fn on(&mut self, event_type: &str, handler: Handler) -> Subscription {
        self.core_mut().on(event_type, handler)
    }

    /// Subscribes a handler to fire at most once; released on destroy if it
    /// has not fired.
    fn once(&mut self, event_type: &str, handler: Handler) -> Subscription {
        self.core_mut().once(event_type, handler)
    }

    /// Waits for the next emission of `event_type`.
    async fn wait_for(
        &self,
        event_type: &str,
        timeout_ms: Option<u64>,
    ) -> Result<Event, BusError> {
        self.core().wait_for(event_type, timeout_ms).await
    }

    /// Current lifecycle status.
    fn status(&self) -> ModuleStatus {
        self.core().status()
    }

    /// Point-in-time report of identity and status.
    fn info(&self) -> ModuleInfo {
        self.core().info()
    }
}

impl<M: Module> ModuleExt for M {}
