//! # tonebus
//!
//! **Tonebus** is an in-process publish/subscribe event broker with a
//! standardized module lifecycle — the communication backbone for a modular
//! music-production toolkit.
//!
//! Every component talks through one [`Bus`]: modules publish typed events
//! and subscribe to event types, never invoking each other directly.
//!
//! | Area              | Description                                                        | Key types / traits                  |
//! |-------------------|--------------------------------------------------------------------|-------------------------------------|
//! | **Dispatch**      | Snapshot-based emit with sync and async handlers, once-semantics.  | [`Bus`], [`Handler`], [`Subscription`] |
//! | **Awaiting**      | Suspend until an event type fires, with optional timeout.          | [`Bus::wait_for`], [`BusError`]     |
//! | **Observability** | Bounded chronological event log, advisory debug logging.           | [`Bus::event_log`], [`Bus::set_debug`] |
//! | **Modules**       | Named, versioned components with a standardized lifecycle.         | [`Module`], [`ModuleExt`], [`ModuleCore`] |
//! | **Lifecycle**     | `Uninitialized → Initializing → Ready/Error → Destroyed`, with reserved events. | [`ModuleStatus`], [`lifecycle`] |
//! | **Errors**        | Typed errors for waits and lifecycle violations.                   | [`BusError`], [`ModuleError`]       |
//!
//! ## Example
//!
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
//!         // Subscriptions made here are released automatically on destroy.
//!         self.on(
//!             "midi:note-on",
//!             Handler::sync(|event| {
//!                 println!("note {}", event.detail["note"]);
//!             }),
//!         );
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ModuleError> {
//!     let bus = Bus::new();
//!     let mut piano = Piano {
//!         core: ModuleCore::new(&bus, "Piano", "1.2.3", "MIDI keys"),
//!     };
//!
//!     piano.init().await?;
//!     piano.emit("midi:note-on", json!({ "note": 60 }));
//!
//!     assert_eq!(bus.event_log(None).last().unwrap().meta.source, "Piano");
//!     piano.destroy();
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency model
//!
//! The bus targets a single logical thread of control hosting a cooperative
//! (tokio) scheduler. Handles are `Send + Sync` and internally serialized,
//! but dispatch semantics — subscription-order invocation, depth-first
//! nested `emit` — are specified for the cooperative single-threaded case.
//! `emit`, `subscribe`, unsubscribe, and `destroy` never suspend; the only
//! suspending operation is `wait_for`.
//!
//! ---

mod bus;
mod config;
mod error;
mod events;
mod modules;

// ---- Public re-exports ----

pub use bus::{Bus, Subscription};
pub use config::{BusConfig, DEFAULT_EVENT_LOG_CAPACITY};
pub use error::{BusError, ModuleError};
pub use events::{
    AsyncHandlerFn, BoxHandlerFuture, Event, EventMeta, Handler, SyncHandlerFn, UNKNOWN_SOURCE,
    UNKNOWN_VERSION,
};
pub use modules::{
    lifecycle, Module, ModuleCore, ModuleExt, ModuleHandle, ModuleInfo, ModuleState, ModuleStatus,
};

// Re-export the attribute macro implementors put on their `Module` impls.
pub use async_trait::async_trait;
