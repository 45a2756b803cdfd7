//! # Handler values registered with the bus.
//!
//! A subscription binds an event type to a [`Handler`], which is either
//! synchronous or asynchronous:
//!
//! - **Sync** handlers run inline during `emit`; the emitter blocks until
//!   they return. Keep them fast.
//! - **Async** handlers are scheduled on the running tokio runtime; `emit`
//!   does not await their completion and they may finish in any order.
//!
//! Both kinds are isolated: a panicking handler (or a failing async task) is
//! caught and logged by the bus and never aborts dispatch to its peers.
//!
//! ## Example
//! ```
//! use tonebus::{Event, Handler};
//!
//! let sync = Handler::sync(|event: &Event| {
//!     println!("got {}", event.event_type);
//! });
//!
//! let asynchronous = Handler::async_fn(|event: Event| async move {
//!     // async I/O is fine here, the emitter is not blocked
//!     let _ = event;
//! });
//! # let _ = (sync, asynchronous);
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::events::Event;

/// Boxed future returned by asynchronous handlers.
///
/// - **Boxed**: required for trait objects (dynamic dispatch)
/// - **Pinned**: required for async futures
/// - **Send**: handler tasks can run on any runtime worker
pub type BoxHandlerFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Shared synchronous callable.
pub type SyncHandlerFn = Arc<dyn Fn(&Event) + Send + Sync>;

/// Shared asynchronous callable producing one task per dispatch.
pub type AsyncHandlerFn = Arc<dyn Fn(Event) -> BoxHandlerFuture + Send + Sync>;

/// A callable registered for an event type, synchronous or asynchronous.
///
/// Cheap to clone; the underlying callable is shared.
#[derive(Clone)]
pub enum Handler {
    /// Invoked inline during `emit`.
    Sync(SyncHandlerFn),
    /// Scheduled as a background task; `emit` does not await it.
    Async(AsyncHandlerFn),
}

impl Handler {
    /// Wraps a synchronous closure.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Handler::Sync(Arc::new(f))
    }

    /// Wraps an asynchronous closure.
    ///
    /// The closure is called once per dispatch and must produce a fresh
    /// future each time; shared state goes through an explicit `Arc`.
    pub fn async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Handler::Async(Arc::new(move |event| {
            let fut: BoxHandlerFuture = Box::pin(f(event));
            fut
        }))
    }

    /// True for [`Handler::Async`].
    pub fn is_async(&self) -> bool {
        matches!(self, Handler::Async(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Sync(_) => f.write_str("Handler::Sync(..)"),
            Handler::Async(_) => f.write_str("Handler::Async(..)"),
        }
    }
}
