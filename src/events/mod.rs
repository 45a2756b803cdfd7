//! Event values and the handlers that consume them.

mod event;
mod handler;

pub use event::{Event, EventMeta, UNKNOWN_SOURCE, UNKNOWN_VERSION};
pub use handler::{AsyncHandlerFn, BoxHandlerFuture, Handler, SyncHandlerFn};
