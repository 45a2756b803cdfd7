//! # The event envelope carried by every bus message.
//!
//! [`Event`] is an immutable record of one emission: a type tag, an opaque
//! payload, and [`EventMeta`] identifying who emitted it and when. Events
//! are constructed by the bus inside `emit` and never mutated afterwards,
//! by the bus or by handlers.
//!
//! ## Envelope shape
//! The serialized form is stable for external consumers:
//! ```text
//! { "type": string, "detail": any, "meta": { "timestamp": int_ms, "source": string, "version": string } }
//! ```
//!
//! ## Type tags
//! Event types are plain case-sensitive strings matched by exact equality,
//! conventionally `domain:action` or `domain:noun:action` (the bus does not
//! validate the convention). The four `module:*` types are reserved for the
//! module lifecycle (see [`lifecycle`](crate::lifecycle)).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;

/// Source name stamped on events emitted without a module identity.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Version stamped on events emitted without a module identity.
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Emission context: who emitted the event, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMeta {
    /// Milliseconds since the Unix epoch at emission time.
    pub timestamp: u64,
    /// Name of the emitting module, or `"unknown"`.
    pub source: String,
    /// Version of the emitting module, or `"0.0.0"`.
    pub version: String,
}

impl EventMeta {
    /// Creates metadata stamped with the current wall-clock time.
    pub fn now(source: impl Into<String>, version: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            source: source.into(),
            version: version.into(),
        }
    }

    /// Metadata for emissions that do not carry a module identity.
    pub fn anonymous() -> Self {
        Self::now(UNKNOWN_SOURCE, UNKNOWN_VERSION)
    }
}

/// One emitted event: type tag, payload, and metadata.
///
/// Handlers receive events by shared reference (sync) or as their own clone
/// (async); either way the values observed are exactly the values passed at
/// `emit` time.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Case-sensitive type tag, e.g. `"midi:note-on"`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Opaque payload. The bus imposes no schema; payload shapes live in the
    /// domain layers built on top.
    pub detail: Value,
    /// Emission context.
    pub meta: EventMeta,
}

impl Event {
    /// Assembles an event from its parts. Called by the bus inside `emit`.
    pub fn new(event_type: impl Into<String>, detail: Value, meta: EventMeta) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
            meta,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] source={} v{} t={}",
            self.event_type, self.meta.source, self.meta.version, self.meta.timestamp
        )
    }
}
