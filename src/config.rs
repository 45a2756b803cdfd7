//! # Bus configuration.
//!
//! [`BusConfig`] controls the two tunables a [`Bus`](crate::Bus) instance
//! has: the capacity of its bounded event log and the initial state of the
//! debug flag.
//!
//! # Example
//! ```
//! use tonebus::{Bus, BusConfig};
//!
//! let mut cfg = BusConfig::default();
//! cfg.event_log_capacity = 64;
//! cfg.debug = true;
//!
//! let bus = Bus::with_config(cfg);
//! assert_eq!(bus.event_log(None).len(), 0);
//! ```

/// Capacity of the bounded event log used by [`Default`] configurations and
/// the global bus.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 1000;

/// Configuration for a [`Bus`](crate::Bus) instance.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Maximum number of events retained in the log. When full, the oldest
    /// entry is evicted on insertion.
    pub event_log_capacity: usize,
    /// Whether debug logging of emit/subscribe/unsubscribe operations starts
    /// enabled. Can be toggled later via [`Bus::set_debug`](crate::Bus::set_debug).
    pub debug: bool,
}

impl Default for BusConfig {
    /// Provides the default configuration:
    /// - `event_log_capacity = 1000`
    /// - `debug = false`
    fn default() -> Self {
        Self {
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
            debug: false,
        }
    }
}
