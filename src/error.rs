//! # Error types used by the bus and the module lifecycle.
//!
//! This module defines two main error enums:
//!
//! - [`BusError`] errors surfaced by bus operations (currently only the
//!   awaitable [`wait_for`](crate::Bus::wait_for)).
//! - [`ModuleError`] errors raised while driving a module's lifecycle.
//!
//! Both types provide `as_label` helpers for logs and metrics.

use std::time::Duration;

use thiserror::Error;

use crate::modules::ModuleStatus;

/// # Errors produced by bus operations.
///
/// `emit`, `subscribe`, and unsubscribe never fail; the only fallible bus
/// operation is [`wait_for`](crate::Bus::wait_for).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// `wait_for` exceeded its deadline before a matching event was emitted.
    #[error("timed out after {timeout:?} waiting for '{event_type}'")]
    WaitTimeout {
        /// The event type that was awaited.
        event_type: String,
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The pending wait slot was discarded before an event arrived.
    ///
    /// Only reachable through the test seam that empties the bus registries
    /// while a wait is in flight.
    #[error("wait for '{event_type}' was abandoned by the bus")]
    WaitDropped {
        /// The event type that was awaited.
        event_type: String,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::WaitTimeout { .. } => "bus_wait_timeout",
            BusError::WaitDropped { .. } => "bus_wait_dropped",
        }
    }
}

/// # Errors produced while driving a module's lifecycle.
///
/// [`Init`](ModuleError::Init) is the variant user modules return from
/// `user_init` to describe their own startup failures; the other variants are
/// raised by the lifecycle machinery itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ModuleError {
    /// `init` was called on a module that is not `Uninitialized`.
    #[error("module '{name}' cannot initialize from status '{status}'")]
    InvalidTransition {
        /// Name of the offending module.
        name: String,
        /// The status the module was in.
        status: ModuleStatus,
    },

    /// Custom initialization (`user_init`) failed.
    #[error("initialization failed: {reason}")]
    Init {
        /// Human-readable failure description.
        reason: String,
    },

    /// A bus operation awaited during initialization failed.
    #[error(transparent)]
    Bus(#[from] BusError),
}

impl ModuleError {
    /// Convenience constructor for `user_init` failures.
    pub fn init(reason: impl Into<String>) -> Self {
        ModuleError::Init {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            ModuleError::InvalidTransition { .. } => "module_invalid_transition",
            ModuleError::Init { .. } => "module_init_failed",
            ModuleError::Bus(e) => e.as_label(),
        }
    }
}
