//! # Shared module state: the entry the bus registry hands out.
//!
//! [`ModuleState`] is the identity-plus-status record shared between a
//! running module and the bus's module registry. The registry stores
//! [`ModuleHandle`]s (`Arc<ModuleState>`) so that
//! [`get_module`](crate::Bus::get_module) can hand out inspection access
//! without exposing the module's internals — peers observe, they never call
//! into each other.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::modules::{ModuleInfo, ModuleStatus};

/// Shared inspection handle to a module's identity and status.
pub type ModuleHandle = Arc<ModuleState>;

/// Identity and lifecycle status of one module.
#[derive(Debug)]
pub struct ModuleState {
    name: String,
    version: String,
    description: String,
    status: Mutex<ModuleStatus>,
}

impl ModuleState {
    pub(crate) fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> ModuleHandle {
        Arc::new(Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            status: Mutex::new(ModuleStatus::Uninitialized),
        })
    }

    /// Module name (the registry key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module version, stamped into every event the module emits.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable purpose.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ModuleStatus {
        *self.status.lock()
    }

    pub(crate) fn set_status(&self, status: ModuleStatus) {
        *self.status.lock() = status;
    }

    /// Point-in-time report of identity and status.
    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            status: self.status(),
        }
    }
}
