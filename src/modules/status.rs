//! # Module lifecycle states and status reports.

use std::fmt;

use serde::Serialize;

/// Lifecycle states a module moves through.
///
/// Transitions are driven exclusively by the module base:
/// `Uninitialized → Initializing → Ready | Error`, and any state
/// `→ Destroyed`. Destroy is idempotent; a destroyed module never leaves
/// `Destroyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Constructed, `init` not yet called.
    Uninitialized,
    /// `init` running; `user_init` has not completed.
    Initializing,
    /// `user_init` completed successfully.
    Ready,
    /// `user_init` failed.
    Error,
    /// `destroy` completed; terminal.
    Destroyed,
}

impl ModuleStatus {
    /// Stable lowercase label, also the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Uninitialized => "uninitialized",
            ModuleStatus::Initializing => "initializing",
            ModuleStatus::Ready => "ready",
            ModuleStatus::Error => "error",
            ModuleStatus::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time description of a module: identity plus current status.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    /// Module name (registry key).
    pub name: String,
    /// Module version.
    pub version: String,
    /// Human-readable purpose.
    pub description: String,
    /// Lifecycle status at the time of the report.
    pub status: ModuleStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_lowercase_and_stable() {
        assert_eq!(ModuleStatus::Uninitialized.as_str(), "uninitialized");
        assert_eq!(ModuleStatus::Ready.to_string(), "ready");
        assert_eq!(
            serde_json::to_value(ModuleStatus::Destroyed).unwrap(),
            serde_json::json!("destroyed")
        );
    }
}
