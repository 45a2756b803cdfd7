//! The module base: lifecycle protocol and identity-stamped bus access.

mod core;
mod module;
mod state;
mod status;

pub use self::core::ModuleCore;
pub use module::{Module, ModuleExt};
pub use state::{ModuleHandle, ModuleState};
pub use status::{ModuleInfo, ModuleStatus};

/// Reserved lifecycle event types, emitted only by the module base.
///
/// User modules emit domain events freely but must not impersonate these
/// four; the bus does not validate the convention.
pub mod lifecycle {
    /// Emitted when `init` begins.
    pub const INITIALIZING: &str = "module:initializing";
    /// Emitted when `user_init` completed and the module is usable.
    pub const READY: &str = "module:ready";
    /// Emitted when `user_init` failed; the payload describes the failure.
    pub const ERROR: &str = "module:error";
    /// Emitted when the module is torn down.
    pub const DESTROYED: &str = "module:destroyed";
}
