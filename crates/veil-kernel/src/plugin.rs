//! Plugin trait definition

use crate::context::SharedContext;
use crate::kernel::Kernel;
use veil_core::{Error, Result};

/// An installable unit that registers maskers into a [`Kernel`].
///
/// A plugin may register zero, one, or many maskers; the masker registry is
/// keyed by masker type, not plugin name. Unregistering a plugin does not
/// remove the maskers it installed.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Unique plugin name within one kernel.
    fn name(&self) -> &str;

    /// Plugin version string.
    fn version(&self) -> &str;

    /// Names of plugins that must already be registered.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Register maskers into the kernel. Called once during registration;
    /// an error here rolls the registration back.
    fn install(&self, kernel: &Kernel) -> Result<()>;

    /// Asynchronous initialization hook, run by `Kernel::initialize()`.
    async fn on_init(&self, _context: &SharedContext) -> Result<()> {
        Ok(())
    }

    /// Teardown hook, run when the plugin is unregistered.
    fn on_destroy(&self) -> Result<()> {
        Ok(())
    }

    /// Error sink for failures in this plugin's own hooks.
    fn on_error(&self, _error: &Error) {}
}
