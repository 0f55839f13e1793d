//! Veil Plugin Kernel
//!
//! This crate owns the registries at the heart of the masking pipeline:
//! - A plugin registry with install/init/destroy lifecycle management
//! - A masker registry dispatching mask requests by type name
//! - A shared context visible to every plugin's `on_init` hook
//!
//! Kernels are created through [`Kernel::new`]; there is no process-wide
//! default instance, so tests and concurrent consumers never share state
//! implicitly.

pub mod context;
pub mod kernel;
pub mod plugin;

pub use context::SharedContext;
pub use kernel::{Kernel, MaskerFn};
pub use plugin::Plugin;
