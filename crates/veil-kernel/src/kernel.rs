//! Kernel: plugin/masker registries and mask dispatch

use crate::context::SharedContext;
use crate::plugin::Plugin;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;
use veil_core::{Error, InitPhase, MaskOptions, Result};

/// A registered masking function for one semantic data type.
pub type MaskerFn = Arc<dyn Fn(&str, &MaskOptions) -> Result<String> + Send + Sync>;

type SharedInit = Shared<BoxFuture<'static, Result<()>>>;

/// Registry and dispatcher owning the plugins and maskers of one isolated
/// masking pipeline.
///
/// Lifecycle: a fresh kernel is dirty; registrations keep it dirty;
/// [`Kernel::initialize`] runs every plugin's `on_init` hook and settles it;
/// any later registration, unregistration, or context mutation makes it
/// dirty again until the next `initialize()`.
pub struct Kernel {
    plugins: RwLock<Vec<Arc<dyn Plugin>>>,
    maskers: RwLock<HashMap<String, MaskerFn>>,
    context: SharedContext,
    initialized: AtomicBool,
    dirty: AtomicBool,
    seen_revision: AtomicU64,
    init_generation: AtomicU64,
    inflight: Mutex<Option<(u64, SharedInit)>>,
}

impl Kernel {
    /// Build an empty kernel. Each caller owns its instance; there is no
    /// shared process-wide default.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            plugins: RwLock::new(Vec::new()),
            maskers: RwLock::new(HashMap::new()),
            context: SharedContext::new(),
            initialized: AtomicBool::new(false),
            dirty: AtomicBool::new(false),
            seen_revision: AtomicU64::new(0),
            init_generation: AtomicU64::new(0),
            inflight: Mutex::new(None),
        })
    }

    fn read_plugins(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn Plugin>>> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_plugins(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn Plugin>>> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_maskers(&self) -> RwLockReadGuard<'_, HashMap<String, MaskerFn>> {
        self.maskers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Register a plugin and run its `install` hook.
    ///
    /// Fails without side effects on an empty name or version, a duplicate
    /// name, or a missing dependency. An `install` failure rolls the
    /// registration back so the registry never holds a half-installed
    /// plugin.
    pub fn register_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if name.is_empty() {
            return Err(Error::PluginRegistration {
                plugin: name,
                reason: "plugin name must not be empty".to_string(),
            });
        }
        if plugin.version().is_empty() {
            return Err(Error::PluginRegistration {
                plugin: name,
                reason: "plugin version must not be empty".to_string(),
            });
        }

        {
            let plugins = self.read_plugins();
            if plugins.iter().any(|p| p.name() == name) {
                return Err(Error::PluginRegistration {
                    plugin: name,
                    reason: "a plugin with this name is already registered".to_string(),
                });
            }
            for dependency in plugin.dependencies() {
                if !plugins.iter().any(|p| p.name() == dependency) {
                    return Err(Error::PluginDependency {
                        plugin: name,
                        dependency,
                    });
                }
            }
        }

        self.write_plugins().push(Arc::clone(&plugin));

        if let Err(cause) = plugin.install(self) {
            self.write_plugins().retain(|p| p.name() != name);
            return Err(Error::PluginInit {
                plugin: name,
                phase: InitPhase::Install,
                cause: cause.to_string(),
            });
        }

        self.mark_dirty();
        tracing::debug!(plugin = %name, version = plugin.version(), "registered plugin");
        Ok(())
    }

    /// Remove a plugin by name, running its `on_destroy` hook first.
    ///
    /// A destroy failure is forwarded to the plugin's `on_error` sink but
    /// never blocks removal. Maskers the plugin registered stay registered;
    /// callers that want them gone must remove them explicitly.
    pub fn unregister_plugin(&self, name: &str) -> bool {
        let found = self
            .read_plugins()
            .iter()
            .find(|p| p.name() == name)
            .cloned();

        let Some(plugin) = found else {
            return false;
        };

        if let Err(error) = plugin.on_destroy() {
            tracing::warn!(plugin = name, error = %error, "plugin destroy hook failed");
            plugin.on_error(&error);
        }

        self.write_plugins().retain(|p| p.name() != name);
        self.mark_dirty();
        tracing::debug!(plugin = name, "unregistered plugin");
        true
    }

    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.read_plugins()
            .iter()
            .find(|p| p.name() == name)
            .cloned()
    }

    /// Plugin names in registration order.
    pub fn list_plugins(&self) -> Vec<String> {
        self.read_plugins()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Register a masker under a type key. Re-registering a type replaces
    /// the previous masker (last registration wins).
    pub fn register_masker<F>(&self, mask_type: &str, masker: F) -> Result<()>
    where
        F: Fn(&str, &MaskOptions) -> Result<String> + Send + Sync + 'static,
    {
        if mask_type.is_empty() {
            return Err(Error::InvalidMaskerType);
        }
        self.maskers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(mask_type.to_string(), Arc::new(masker));
        self.mark_dirty();
        tracing::debug!(mask_type, "registered masker");
        Ok(())
    }

    pub fn get_masker(&self, mask_type: &str) -> Option<MaskerFn> {
        self.read_maskers().get(mask_type).cloned()
    }

    pub fn has_masker(&self, mask_type: &str) -> bool {
        self.read_maskers().contains_key(mask_type)
    }

    /// Dispatch a masking request by type name. The single entry point used
    /// by direct callers and by tree traversal.
    pub fn execute_mask(
        &self,
        mask_type: &str,
        value: &str,
        options: &MaskOptions,
    ) -> Result<String> {
        let masker = self
            .get_masker(mask_type)
            .ok_or_else(|| Error::MaskerNotFound {
                mask_type: mask_type.to_string(),
            })?;
        tracing::trace!(mask_type, "dispatching mask request");
        (*masker)(value, options)
    }

    /// Dispatch for a dynamically-typed value; non-strings are rejected
    /// with `InvalidValue`.
    pub fn execute_mask_value(
        &self,
        mask_type: &str,
        value: &Value,
        options: &MaskOptions,
    ) -> Result<String> {
        let s = value.as_str().ok_or_else(|| Error::InvalidValue {
            mask_type: mask_type.to_string(),
            value: value.clone(),
        })?;
        self.execute_mask(mask_type, s, options)
    }

    /// Shared context visible to every plugin's `on_init` hook.
    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Whether `initialize()` has completed and no registration or context
    /// mutation happened since.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
            && !self.dirty.load(Ordering::SeqCst)
            && self.seen_revision.load(Ordering::SeqCst) == self.context.revision()
    }

    /// Run every plugin's `on_init` hook.
    ///
    /// Idempotent and memoized: an already-initialized, non-dirty kernel
    /// returns immediately, and concurrent callers await the same in-flight
    /// outcome instead of re-running hooks. Hooks are created in
    /// registration order and awaited together; the first failure is
    /// reported to that plugin's `on_error` sink, wrapped, and re-thrown,
    /// leaving the kernel uninitialized.
    pub async fn initialize(self: &Arc<Self>) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let (generation, init) = {
            let mut slot = self.inflight.lock().await;
            if self.is_initialized() {
                return Ok(());
            }
            match slot.as_ref() {
                Some((generation, existing)) => (*generation, existing.clone()),
                None => {
                    let generation = self.init_generation.fetch_add(1, Ordering::SeqCst) + 1;
                    let kernel = Arc::clone(self);
                    let fut = async move { kernel.run_init_hooks().await }.boxed().shared();
                    *slot = Some((generation, fut.clone()));
                    (generation, fut)
                }
            }
        };

        let outcome = init.await;

        let mut slot = self.inflight.lock().await;
        if slot.as_ref().is_some_and(|(current, _)| *current == generation) {
            *slot = None;
            if outcome.is_ok() {
                self.seen_revision
                    .store(self.context.revision(), Ordering::SeqCst);
                self.dirty.store(false, Ordering::SeqCst);
                self.initialized.store(true, Ordering::SeqCst);
            }
        }

        outcome
    }

    async fn run_init_hooks(self: Arc<Self>) -> Result<()> {
        let plugins: Vec<Arc<dyn Plugin>> = self.read_plugins().clone();

        let hooks = plugins.iter().map(|plugin| {
            let plugin = Arc::clone(plugin);
            let kernel = Arc::clone(&self);
            async move {
                plugin.on_init(kernel.context()).await.map_err(|error| {
                    plugin.on_error(&error);
                    Error::PluginInit {
                        plugin: plugin.name().to_string(),
                        phase: InitPhase::Init,
                        cause: error.to_string(),
                    }
                })
            }
        });

        futures::future::try_join_all(hooks).await?;
        tracing::info!(plugins = plugins.len(), "kernel initialized");
        Ok(())
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("plugins", &self.list_plugins())
            .field("maskers", &self.read_maskers().len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
