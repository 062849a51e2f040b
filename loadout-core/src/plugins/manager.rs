//! PluginManager - reconciles the load order and owns the plugin lifecycle

use std::path::{Path, PathBuf};

use loadout_plugin_api::PLUGIN_CREATE_SYMBOL;

use super::descriptor::PluginDescriptor;
use super::discovery::{Discoverer, default_module_extensions};
use super::error::PluginHostError;
use super::loader::{LibraryLoader, ModuleLoader, instantiate};
use super::order;
use super::registry::PluginRegistry;
use crate::config::ConfigStore;

/// Configuration for PluginManager
#[derive(Debug, Clone)]
pub struct PluginManagerConfig {
    /// Plugin root (`<app-root>/Plugins`)
    pub plugin_root: PathBuf,
    /// File extensions treated as dynamic modules
    pub module_extensions: Vec<String>,
}

impl PluginManagerConfig {
    /// Configuration for plugins under `<app_root>/Plugins`
    pub fn for_app_root(app_root: &Path) -> Self {
        Self {
            plugin_root: loadout_paths::plugin_dir_in(app_root),
            module_extensions: default_module_extensions(),
        }
    }
}

impl Default for PluginManagerConfig {
    fn default() -> Self {
        Self::for_app_root(&loadout_paths::app_dir())
    }
}

/// What a `load_plugins` call did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries read from the settings store
    pub persisted: usize,
    /// Persisted values rejected for lacking a separator
    pub malformed: usize,
    /// Directories appended to the order
    pub discovered: usize,
    /// Descriptors dropped because their directory is gone or the name
    /// does not name a directory under the plugin root
    pub dangling: usize,
    /// Module files found in enabled plugin directories
    pub modules_found: usize,
    /// Module files that failed to load or export no factory
    pub modules_skipped: usize,
    /// Factories that returned null
    pub null_instances: usize,
    /// Instances handed to the registry
    pub instances_created: usize,
}

/// The plugin manager.
///
/// Owns the settings store it was given, the reconciled load order, and the
/// registry of live plugin instances. Dropping the manager releases every
/// instance.
///
/// A plugin directory containing several modules that each export a factory
/// produces one instance per module, all attributed to that directory.
pub struct PluginManager<S: ConfigStore> {
    store: S,
    discoverer: Discoverer,
    loader: Box<dyn ModuleLoader>,
    /// Reconciled order, minus directories missing at load time
    descriptors: Vec<PluginDescriptor>,
    registry: PluginRegistry,
    loaded: bool,
}

impl<S: ConfigStore> PluginManager<S> {
    /// Create a manager that loads modules with the OS dynamic linker
    pub fn new(config: PluginManagerConfig, store: S) -> Self {
        Self::with_loader(config, store, Box::new(LibraryLoader))
    }

    /// Create a manager with a custom module loader
    pub fn with_loader(
        config: PluginManagerConfig,
        store: S,
        loader: Box<dyn ModuleLoader>,
    ) -> Self {
        Self {
            store,
            discoverer: Discoverer::new(config.plugin_root, config.module_extensions),
            loader,
            descriptors: Vec::new(),
            registry: PluginRegistry::new(),
            loaded: false,
        }
    }

    /// Reconcile the load order and load every enabled plugin.
    ///
    /// 1. Read the persisted order from the `Plugins` section.
    /// 2. Append directories found on disk that are not listed yet.
    /// 3. Rewrite the section and save the store.
    /// 4. Load every module of every enabled plugin, in order.
    ///
    /// Individual files that fail to load are skipped. The only error is a
    /// failed save, which is reported after loading has finished; plugins
    /// loaded by that call stay loaded. Can only be called once.
    pub fn load_plugins(&mut self) -> Result<LoadReport, PluginHostError> {
        if self.loaded {
            return Err(PluginHostError::AlreadyLoaded);
        }
        self.loaded = true;

        let mut report = LoadReport::default();

        let persisted = order::read_persisted(&self.store);
        report.persisted = persisted.descriptors.len();
        report.malformed = persisted.malformed.len();
        let mut plugin_order = persisted.descriptors;

        if let Err(e) = self.discoverer.ensure_root() {
            tracing::error!(
                dir = %self.discoverer.root().display(),
                error = %e,
                "Failed to create plugin directory"
            );
        }
        report.discovered =
            order::reconcile(&mut plugin_order, self.discoverer.plugin_directories());

        let saved = order::persist(&mut self.store, &plugin_order);
        if let Err(e) = &saved {
            tracing::error!(error = %e, "Failed to save plugin load order");
        }

        let mut active = Vec::with_capacity(plugin_order.len());
        for descriptor in plugin_order {
            let Some(dir) = self.discoverer.plugin_path(&descriptor.directory_name) else {
                tracing::warn!(
                    plugin = %descriptor.directory_name,
                    "Plugin name is not a directory under the plugin root, skipping"
                );
                report.dangling += 1;
                continue;
            };
            if !dir.exists() {
                if descriptor.enabled {
                    tracing::warn!(
                        plugin = %descriptor.directory_name,
                        "Enabled plugin directory is missing, skipping"
                    );
                } else {
                    tracing::debug!(
                        plugin = %descriptor.directory_name,
                        "Disabled plugin directory is missing"
                    );
                }
                report.dangling += 1;
                continue;
            }

            if descriptor.enabled {
                self.load_directory(&descriptor.directory_name, &dir, &mut report);
            } else {
                tracing::debug!(plugin = %descriptor.directory_name, "Plugin disabled, skipping");
            }
            active.push(descriptor);
        }
        self.descriptors = active;

        tracing::info!(
            plugins = self.descriptors.len(),
            instances = report.instances_created,
            skipped = report.modules_skipped,
            "Plugin loading complete"
        );

        saved?;
        Ok(report)
    }

    /// Load every module file under one plugin directory
    fn load_directory(&mut self, directory_name: &str, dir: &Path, report: &mut LoadReport) {
        for path in self.discoverer.module_files(dir) {
            report.modules_found += 1;

            let module = match self.loader.load(&path) {
                Ok(module) => module,
                Err(e) => {
                    tracing::warn!(plugin = %directory_name, error = %e, "Skipping module");
                    report.modules_skipped += 1;
                    continue;
                }
            };

            let created = instantiate(module.as_ref(), PLUGIN_CREATE_SYMBOL);
            match created {
                Ok(Some(instance)) => {
                    self.registry.register(directory_name, instance, module);
                    report.instances_created += 1;
                }
                Ok(None) => {
                    tracing::debug!(
                        plugin = %directory_name,
                        module = %path.display(),
                        "Plugin factory returned null"
                    );
                    report.null_instances += 1;
                }
                Err(e) => {
                    tracing::debug!(plugin = %directory_name, error = %e, "Skipping module");
                    report.modules_skipped += 1;
                }
            }
        }
    }

    /// Number of descriptors in the reconciled order
    pub fn plugin_config_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Descriptor at `index` in the reconciled order
    pub fn plugin_config_at(&self, index: usize) -> Result<&PluginDescriptor, PluginHostError> {
        self.descriptors
            .get(index)
            .ok_or(PluginHostError::DescriptorOutOfRange {
                index,
                count: self.descriptors.len(),
            })
    }

    /// The reconciled order
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.descriptors
    }

    /// Live plugin instances
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// The settings store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The plugin root directory
    pub fn plugin_root(&self) -> &Path {
        self.discoverer.root()
    }

    /// Whether `load_plugins` has run
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl<S: ConfigStore> std::fmt::Debug for PluginManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("plugin_root", &self.discoverer.root())
            .field("descriptors", &self.descriptors)
            .field("registry", &self.registry)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
