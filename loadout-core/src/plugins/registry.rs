//! Plugin registry - owns every live plugin instance

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use loadout_plugin_api::{Plugin, PluginManifest};

use super::loader::ModuleHandle;

/// A plugin instance together with the module that created it
struct LoadedPlugin {
    /// Directory the instance was loaded for
    directory_name: String,
    /// Manifest captured at creation
    manifest: PluginManifest,
    /// The plugin instance
    instance: Box<dyn Plugin>,
    /// Keep the library loaded. Declared after `instance` so it drops last.
    module: Box<dyn ModuleHandle>,
}

impl Drop for LoadedPlugin {
    fn drop(&mut self) {
        // Call on_unload while the library is still mapped
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| self.instance.on_unload()));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(
                    plugin = %self.directory_name,
                    module = %self.module.path().display(),
                    error = %e,
                    "Plugin on_unload returned error"
                );
            }
            Err(_) => {
                tracing::error!(
                    plugin = %self.directory_name,
                    module = %self.module.path().display(),
                    "Plugin panicked in on_unload"
                );
            }
        }
    }
}

/// Information about a live plugin instance
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Directory the instance belongs to
    pub directory_name: String,
    /// Module file that produced it
    pub module_path: PathBuf,
    /// Manifest reported at creation
    pub manifest: PluginManifest,
}

/// Owner of every plugin instance created during a session.
///
/// Instances are released exactly once, when the registry is dropped, in the
/// order they were registered. Other components refer to instances by index.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<LoadedPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an instance and the module it came from.
    ///
    /// Returns the instance's index.
    pub fn register(
        &mut self,
        directory_name: &str,
        instance: Box<dyn Plugin>,
        module: Box<dyn ModuleHandle>,
    ) -> usize {
        let manifest = instance.manifest();
        tracing::info!(
            plugin = %directory_name,
            name = %manifest.name,
            version = %manifest.version,
            module = %module.path().display(),
            "Plugin loaded"
        );

        self.plugins.push(LoadedPlugin {
            directory_name: directory_name.to_string(),
            manifest,
            instance,
            module,
        });
        self.plugins.len() - 1
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Borrow the instance at `index`
    pub fn get(&self, index: usize) -> Option<&dyn Plugin> {
        self.plugins.get(index).map(|p| p.instance.as_ref())
    }

    /// Information about the instance at `index`
    pub fn info(&self, index: usize) -> Option<PluginInfo> {
        self.plugins.get(index).map(LoadedPlugin::info)
    }

    /// Information about every instance, in creation order
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(LoadedPlugin::info).collect()
    }

    /// Number of instances created for a plugin directory
    pub fn count_for(&self, directory_name: &str) -> usize {
        self.plugins
            .iter()
            .filter(|p| p.directory_name == directory_name)
            .count()
    }
}

impl LoadedPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            directory_name: self.directory_name.clone(),
            module_path: self.module.path().to_path_buf(),
            manifest: self.manifest.clone(),
        }
    }
}

impl Drop for PluginRegistry {
    fn drop(&mut self) {
        if self.plugins.is_empty() {
            return;
        }
        tracing::debug!(count = self.plugins.len(), "Releasing plugins");
        // Creation order, one at a time
        for plugin in self.plugins.drain(..) {
            drop(plugin);
        }
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugin_count", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PluginHostError;
    use loadout_plugin_api::{PluginCreateFn, PluginError};
    use std::cell::RefCell;

    thread_local! {
        static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(event: String) {
        EVENTS.with(|events| events.borrow_mut().push(event));
    }

    fn take_events() -> Vec<String> {
        EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
    }

    struct Tracked {
        name: &'static str,
        fail_unload: bool,
        panic_unload: bool,
    }

    impl Tracked {
        fn boxed(name: &'static str) -> Box<dyn Plugin> {
            Box::new(Self {
                name,
                fail_unload: false,
                panic_unload: false,
            })
        }
    }

    impl Plugin for Tracked {
        fn manifest(&self) -> PluginManifest {
            PluginManifest {
                name: self.name.to_string(),
                ..Default::default()
            }
        }

        fn on_unload(&mut self) -> Result<(), PluginError> {
            record(format!("unload:{}", self.name));
            if self.panic_unload {
                panic!("unload panic");
            }
            if self.fail_unload {
                return Err(PluginError::custom("unload failed"));
            }
            Ok(())
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            record(format!("drop:{}", self.name));
        }
    }

    struct TrackedModule {
        path: PathBuf,
    }

    impl TrackedModule {
        fn boxed(file: &str) -> Box<dyn ModuleHandle> {
            Box::new(Self {
                path: PathBuf::from(file),
            })
        }
    }

    impl ModuleHandle for TrackedModule {
        fn path(&self) -> &Path {
            &self.path
        }

        fn resolve_factory(&self, symbol: &str) -> Result<PluginCreateFn, PluginHostError> {
            Err(PluginHostError::SymbolNotFound {
                path: self.path.clone(),
                symbol: symbol.to_string(),
            })
        }
    }

    impl Drop for TrackedModule {
        fn drop(&mut self) {
            record(format!("unmap:{}", self.path.display()));
        }
    }

    #[test]
    fn test_register_returns_sequential_indices() {
        let mut registry = PluginRegistry::new();
        let first = registry.register("Foo", Tracked::boxed("a"), TrackedModule::boxed("a.so"));
        let second = registry.register("Foo", Tracked::boxed("b"), TrackedModule::boxed("b.so"));
        assert_eq!((first, second), (0, 1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_for("Foo"), 2);
        assert_eq!(registry.count_for("Bar"), 0);
        drop(registry);
        take_events();
    }

    #[test]
    fn test_info_and_get() {
        let mut registry = PluginRegistry::new();
        registry.register("Foo", Tracked::boxed("a"), TrackedModule::boxed("a.so"));

        let info = registry.info(0).unwrap();
        assert_eq!(info.directory_name, "Foo");
        assert_eq!(info.module_path, PathBuf::from("a.so"));
        assert_eq!(info.manifest.name, "a");
        assert_eq!(registry.get(0).unwrap().manifest().name, "a");
        assert!(registry.get(1).is_none());
        assert!(registry.info(1).is_none());
        assert_eq!(registry.list().len(), 1);
        drop(registry);
        take_events();
    }

    #[test]
    fn test_drop_releases_in_creation_order_instance_before_module() {
        take_events();
        let mut registry = PluginRegistry::new();
        registry.register("Foo", Tracked::boxed("a"), TrackedModule::boxed("a.so"));
        registry.register("Bar", Tracked::boxed("b"), TrackedModule::boxed("b.so"));

        drop(registry);

        assert_eq!(
            take_events(),
            vec![
                "unload:a", "drop:a", "unmap:a.so", "unload:b", "drop:b", "unmap:b.so"
            ]
        );
    }

    #[test]
    fn test_unload_error_and_panic_do_not_stop_teardown() {
        take_events();
        let mut registry = PluginRegistry::new();
        registry.register(
            "Foo",
            Box::new(Tracked {
                name: "panics",
                fail_unload: false,
                panic_unload: true,
            }),
            TrackedModule::boxed("p.so"),
        );
        registry.register(
            "Foo",
            Box::new(Tracked {
                name: "fails",
                fail_unload: true,
                panic_unload: false,
            }),
            TrackedModule::boxed("f.so"),
        );
        registry.register("Bar", Tracked::boxed("ok"), TrackedModule::boxed("ok.so"));

        drop(registry);

        let events = take_events();
        assert_eq!(events.iter().filter(|e| e.starts_with("unload:")).count(), 3);
        assert_eq!(events.iter().filter(|e| e.starts_with("drop:")).count(), 3);
        assert_eq!(events.last().map(String::as_str), Some("unmap:ok.so"));
    }
}
