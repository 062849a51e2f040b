//! Dynamic module loading
//!
//! All FFI lives here. [`ModuleLoader`] maps a file into the process and
//! [`ModuleHandle`] resolves the factory out of it; [`instantiate`] calls
//! the factory and takes ownership of what it returns.

use std::path::{Path, PathBuf};

use libloading::Library;
use loadout_plugin_api::{Plugin, PluginCreateFn};

use super::error::PluginHostError;

/// A mapped dynamic module. Dropping the handle unmaps it.
pub trait ModuleHandle {
    /// Path the module was loaded from
    fn path(&self) -> &Path;

    /// Look up the factory exported under `symbol`.
    ///
    /// The returned pointer is only valid while this handle is alive.
    fn resolve_factory(&self, symbol: &str) -> Result<PluginCreateFn, PluginHostError>;
}

/// Maps module files into the process
pub trait ModuleLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ModuleHandle>, PluginHostError>;
}

/// [`ModuleLoader`] backed by the OS dynamic linker
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryLoader;

impl ModuleLoader for LibraryLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ModuleHandle>, PluginHostError> {
        // SAFETY: running a library's initialisers is inherent to loading a
        // plugin. The user placed it in an enabled plugin directory.
        let library = unsafe { Library::new(path) }.map_err(|e| PluginHostError::LibraryLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Box::new(LibraryModule {
            path: path.to_path_buf(),
            library,
        }))
    }
}

struct LibraryModule {
    path: PathBuf,
    library: Library,
}

impl ModuleHandle for LibraryModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_factory(&self, symbol: &str) -> Result<PluginCreateFn, PluginHostError> {
        // SAFETY: the symbol is declared by the plugin ABI to have the
        // `PluginCreateFn` signature. The copied pointer is kept together
        // with this handle by the registry, so it never outlives the library.
        let factory = unsafe { self.library.get::<PluginCreateFn>(symbol.as_bytes()) }
            .map_err(|_| PluginHostError::SymbolNotFound {
                path: self.path.clone(),
                symbol: symbol.to_string(),
            })?;
        Ok(*factory)
    }
}

/// Resolve `symbol` in `module` and call it.
///
/// `Ok(None)` means the factory ran and returned null.
pub fn instantiate(
    module: &dyn ModuleHandle,
    symbol: &str,
) -> Result<Option<Box<dyn Plugin>>, PluginHostError> {
    let create = module.resolve_factory(symbol)?;

    // SAFETY: the factory follows the plugin ABI and returns either null or
    // a pointer produced by `Box::into_raw`, which we now own.
    let raw = unsafe { create() };
    if raw.is_null() {
        return Ok(None);
    }
    Ok(Some(unsafe { Box::from_raw(raw) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_plugin_api::{PLUGIN_CREATE_SYMBOL, PluginManifest};
    use tempfile::TempDir;

    struct Named;

    impl Plugin for Named {
        fn manifest(&self) -> PluginManifest {
            PluginManifest {
                name: "named".to_string(),
                ..Default::default()
            }
        }
    }

    #[allow(improper_ctypes_definitions)]
    extern "C" fn create_named() -> *mut dyn Plugin {
        Box::into_raw(Box::new(Named) as Box<dyn Plugin>)
    }

    #[allow(improper_ctypes_definitions)]
    extern "C" fn create_nothing() -> *mut dyn Plugin {
        std::ptr::null_mut::<Named>() as *mut dyn Plugin
    }

    struct StaticModule(Option<PluginCreateFn>);

    impl ModuleHandle for StaticModule {
        fn path(&self) -> &Path {
            Path::new("static.so")
        }

        fn resolve_factory(&self, symbol: &str) -> Result<PluginCreateFn, PluginHostError> {
            self.0.ok_or_else(|| PluginHostError::SymbolNotFound {
                path: self.path().to_path_buf(),
                symbol: symbol.to_string(),
            })
        }
    }

    #[test]
    fn test_instantiate_takes_ownership() {
        let module = StaticModule(Some(create_named as PluginCreateFn));
        let plugin = instantiate(&module, PLUGIN_CREATE_SYMBOL).unwrap().unwrap();
        assert_eq!(plugin.manifest().name, "named");
    }

    #[test]
    fn test_instantiate_null_factory() {
        let module = StaticModule(Some(create_nothing as PluginCreateFn));
        assert!(instantiate(&module, PLUGIN_CREATE_SYMBOL).unwrap().is_none());
    }

    #[test]
    fn test_instantiate_missing_symbol() {
        let module = StaticModule(None);
        let result = instantiate(&module, PLUGIN_CREATE_SYMBOL);
        assert!(matches!(result, Err(PluginHostError::SymbolNotFound { .. })));
    }

    #[test]
    fn test_library_loader_rejects_non_library() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.so");
        std::fs::write(&path, b"definitely not a shared object").unwrap();

        let result = LibraryLoader.load(&path);
        assert!(matches!(result, Err(PluginHostError::LibraryLoad { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_real_library_without_factory() {
        let module = LibraryLoader.load(Path::new("libc.so.6")).unwrap();
        assert_eq!(module.path(), Path::new("libc.so.6"));

        let result = module.resolve_factory(PLUGIN_CREATE_SYMBOL);
        assert!(matches!(
            result,
            Err(PluginHostError::SymbolNotFound { ref symbol, .. }) if symbol == PLUGIN_CREATE_SYMBOL
        ));
        assert!(matches!(
            instantiate(module.as_ref(), PLUGIN_CREATE_SYMBOL),
            Err(PluginHostError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn test_library_loader_missing_file() {
        let result = LibraryLoader.load(Path::new("/nonexistent/plugin.so"));
        assert!(matches!(result, Err(PluginHostError::LibraryLoad { .. })));
    }
}
