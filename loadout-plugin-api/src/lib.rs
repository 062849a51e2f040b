//! loadout-plugin-api - Plugin API for the loadout plugin host
//!
//! Plugins are native dynamic libraries placed under
//! `<app-root>/Plugins/<directory>/`. The host scans every enabled plugin
//! directory, loads every dynamic library it finds, and calls the exported
//! factory in each one. One library yields at most one plugin instance, so a
//! directory holding two libraries yields two instances.
//!
//! # Example
//!
//! ```ignore
//! use loadout_plugin_api::{Plugin, PluginError, PluginManifest, export_plugin};
//!
//! #[derive(Default)]
//! pub struct MyPlugin;
//!
//! impl Plugin for MyPlugin {
//!     fn manifest(&self) -> PluginManifest {
//!         PluginManifest {
//!             name: "my-plugin".to_string(),
//!             version: "0.1.0".to_string(),
//!             ..Default::default()
//!         }
//!     }
//!
//!     fn on_unload(&mut self) -> Result<(), PluginError> {
//!         Ok(())
//!     }
//! }
//!
//! export_plugin!(MyPlugin);
//! ```

pub mod error;
pub mod types;

pub use error::PluginError;
pub use types::PluginManifest;

/// Name of the factory every plugin library must export.
pub const PLUGIN_CREATE_SYMBOL: &str = "_loadout_plugin_create";

/// Signature of the exported factory.
///
/// Returns an owning pointer produced by `Box::into_raw`, or null when the
/// plugin declines to start.
#[allow(improper_ctypes_definitions)]
pub type PluginCreateFn = unsafe extern "C" fn() -> *mut dyn Plugin;

/// The core plugin trait.
///
/// The host only constructs plugins and tears them down; everything else a
/// plugin does is up to the application embedding the host.
pub trait Plugin: Send {
    /// Return plugin metadata
    fn manifest(&self) -> PluginManifest;

    /// Called once, right before the host drops the instance.
    fn on_unload(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Export a plugin type for dynamic loading.
///
/// Generates the `_loadout_plugin_create` entry point, which boxes
/// `<$plugin_type>::default()` and hands ownership to the host.
///
/// # Usage
///
/// ```ignore
/// loadout_plugin_api::export_plugin!(MyPlugin);
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($plugin_type:ty) => {
        #[unsafe(no_mangle)]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn _loadout_plugin_create() -> *mut dyn $crate::Plugin {
            let plugin: Box<dyn $crate::Plugin> = Box::new(<$plugin_type>::default());
            Box::into_raw(plugin)
        }
    };
}
