//! Plugin system for loadout
//!
//! This module provides the infrastructure for discovering, ordering, loading
//! and tearing down plugins:
//!
//! - [`PluginManager`]: reconciles the load order and loads enabled plugins
//! - [`PluginRegistry`]: owns every live plugin instance
//! - [`Discoverer`]: walks the plugin root for directories and module files
//! - [`ModuleLoader`]: maps dynamic libraries and resolves their factory
//! - [`PluginHostError`]: error types for plugin operations
//!
//! # Plugin Layout
//!
//! ```text
//! <app-root>/Plugins/<directory>/**/<module>.so   (.dylib / .dll)
//! ```
//!
//! Every enabled directory is scanned recursively and every module found is
//! loaded, so one directory may contribute several instances.
//!
//! # Load Order
//!
//! The order is stored in the `Plugins` settings section as
//! `plugin_NN = "<true|false>, <directory>"`. See [`order`] for the rules.
//!
//! # Example
//!
//! ```ignore
//! use loadout_core::config::TomlConfigStore;
//! use loadout_core::plugins::{PluginManager, PluginManagerConfig};
//!
//! let store = TomlConfigStore::open(loadout_paths::config_file())?;
//! let mut manager = PluginManager::new(PluginManagerConfig::default(), store);
//! manager.load_plugins()?;
//!
//! for index in 0..manager.plugin_config_count() {
//!     let descriptor = manager.plugin_config_at(index)?;
//!     println!("{} {}", descriptor.enabled, descriptor.directory_name);
//! }
//! ```

mod descriptor;
mod discovery;
mod error;
mod loader;
mod manager;
pub mod order;
mod registry;

pub use descriptor::{PLUGINS_SECTION, PluginDescriptor, order_key, parse_bool};
pub use discovery::{Discoverer, default_module_extensions};
pub use error::PluginHostError;
pub use loader::{LibraryLoader, ModuleHandle, ModuleLoader, instantiate};
pub use manager::{LoadReport, PluginManager, PluginManagerConfig};
pub use registry::{PluginInfo, PluginRegistry};
