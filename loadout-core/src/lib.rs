//! loadout-core: Core library for the loadout plugin host
//!
//! This crate provides:
//!
//! - **Settings storage** - the [`ConfigStore`] trait with file-backed
//!   [`TomlConfigStore`] and in-memory [`MemoryConfigStore`]
//! - **Plugin management** - [`PluginManager`] for reconciling the persisted
//!   load order with the plugin directories on disk and loading every enabled
//!   plugin's dynamic modules
//! - **Plugin ownership** - [`PluginRegistry`], which releases every instance
//!   exactly once when the manager is dropped
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    PluginManager                      │
//! │  ConfigStore ──► order::read_persisted                │
//! │  Discoverer  ──► order::reconcile ──► order::persist  │
//! │                        │                              │
//! │                        ▼                              │
//! │  ModuleLoader ──► instantiate ──► PluginRegistry      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on the thread that calls
//! [`PluginManager::load_plugins`].

pub mod config;
pub mod plugins;

// Re-export key types for convenience
pub use config::{ConfigError, ConfigStore, MemoryConfigStore, TomlConfigStore};
pub use plugins::{
    LoadReport, PluginDescriptor, PluginHostError, PluginInfo, PluginManager,
    PluginManagerConfig, PluginRegistry,
};
