//! Plugin manager error types

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur in the plugin manager
#[derive(Error, Debug)]
pub enum PluginHostError {
    /// The dynamic library could not be loaded
    #[error("Failed to load plugin library {path}: {reason}")]
    LibraryLoad { path: PathBuf, reason: String },

    /// The library does not export the plugin factory
    #[error("Plugin library {path} does not export '{symbol}'")]
    SymbolNotFound { path: PathBuf, symbol: String },

    /// Indexed descriptor lookup outside `[0, count)`
    #[error("Plugin index {index} out of range (count {count})")]
    DescriptorOutOfRange { index: usize, count: usize },

    /// `load_plugins` was called a second time
    #[error("Plugins have already been loaded")]
    AlreadyLoaded,

    /// The rewritten load order could not be persisted
    #[error("Failed to persist plugin load order: {0}")]
    Config(#[from] ConfigError),
}
