//! Error types for plugin authors

use thiserror::Error;

/// Errors that plugins can return from their hooks
#[derive(Error, Debug)]
pub enum PluginError {
    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl PluginError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
