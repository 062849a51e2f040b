//! Settings storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the backing file failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid settings document
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// The store refused to persist
    #[error("Save rejected: {0}")]
    SaveRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/loadout.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/loadout.toml"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ConfigError::Parse {
            path: PathBuf::from("loadout.toml"),
            message: "expected a table".to_string(),
        };
        assert!(err.to_string().contains("expected a table"));
    }
}
