//! File-backed settings store
//!
//! Each section is a TOML table and every value is a string:
//!
//! ```toml
//! [Plugins]
//! plugin_00 = "true, Foo"
//! plugin_01 = "false, Bar"
//! ```

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::store::{ConfigStore, Sections};

/// Settings persisted as a TOML document
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    sections: Sections,
}

impl TomlConfigStore {
    /// Open the settings file at `path`.
    ///
    /// A missing file is not an error: the store starts empty and the first
    /// [`save`](ConfigStore::save) creates the file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let sections = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "Settings file does not exist, starting empty");
            Sections::new()
        };

        Ok(Self { path, sections })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlConfigStore {
    fn get_string(&self, section: &str, key: &str) -> String {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .cloned()
            .unwrap_or_default()
    }

    fn set_string(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn delete_section(&mut self, section: &str) {
        self.sections.remove(section);
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&self.sections)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists())
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
