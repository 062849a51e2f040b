//! Plugin metadata

use serde::{Deserialize, Serialize};

/// Metadata a plugin reports about itself once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Display name
    pub name: String,
    /// Plugin version (free-form, not checked by the host)
    pub version: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Plugin author
    #[serde(default)]
    pub author: String,
}

impl Default for PluginManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: "0.0.1".to_string(),
            description: String::new(),
            author: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_default_version() {
        let manifest = PluginManifest::default();
        assert_eq!(manifest.version, "0.0.1");
        assert!(manifest.name.is_empty());
    }

    #[test]
    fn test_manifest_optional_fields_default_when_missing() {
        let manifest: PluginManifest =
            serde_json::from_str(r#"{"name":"hello","version":"1.2.0"}"#).unwrap();
        assert_eq!(manifest.name, "hello");
        assert!(manifest.description.is_empty());
        assert!(manifest.author.is_empty());
    }
}
