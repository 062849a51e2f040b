//! Load-order entries and their persisted text form

use serde::Serialize;

/// Settings section holding the load order
pub const PLUGINS_SECTION: &str = "Plugins";

/// Key for the entry at `index`: `plugin_00`, `plugin_01`, ...
pub fn order_key(index: usize) -> String {
    format!("plugin_{index:02}")
}

/// One entry of the plugin load order.
///
/// Its position in the owning list is its load rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    /// Name of the plugin's directory under the plugin root
    pub directory_name: String,
    /// Whether the plugin's modules are loaded
    pub enabled: bool,
}

impl PluginDescriptor {
    pub fn new(directory_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            directory_name: directory_name.into(),
            enabled,
        }
    }

    /// Parse a persisted `"<enabled>, <directory>"` value.
    ///
    /// Splits on the first comma and trims both halves. Returns `None` when
    /// there is no comma at all.
    pub fn parse_entry(value: &str) -> Option<Self> {
        let (enabled_text, directory_name) = value.split_once(',')?;
        Some(Self::new(directory_name.trim(), parse_bool(enabled_text.trim())))
    }

    /// Persisted form: `"true, Foo"`
    pub fn to_entry(&self) -> String {
        format!("{}, {}", self.enabled, self.directory_name)
    }
}

/// Lenient boolean parsing for hand-edited settings.
///
/// Unrecognised text counts as `false`.
pub fn parse_bool(text: &str) -> bool {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        other => {
            tracing::warn!(value = %other, "Unrecognised boolean in plugin order, treating as false");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_key_is_zero_padded() {
        assert_eq!(order_key(0), "plugin_00");
        assert_eq!(order_key(7), "plugin_07");
        assert_eq!(order_key(42), "plugin_42");
        assert_eq!(order_key(100), "plugin_100");
    }

    #[test]
    fn test_parse_entry_trims_both_halves() {
        let descriptor = PluginDescriptor::parse_entry("  false ,   My Plugin  ").unwrap();
        assert_eq!(descriptor, PluginDescriptor::new("My Plugin", false));
    }

    #[test]
    fn test_parse_entry_splits_on_first_comma() {
        let descriptor = PluginDescriptor::parse_entry("true, Foo, Bar").unwrap();
        assert_eq!(descriptor.directory_name, "Foo, Bar");
        assert!(descriptor.enabled);
    }

    #[test]
    fn test_parse_entry_without_separator() {
        assert!(PluginDescriptor::parse_entry("nosplitterhere").is_none());
    }

    #[test]
    fn test_to_entry_format() {
        assert_eq!(PluginDescriptor::new("Foo", true).to_entry(), "true, Foo");
        assert_eq!(PluginDescriptor::new("Bar", false).to_entry(), "false, Bar");
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("maybe"));
    }
}
