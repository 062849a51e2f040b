//! The settings store contract and an in-memory implementation

use std::collections::BTreeMap;

use super::error::ConfigError;

/// Section name -> (key -> value)
pub type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Flat section/key string storage.
///
/// An empty string from [`get_string`](ConfigStore::get_string) means "absent".
/// Callers cannot tell a key that was never written from one written as `""`,
/// and the plugin order reader relies on exactly that: the first empty
/// `plugin_NN` value ends the list.
pub trait ConfigStore {
    /// Read a value, or `""` when the section or key does not exist.
    fn get_string(&self, section: &str, key: &str) -> String;

    /// Write a value, creating the section if needed.
    fn set_string(&mut self, section: &str, key: &str, value: &str);

    /// Remove a section and every key in it.
    fn delete_section(&mut self, section: &str);

    /// Persist the current contents to the backing medium.
    fn save(&mut self) -> Result<(), ConfigError>;
}

/// Settings held in memory only.
///
/// `save` does nothing except count, unless the store has been told to fail,
/// in which case it returns [`ConfigError::SaveRejected`].
#[derive(Debug, Default, Clone)]
pub struct MemoryConfigStore {
    sections: Sections,
    save_count: usize,
    fail_saves: bool,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set_string`](ConfigStore::set_string)
    pub fn with_value(mut self, section: &str, key: &str, value: &str) -> Self {
        self.set_string(section, key, value);
        self
    }

    /// Make every following `save` fail
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// All keys of a section, if it exists
    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(section)
    }
}

impl ConfigStore for MemoryConfigStore {
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
        if self.fail_saves {
            return Err(ConfigError::SaveRejected(
                "memory store configured to fail".to_string(),
            ));
        }
        self.save_count += 1;
        Ok(())
    }
}
