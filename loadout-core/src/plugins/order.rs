//! Plugin load order: reading, reconciling against disk, and rewriting
//!
//! The order lives in the `Plugins` settings section as contiguous keys:
//!
//! ```toml
//! [Plugins]
//! plugin_00 = "true, Foo"
//! plugin_01 = "false, Bar"
//! ```
//!
//! Reading stops at the first key whose value is empty, so a gap in the
//! numbering hides every entry after it. [`persist`] always writes the keys
//! back without gaps.

use crate::config::{ConfigError, ConfigStore};

use super::descriptor::{PLUGINS_SECTION, PluginDescriptor, order_key};

/// The load order as found in the settings store
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersistedOrder {
    /// Well-formed entries, in key order
    pub descriptors: Vec<PluginDescriptor>,
    /// Raw values that were rejected
    pub malformed: Vec<String>,
}

/// Read `plugin_00`, `plugin_01`, ... until the first empty value.
///
/// A value without a comma is logged and dropped, and reading carries on
/// with the next index. A directory listed twice keeps its first position.
pub fn read_persisted<S: ConfigStore + ?Sized>(store: &S) -> PersistedOrder {
    let mut order = PersistedOrder::default();

    for index in 0.. {
        let key = order_key(index);
        let value = store.get_string(PLUGINS_SECTION, &key);
        if value.is_empty() {
            break;
        }

        let Some(descriptor) = PluginDescriptor::parse_entry(&value) else {
            tracing::error!(
                key = %key,
                value = %value,
                "Failed to parse [Plugins] load order value due to missing separator"
            );
            order.malformed.push(value);
            continue;
        };

        if contains(&order.descriptors, &descriptor.directory_name) {
            tracing::warn!(
                key = %key,
                plugin = %descriptor.directory_name,
                "Plugin listed twice in load order, keeping first entry"
            );
            continue;
        }

        order.descriptors.push(descriptor);
    }

    order
}

/// Append every discovered directory not already in `order`, enabled.
///
/// Returns the number of entries appended. Existing entries keep their
/// position and flag.
pub fn reconcile(
    order: &mut Vec<PluginDescriptor>,
    discovered: impl IntoIterator<Item = String>,
) -> usize {
    let mut appended = 0;
    for name in discovered {
        if contains(order, &name) {
            continue;
        }
        tracing::info!(plugin = %name, "Discovered new plugin directory");
        order.push(PluginDescriptor::new(name, true));
        appended += 1;
    }
    appended
}

/// Replace the `Plugins` section with `order` and save the store.
pub fn persist<S: ConfigStore + ?Sized>(
    store: &mut S,
    order: &[PluginDescriptor],
) -> Result<(), ConfigError> {
    store.delete_section(PLUGINS_SECTION);
    for (index, descriptor) in order.iter().enumerate() {
        store.set_string(PLUGINS_SECTION, &order_key(index), &descriptor.to_entry());
    }
    store.save()
}

fn contains(order: &[PluginDescriptor], directory_name: &str) -> bool {
    order.iter().any(|d| d.directory_name == directory_name)
}
