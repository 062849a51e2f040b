//! Hello Plugin - A simple example plugin for loadout
//!
//! This plugin demonstrates:
//! - Basic plugin structure with the `export_plugin!` macro
//! - Implementing the `Plugin` trait
//! - Cleaning up in `on_unload`
//!
//! ## Building
//!
//! ```bash
//! cargo build --release
//! ```
//!
//! ## Installing
//!
//! ```bash
//! mkdir -p ~/.local/share/loadout/Plugins/Hello
//! cp target/release/libhello_plugin.so ~/.local/share/loadout/Plugins/Hello/
//! loadout plugin list
//! ```
//!
//! New directories are appended to the load order enabled. Set the entry in
//! `loadout.toml` to `false, Hello` to keep it installed but unloaded.

use std::time::Instant;

use loadout_plugin_api::{export_plugin, Plugin, PluginError, PluginManifest};

/// Reports how long it stayed loaded when the host tears it down.
pub struct HelloPlugin {
    loaded_at: Instant,
}

impl Default for HelloPlugin {
    fn default() -> Self {
        eprintln!("[hello] loaded");
        Self {
            loaded_at: Instant::now(),
        }
    }
}

impl Plugin for HelloPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest {
            name: "hello".to_string(),
            version: "0.1.0".to_string(),
            description: "A simple example plugin that greets on load and unload".to_string(),
            author: "loadout".to_string(),
        }
    }

    fn on_unload(&mut self) -> Result<(), PluginError> {
        eprintln!(
            "[hello] unloading after {:.2?}",
            self.loaded_at.elapsed()
        );
        Ok(())
    }
}

export_plugin!(HelloPlugin);
