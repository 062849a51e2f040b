//! Application root paths for loadout.
//!
//! Everything the host persists lives under a single application root:
//! the plugin directory tree and the settings file. The root can be moved
//! with `LOADOUT_HOME`, which is what tests and portable installs use.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the application root.
pub const HOME_ENV: &str = "LOADOUT_HOME";

/// Name of the plugin directory under the application root.
pub const PLUGINS_DIR_NAME: &str = "Plugins";

/// Name of the settings file under the application root.
pub const CONFIG_FILE_NAME: &str = "loadout.toml";

/// Get the loadout application root.
///
/// Returns `$LOADOUT_HOME` if set, otherwise `<data dir>/loadout`
/// (`~/.local/share/loadout` on Linux).
///
/// # Examples
///
/// ```
/// use loadout_paths::app_dir;
///
/// let root = app_dir();
/// let plugins = root.join("Plugins");
/// ```
pub fn app_dir() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        PathBuf::from(home)
    } else if let Some(data) = dirs::data_dir() {
        data.join("loadout")
    } else {
        PathBuf::from(".loadout")
    }
}

/// Plugin root for a given application root: `<root>/Plugins`.
pub fn plugin_dir_in(root: &Path) -> PathBuf {
    root.join(PLUGINS_DIR_NAME)
}

/// Settings file for a given application root: `<root>/loadout.toml`.
pub fn config_file_in(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Plugin root under the default application root.
pub fn plugin_dir() -> PathBuf {
    plugin_dir_in(&app_dir())
}

/// Settings file under the default application root.
pub fn config_file() -> PathBuf {
    config_file_in(&app_dir())
}
