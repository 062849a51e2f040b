pub mod plugin;

use std::path::PathBuf;

/// `--root` if given, otherwise the default application root
pub fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    cli_root.unwrap_or_else(loadout_paths::app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_resolve_root_prefers_flag() {
        unsafe {
            std::env::set_var(loadout_paths::HOME_ENV, "/tmp/from-env");
        }
        let root = resolve_root(Some(PathBuf::from("/tmp/from-flag")));
        unsafe {
            std::env::remove_var(loadout_paths::HOME_ENV);
        }
        assert_eq!(root, PathBuf::from("/tmp/from-flag"));
    }

    #[test]
    #[serial]
    fn test_resolve_root_falls_back_to_env() {
        unsafe {
            std::env::set_var(loadout_paths::HOME_ENV, "/tmp/from-env");
        }
        let root = resolve_root(None);
        unsafe {
            std::env::remove_var(loadout_paths::HOME_ENV);
        }
        assert_eq!(root, PathBuf::from("/tmp/from-env"));
    }
}
