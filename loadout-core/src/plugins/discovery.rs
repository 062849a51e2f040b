//! Filesystem discovery of plugin directories and module files

use std::fs::FileType;
use std::path::{Component, Path, PathBuf};

/// Dynamic library extensions for the current platform
pub fn default_module_extensions() -> Vec<String> {
    let extensions: &[&str] = if cfg!(target_os = "macos") {
        &["dylib", "so"]
    } else if cfg!(target_os = "windows") {
        &["dll"]
    } else {
        &["so"]
    };
    extensions.iter().map(|ext| ext.to_string()).collect()
}

/// Walks the plugin root.
///
/// Enumeration is depth-first, pre-order, with siblings sorted by file name,
/// so the same tree always yields the same order. Symlinked directories are
/// reported but never descended into. Unreadable entries are logged and
/// skipped.
#[derive(Debug, Clone)]
pub struct Discoverer {
    root: PathBuf,
    extensions: Vec<String>,
}

impl Discoverer {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a plugin named `directory_name`, directly under the root.
    ///
    /// Returns `None` unless the name is a single plain path component, so
    /// absolute paths, `..` and empty names never resolve outside the root.
    pub fn plugin_path(&self, directory_name: &str) -> Option<PathBuf> {
        let mut components = Path::new(directory_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    /// Create the plugin root if it is missing
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Names of every directory below the root, at any depth.
    ///
    /// Nested directories are reported by their own name, the same way
    /// top-level ones are.
    pub fn plugin_directories(&self) -> Vec<String> {
        let mut names = Vec::new();
        walk(&self.root, &mut |path, is_dir| {
            if is_dir && let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        });
        names
    }

    /// Every dynamic library under `dir`, recursively
    pub fn module_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut modules = Vec::new();
        walk(dir, &mut |path, is_dir| {
            if !is_dir && self.is_module(path) {
                modules.push(path.to_path_buf());
            }
        });
        modules
    }

    fn is_module(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) {
    for (path, file_type) in sorted_entries(dir) {
        // Follows symlinks, so a linked plugin directory still counts
        let is_dir = path.is_dir();
        visit(&path, is_dir);
        if file_type.is_dir() {
            walk(&path, visit);
        }
    }
}

fn sorted_entries(dir: &Path) -> Vec<(PathBuf, FileType)> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to read plugin directory");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries {
        match entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))) {
            Ok(item) => found.push(item),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
            }
        }
    }
    found.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    found
}
