//! Plugin management commands

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use loadout_core::{ConfigStore, PluginManager, PluginManagerConfig, TomlConfigStore};
use serde::Serialize;

/// Plugin management arguments
#[derive(Args)]
pub struct PluginArgs {
    #[command(subcommand)]
    pub command: PluginCommands,
}

/// Plugin subcommands
#[derive(Subcommand)]
pub enum PluginCommands {
    /// Reconcile the load order, load enabled plugins and list the result
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the plugin directory and settings file
    Paths,
}

/// One line of `plugin list` output
#[derive(Debug, Serialize, PartialEq)]
struct PluginRow {
    index: usize,
    directory: String,
    enabled: bool,
    /// Manifest names of the instances loaded from this directory
    instances: Vec<String>,
}

/// Run plugin command
pub fn run(args: PluginArgs, app_root: &Path) -> Result<()> {
    match args.command {
        PluginCommands::List { json } => list_plugins(app_root, json),
        PluginCommands::Paths => show_paths(app_root),
    }
}

fn list_plugins(app_root: &Path, json: bool) -> Result<()> {
    let store = TomlConfigStore::open(loadout_paths::config_file_in(app_root))?;
    let mut manager = PluginManager::new(PluginManagerConfig::for_app_root(app_root), store);

    // A failed save still leaves the plugins loaded
    if let Err(e) = manager.load_plugins() {
        tracing::warn!(error = %e, "Error loading plugins");
    }

    let rows = collect_rows(&manager);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        let plugin_root = manager.plugin_root().display();
        println!("No plugins installed");
        println!();
        println!("Plugin directory: {}", plugin_root);
        println!();
        println!("To install a plugin:");
        println!("  1. Create a plugin directory: mkdir -p {}/MyPlugin", plugin_root);
        println!("  2. Copy the plugin library:   cp libmy_plugin.so {}/MyPlugin/", plugin_root);
        println!("  3. Run 'loadout plugin list' again; new directories are enabled by default");
        return Ok(());
    }

    for row in rows {
        let status = match (row.enabled, row.instances.is_empty()) {
            (false, _) => "○",
            (true, false) => "✓",
            (true, true) => "✗",
        };

        let instances = if row.instances.is_empty() {
            "no instances".to_string()
        } else {
            row.instances.join(", ")
        };

        println!("{} {:02} {}    {}", status, row.index, row.directory, instances);
    }

    Ok(())
}

fn collect_rows<S: ConfigStore>(manager: &PluginManager<S>) -> Vec<PluginRow> {
    let loaded = manager.registry().list();

    manager
        .descriptors()
        .iter()
        .enumerate()
        .map(|(index, descriptor)| PluginRow {
            index,
            directory: descriptor.directory_name.clone(),
            enabled: descriptor.enabled,
            instances: loaded
                .iter()
                .filter(|info| info.directory_name == descriptor.directory_name)
                .map(|info| info.manifest.name.clone())
                .collect(),
        })
        .collect()
}

fn show_paths(app_root: &Path) -> Result<()> {
    println!("Application root: {}", app_root.display());
    println!("Plugin directory: {}", loadout_paths::plugin_dir_in(app_root).display());
    println!("Settings file:    {}", loadout_paths::config_file_in(app_root).display());
    Ok(())
}
