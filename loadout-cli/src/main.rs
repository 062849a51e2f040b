use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "loadout", about = "Load and inspect dynamically loaded plugins")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Application root (defaults to $LOADOUT_HOME or the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage plugins
    Plugin(commands::plugin::PluginArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app_root = commands::resolve_root(cli.root);

    match cli.command {
        Commands::Plugin(args) => commands::plugin::run(args, &app_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args_parse() {
        let cli = Cli::parse_from(["loadout", "--root", "/opt/app", "-v", "plugin", "list"]);
        assert_eq!(cli.root, Some(PathBuf::from("/opt/app")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Plugin(_)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["loadout", "plugin", "paths", "--root", "/srv"]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv")));
        assert!(!cli.verbose);
    }
}
