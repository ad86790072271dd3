//! ModBridge CLI
//!
//! Command-line interface for modpack migration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use modbridge_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "modbridge")]
#[command(about = "ModBridge - Find and replace elements lost between modpack versions", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./modbridge.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute missing elements between the origin and final snapshots
    Diff(commands::diff::DiffArgs),
    /// Interactively map missing elements to replacements
    Correlate(commands::correlate::CorrelateArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(cli.config.as_deref(), args),
        Commands::Correlate(args) => commands::correlate::execute(cli.config.as_deref(), args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
