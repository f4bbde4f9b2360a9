//! dirwatch - report file changes in a directory

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::config::{Overrides, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

mod cmd;

/// Dirwatch - poll a directory and print every created, modified or deleted file
#[derive(Parser)]
#[command(name = "dirwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory to watch (overrides watch_directory)
    #[arg(short, long, global = true)]
    directory: Option<PathBuf>,

    /// Milliseconds to wait between scans (overrides poll_interval_ms)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the directory until interrupted (default)
    Watch,
    /// Print the files the watcher currently sees and exit
    Scan,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cli_lib::logging::init(cli.verbose);

    let overrides = Overrides {
        watch_directory: cli.directory,
        poll_interval_ms: cli.interval_ms,
    };
    let config = cli_lib::config::resolve(&cli.config, &overrides)?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => cmd::watch::run(config).await,
        Commands::Scan => cmd::scan::run(&config),
    }
}
