//! consite CLI - Confluence site publisher.
//!
//! Provides commands for:
//! - `deploy`: publish the manifest tree to Confluence
//! - `delete`: remove the published subtree
//! - `init`: write a starter configuration file
//! - `info`: show the resolved configuration
//! - `download`: fetch remote page source

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DeleteArgs, DeployArgs, DownloadArgs, InfoArgs, InitArgs};
use error::CliError;
use output::Output;

/// consite - Confluence site publisher.
#[derive(Parser)]
#[command(name = "consite", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the site manifest to Confluence.
    Deploy(DeployArgs),
    /// Write a starter configuration file.
    Init(InitArgs),
    /// Remove the published site subtree.
    Delete(DeleteArgs),
    /// Show the resolved configuration.
    Info(InfoArgs),
    /// Download remote page content.
    Download(DownloadArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Deploy(args) => block_on(args.execute(&output)),
        Commands::Init(args) => args.execute(&output),
        Commands::Delete(args) => block_on(args.execute(&output)),
        Commands::Info(args) => args.execute(&output),
        Commands::Download(args) => block_on(args.execute(&output)),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Run an async command to completion on a fresh runtime.
fn block_on<F>(future: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(future)
}
