//! Vault CLI - client-side router for a static document vault.
//!
//! Provides commands for:
//! - `manifest`: Build the manifest document from a vault directory
//! - `routes`: List the routes a manifest flattens to
//! - `render`: Render one path headlessly and print the mounted document

mod commands;
mod error;
mod output;
mod source;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ManifestArgs, RenderArgs, RoutesArgs};
use output::Output;

/// Vault - static document vault router.
#[derive(Parser)]
#[command(name = "vault", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build manifest JSON from a ready-to-serve vault directory.
    Manifest(ManifestArgs),
    /// List the flattened route table.
    Routes(RoutesArgs),
    /// Render a path and print the mounted document.
    Render(RenderArgs),
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
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Manifest(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
