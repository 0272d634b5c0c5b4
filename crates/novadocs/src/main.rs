//! novadocs CLI - versioned documentation site tooling.
//!
//! Provides commands for:
//! - `resolve`: Show the version, meta tags and canonical URL of pages
//! - `head`: Print the HTML head fragment for a page
//! - `check`: Validate configuration and navigation links
//! - `manifest`: Resolve every page of the docs tree into a JSON manifest

mod commands;
mod error;
mod output;
mod scan;
mod site;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, HeadArgs, ManifestArgs, ResolveArgs};
use output::Output;

/// novadocs - versioned documentation site tooling.
#[derive(Parser)]
#[command(name = "novadocs", version, about)]
struct Cli {
    /// Enable verbose output (per-page resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version metadata for one or more page paths.
    Resolve(ResolveArgs),
    /// Print the HTML head fragment for a page.
    Head(HeadArgs),
    /// Validate configuration and navigation links.
    Check(CheckArgs),
    /// Write a JSON manifest of every page's version metadata.
    Manifest(ManifestArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Head(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Manifest(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
