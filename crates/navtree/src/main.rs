//! navtree CLI - Navigation tree data tooling.
//!
//! Provides commands for:
//! - `check`: Validate a navigation data file
//! - `fmt`: Reformat a navigation data file canonically
//! - `show`: Inspect a navigation data file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FmtArgs, ShowArgs};
use output::Output;

/// navtree - Navigation tree data tooling.
#[derive(Parser)]
#[command(name = "navtree", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (show load and parse logs).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a navigation data file.
    Check(CheckArgs),
    /// Reformat a navigation data file canonically.
    Fmt(FmtArgs),
    /// Inspect a navigation data file.
    Show(ShowArgs),
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
        Commands::Check(args) => args.execute(),
        Commands::Fmt(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
