//! helpdocs CLI - help documentation builder.
//!
//! Provides commands for:
//! - `build`: Build web pages, embedded help and the search index
//! - `print`: Compile all pages into one markdown document for print
//! - `expand`: Expand directives in a single file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ExpandArgs, PrintArgs};
use output::Output;

/// helpdocs - help documentation builder.
#[derive(Parser)]
#[command(name = "helpdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build web pages, embedded help and the search index.
    Build(BuildArgs),
    /// Compile pages into one document and run the print command.
    Print(PrintArgs),
    /// Expand directives in a file and write the result to stdout.
    Expand(ExpandArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Print(args) => args.verbose,
            Self::Expand(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise RUST_LOG; per-page progress goes through Output
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Print(args) => args.execute(),
        Commands::Expand(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
