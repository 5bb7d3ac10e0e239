//! lexalign CLI - Command-line interface for the IBM Model 1 aligner.
//!
//! This is the main entry point for the `lexalign` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AlignCommand, DumpCommand, TrainCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexalign")]
#[command(about = "IBM Model 1 word alignment", long_about = None)]
#[command(version)]
struct Cli {
    /// Log per-chunk progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a translation table on a parallel corpus
    Train(TrainCommand),
    /// Print Moses-style word alignments for a parallel corpus
    Align(AlignCommand),
    /// Print the translation table of a saved model
    Dump(DumpCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Align(cmd) => commands::align::run(cmd)?,
        Commands::Dump(cmd) => commands::dump::run(cmd)?,
    }

    Ok(())
}
